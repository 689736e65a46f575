pub mod facility;

pub use facility::{FacilityId, FacilityLocation};
