//! Facility search: sport + text filtering, distance ranking, pagination
//! and device-location origin.

pub mod controller;
pub mod filter;
pub mod geolocation;

pub use controller::{SearchController, SearchState};
pub use filter::{rank_facilities, text_needle, SearchHit, SportFilter};
pub use geolocation::{validate_device_position, GeolocationError};
