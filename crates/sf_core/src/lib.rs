//! # sf_core - Sport Facility Locator
//!
//! Static sport facility catalog with the logic behind a facility directory:
//! sport label normalization, great-circle distance, filtered and paginated
//! search from a chosen origin, and the map binding a UI host renders.
//!
//! ## Features
//! - Canonical sport keys with Dutch display labels
//! - Haversine distance rounded to 0.1 km
//! - Search state with device-location origin and "load more" paging
//! - Embedded catalog, or a MessagePack+LZ4 cache via `SF_CATALOG_PATH`
//! - JSON API for UI hosts

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod listing;
pub mod map_view;
pub mod models;
pub mod search;
pub mod sport;

pub use api::{search_facilities_json, sport_options_json, SearchRequest, SearchResponse};
pub use catalog::{get_catalog, FacilityCatalog};
pub use config::SearchConfig;
pub use error::{CoreError, Result};
pub use geo::{haversine_distance_km, LatLng, DEFAULT_ORIGIN};
pub use listing::FacilityCard;
pub use map_view::{map_view, MapView};
pub use models::{FacilityId, FacilityLocation};
pub use search::{GeolocationError, SearchController, SearchHit, SportFilter};
pub use sport::{canonical_keys, normalize_sports, sport_options, NormalizedSport, SportOption};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
