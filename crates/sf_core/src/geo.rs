//! Great-circle distance between facilities and a search origin.
//!
//! Distances are reported in kilometers rounded to one decimal, which is
//! what listings and map popups display.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Amsterdam city center, the origin used until the device reports a location.
pub const DEFAULT_ORIGIN: LatLng = LatLng { lat: 52.3676, lng: 4.9041 };

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn distance_km(&self, other: &LatLng) -> f64 {
        haversine_distance_km(self.lat, self.lng, other.lat, other.lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        DEFAULT_ORIGIN
    }
}

/// Unrounded haversine distance in kilometers.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance in kilometers, rounded to one decimal.
pub fn haversine_distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    round_to_tenth(haversine_km(lat1, lng1, lat2, lng2))
}

pub fn round_to_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
