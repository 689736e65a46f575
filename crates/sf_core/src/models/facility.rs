use crate::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source datasets mix numeric OSM ids and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacilityId {
    Number(u64),
    Text(String),
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FacilityId::Number(n) => write!(f, "{n}"),
            FacilityId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for FacilityId {
    fn from(n: u64) -> Self {
        FacilityId::Number(n)
    }
}

impl From<&str> for FacilityId {
    fn from(s: &str) -> Self {
        FacilityId::Text(s.to_string())
    }
}

impl FacilityId {
    /// Matches an id given as text, e.g. from a JSON request or CLI flag.
    pub fn matches_str(&self, raw: &str) -> bool {
        let raw = raw.trim();
        match self {
            FacilityId::Number(n) => raw.parse::<u64>().map(|v| v == *n).unwrap_or(false),
            FacilityId::Text(s) => s == raw,
        }
    }
}

/// A sport facility as it appears in the static catalog.
///
/// `sports` keeps the raw labels from the source data; canonical keys are
/// derived on demand by [`crate::sport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityLocation {
    pub id: FacilityId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub sports: Vec<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// Fitness chain brand, detected at import time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
}

impl FacilityLocation {
    pub fn coordinates(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    pub fn has_valid_coordinates(&self) -> bool {
        self.coordinates().is_valid()
    }

    /// Case-insensitive substring match on name, city and address.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        let contains = |field: Option<&str>| {
            field.map(|v| v.to_lowercase().contains(needle)).unwrap_or(false)
        };
        contains(Some(&self.name))
            || contains(self.city.as_deref())
            || contains(self.address.as_deref())
    }
}
