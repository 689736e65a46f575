//! Search and map tuning.
//!
//! Defaults match the shipped UI. A JSON file named by
//! `SF_SEARCH_CONFIG_PATH` may override any subset of fields.

use crate::error::{CoreError, Result};
use crate::geo::{LatLng, DEFAULT_ORIGIN};
use serde::{Deserialize, Serialize};
use std::{env, fs};

pub const SEARCH_CONFIG_PATH_ENV: &str = "SF_SEARCH_CONFIG_PATH";

/// Query text shown after switching to the device location; disables text filtering.
pub const DEVICE_LOCATION_LABEL: &str = "Mijn locatie";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Origin used until the device reports a location
    pub default_origin: LatLng,
    /// Results revealed per page / per "load more"
    pub page_size: usize,
    /// Zoom when a facility is selected
    pub focus_zoom: u8,
    /// Zoom when centered on the origin
    pub origin_zoom: u8,
    pub device_location_label: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_origin: DEFAULT_ORIGIN,
            page_size: 10,
            focus_zoom: 13,
            origin_zoom: 12,
            device_location_label: DEVICE_LOCATION_LABEL.to_string(),
        }
    }
}

impl SearchConfig {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.default_origin.is_valid() {
            return Err(CoreError::InvalidConfig(format!(
                "default_origin out of range: ({}, {})",
                self.default_origin.lat, self.default_origin.lng
            )));
        }
        if self.page_size == 0 {
            return Err(CoreError::InvalidConfig("page_size must be at least 1".to_string()));
        }
        for (name, zoom) in [("focus_zoom", self.focus_zoom), ("origin_zoom", self.origin_zoom)] {
            if zoom > 19 {
                return Err(CoreError::InvalidConfig(format!("{name} must be 0..=19, got {zoom}")));
            }
        }
        if self.device_location_label.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "device_location_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Defaults, overridden by `SF_SEARCH_CONFIG_PATH` when set.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(SEARCH_CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            CoreError::InvalidConfig(format!(
                "failed to read {SEARCH_CONFIG_PATH_ENV}='{path}': {e}"
            ))
        })?;
        let config = Self::from_json(&content)?;
        tracing::info!(path, "loaded search config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.default_origin, DEFAULT_ORIGIN);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = SearchConfig::from_json(r#"{"page_size": 25}"#).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.focus_zoom, 13);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = SearchConfig { page_size: 0, ..SearchConfig::default() };
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn from_json_validates() {
        let err = SearchConfig::from_json(r#"{"page_size": 0}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
        assert!(SearchConfig::from_json(r#"{"focus_zoom": 22}"#).is_err());
    }

    #[test]
    fn invalid_origin_is_rejected() {
        let config = SearchConfig {
            default_origin: LatLng::new(120.0, 4.0),
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
