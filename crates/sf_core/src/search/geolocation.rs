use crate::geo::LatLng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a device location request did not produce coordinates.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationError {
    #[error("geolocation is not supported by the host")]
    Unsupported,

    #[error("geolocation permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    Unavailable(String),

    #[error("device reported invalid coordinates ({lat}, {lng})")]
    InvalidCoordinates { lat: f64, lng: f64 },
}

impl GeolocationError {
    /// Alert text shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            GeolocationError::Unsupported => "Je browser ondersteunt geen locatiebepaling",
            _ => "Kon je locatie niet ophalen. Controleer of je locatie delen hebt toegestaan.",
        }
    }
}

/// Accepts only coordinates inside WGS84 bounds.
pub fn validate_device_position(position: LatLng) -> Result<LatLng, GeolocationError> {
    if position.is_valid() {
        Ok(position)
    } else {
        Err(GeolocationError::InvalidCoordinates { lat: position.lat, lng: position.lng })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_has_its_own_alert() {
        assert_ne!(
            GeolocationError::Unsupported.user_message(),
            GeolocationError::PermissionDenied.user_message()
        );
    }

    #[test]
    fn nan_position_is_rejected() {
        let err = validate_device_position(LatLng::new(f64::NAN, 4.9)).unwrap_err();
        assert!(matches!(err, GeolocationError::InvalidCoordinates { .. }));
    }
}
