//! Facility catalog compiled into the binary.
//!
//! `include_str!` keeps the default dataset available without any file I/O.

use super::FacilityCatalog;
use crate::error::Result;

/// Default facility dataset (~24 facilities around Amsterdam, Haarlem, Utrecht and Rotterdam)
pub const FACILITIES_JSON: &str = include_str!("../../../../data/facilities.v1.json");

pub fn embedded_catalog() -> Result<FacilityCatalog> {
    FacilityCatalog::from_json(FACILITIES_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dataset_parses_and_validates() {
        let catalog = embedded_catalog().unwrap();
        assert!(catalog.len() >= 20);
        assert!(catalog.iter().all(|f| f.has_valid_coordinates()));
    }
}
