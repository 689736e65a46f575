//! Static facility catalog.
//!
//! The process-wide catalog is resolved once:
//! 1) `SF_CATALOG_PATH` if set (`.json` or a binary cache built by `catalog_builder`)
//! 2) the embedded dataset
//!
//! A recoverable failure on the path falls back to the embedded dataset.

pub mod cache;
pub mod embedded;

use crate::error::{CoreError, Result};
use crate::models::{FacilityId, FacilityLocation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

pub use cache::{checksum_hex, decompress_and_deserialize, serialize_and_compress};
pub use embedded::{embedded_catalog, FACILITIES_JSON};

pub const CATALOG_VERSION: u32 = 1;

pub const CATALOG_PATH_ENV: &str = "SF_CATALOG_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityCatalog {
    pub version: u32,
    pub schema_version: String,
    pub facilities: Vec<FacilityLocation>,
}

impl FacilityCatalog {
    pub fn new(schema_version: &str, facilities: Vec<FacilityLocation>) -> Result<Self> {
        let catalog = Self {
            version: CATALOG_VERSION,
            schema_version: schema_version.to_string(),
            facilities,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Version must be readable by this build; ids must be unique.
    pub fn validate(&self) -> Result<()> {
        if self.version > CATALOG_VERSION {
            return Err(CoreError::VersionMismatch {
                found: self.version,
                expected: CATALOG_VERSION,
            });
        }

        let mut ids = HashSet::new();
        for facility in &self.facilities {
            if !ids.insert(&facility.id) {
                return Err(CoreError::DuplicateFacility { id: facility.id.to_string() });
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &FacilityId) -> Option<&FacilityLocation> {
        self.facilities.iter().find(|f| &f.id == id)
    }

    pub fn find_by_str(&self, raw: &str) -> Option<&FacilityLocation> {
        self.facilities.iter().find(|f| f.id.matches_str(raw))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FacilityLocation> {
        self.facilities.iter()
    }

    pub fn as_slice(&self) -> &[FacilityLocation] {
        &self.facilities
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

static CATALOG: OnceCell<FacilityCatalog> = OnceCell::new();

fn resolve_catalog_path() -> Option<PathBuf> {
    let path = env::var(CATALOG_PATH_ENV).ok()?;
    let trimmed = path.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

/// Load a catalog from a `.json` file or a binary cache.
pub fn load_catalog_from_path(path: &Path) -> Result<FacilityCatalog> {
    if !path.exists() {
        return Err(CoreError::FileNotFound { path: path.display().to_string() });
    }

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let content = std::fs::read_to_string(path)?;
        FacilityCatalog::from_json(&content)
    } else {
        let bytes = std::fs::read(path)?;
        decompress_and_deserialize(&bytes)
    }
}

/// Load (or return cached) process-wide catalog.
pub fn get_catalog() -> Result<&'static FacilityCatalog> {
    CATALOG.get_or_try_init(|| {
        if let Some(path) = resolve_catalog_path() {
            match load_catalog_from_path(&path) {
                Ok(catalog) => {
                    tracing::info!(
                        path = %path.display(),
                        facilities = catalog.len(),
                        "loaded facility catalog"
                    );
                    return Ok(catalog);
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "catalog path unusable, using embedded catalog"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        let catalog = embedded_catalog()?;
        tracing::info!(facilities = catalog.len(), "loaded embedded facility catalog");
        Ok(catalog)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn facility(id: u64) -> FacilityLocation {
        FacilityLocation {
            id: FacilityId::Number(id),
            name: format!("Veld {id}"),
            lat: 52.0,
            lng: 5.0,
            sports: vec!["football".to_string()],
            address: None,
            city: None,
            phone: None,
            website: None,
            chain: None,
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = FacilityCatalog::new("v1", vec![facility(1), facility(1)]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateFacility { .. }));
    }

    #[test]
    fn lookup_by_id_and_text() {
        let catalog = FacilityCatalog::new("v1", vec![facility(1), facility(2)]).unwrap();
        assert_eq!(catalog.get(&FacilityId::Number(2)).map(|f| f.name.as_str()), Some("Veld 2"));
        assert!(catalog.find_by_str("1").is_some());
        assert!(catalog.find_by_str("3").is_none());
    }

    #[test]
    fn loads_json_and_cache_files() -> Result<()> {
        let catalog = FacilityCatalog::new("v1", vec![facility(1)])?;

        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile()?;
        json_file.write_all(serde_json::to_string(&catalog)?.as_bytes())?;
        assert_eq!(load_catalog_from_path(json_file.path())?, catalog);

        let mut cache_file = NamedTempFile::new()?;
        cache_file.write_all(&serialize_and_compress(&catalog)?)?;
        assert_eq!(load_catalog_from_path(cache_file.path())?, catalog);
        Ok(())
    }

    #[test]
    fn newer_json_catalog_is_rejected() -> Result<()> {
        let mut catalog = FacilityCatalog::new("v1", vec![facility(1)])?;
        catalog.version = CATALOG_VERSION + 1;
        let json = serde_json::to_string(&catalog)?;

        let err = FacilityCatalog::from_json(&json).unwrap_err();
        assert!(matches!(err, CoreError::VersionMismatch { found: 2, expected: 1 }));

        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile()?;
        json_file.write_all(json.as_bytes())?;
        let err = load_catalog_from_path(json_file.path()).unwrap_err();
        assert!(err.is_recoverable());
        Ok(())
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_catalog_from_path(Path::new("/nonexistent/catalog.lz4")).unwrap_err();
        assert!(matches!(err, CoreError::FileNotFound { .. }));
    }
}
