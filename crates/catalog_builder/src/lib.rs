//! Catalog Builder Library
//!
//! CSV (OpenStreetMap facility export) → FacilityCatalog → binary cache
//! JSON catalog → binary cache
//!
//! Cache layout is the one `sf_core::catalog` reads: MessagePack + LZ4 with
//! a trailing SHA256 of the compressed payload.

pub mod facility_csv;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sf_core::catalog::{
    checksum_hex, decompress_and_deserialize, serialize_and_compress, FacilityCatalog,
};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub use facility_csv::{parse_csv, ParseStats};

/// Catalog cache metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// Schema version (e.g. "v1")
    pub schema_version: String,
    /// SHA256 of the whole cache file (hex)
    pub checksum: String,
    /// RFC3339
    pub created_at: String,
    /// Uncompressed MessagePack size (bytes)
    pub original_size: u64,
    /// Cache file size (bytes)
    pub compressed_size: u64,
    /// compressed / original
    pub compression_ratio: f64,
    pub facility_count: usize,
}

/// Write `catalog` as a binary cache and describe the result.
pub fn write_catalog_cache(catalog: &FacilityCatalog, output: &Path) -> Result<CacheMetadata> {
    let original_size = rmp_serde::to_vec_named(catalog)
        .context("Failed to serialize catalog to MessagePack")?
        .len() as u64;

    let bytes = serialize_and_compress(catalog).context("Failed to build catalog cache")?;
    let compressed_size = bytes.len() as u64;
    let checksum = checksum_hex(&bytes);

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(output, &bytes)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    Ok(CacheMetadata {
        schema_version: catalog.schema_version.clone(),
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        original_size,
        compressed_size,
        compression_ratio: compressed_size as f64 / original_size.max(1) as f64,
        facility_count: catalog.len(),
    })
}

/// Import a facility CSV and write it as a binary cache.
pub fn build_catalog_cache(
    csv_path: &Path,
    output: &Path,
    schema_version: &str,
) -> Result<(CacheMetadata, ParseStats)> {
    let (facilities, stats) = parse_csv(csv_path)?;
    info!(
        parsed = stats.parsed,
        skipped_no_coordinates = stats.skipped_no_coordinates,
        duplicates = stats.duplicates,
        failed = stats.failed,
        total_rows = stats.total_rows,
        "parsed facility CSV"
    );
    if stats.parsed == 0 {
        warn!(csv = %csv_path.display(), "no facilities parsed, cache will be empty");
    }

    let catalog = FacilityCatalog::new(schema_version, facilities)
        .context("Imported facilities do not form a valid catalog")?;
    let meta = write_catalog_cache(&catalog, output)?;
    Ok((meta, stats))
}

/// Convert a JSON catalog (same shape as the embedded dataset) into a binary cache.
pub fn build_cache_from_json(input_json: &Path, output: &Path) -> Result<CacheMetadata> {
    let json = fs::read_to_string(input_json)
        .with_context(|| format!("Failed to read JSON file: {}", input_json.display()))?;
    let catalog = FacilityCatalog::from_json(&json).context("Failed to parse catalog JSON")?;
    write_catalog_cache(&catalog, output)
}

/// Whether the cache file matches `expected_checksum`.
pub fn verify_cache(cache_file: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;
    let actual = checksum_hex(&bytes);
    Ok(actual.eq_ignore_ascii_case(expected_checksum.trim()))
}

/// Decode a cache file, including its embedded checksum.
pub fn load_cache(cache_file: &Path) -> Result<FacilityCatalog> {
    let bytes = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;
    decompress_and_deserialize(&bytes)
        .with_context(|| format!("Invalid catalog cache: {}", cache_file.display()))
}

pub fn human_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_build_verify_and_load_from_csv() -> Result<()> {
        let mut csv = NamedTempFile::new()?;
        writeln!(csv, "id,name,lat,lon,sport,addr:city")?;
        writeln!(csv, "1,Sporthal Noord,52.40,4.93,basketball;volleyball,Amsterdam")?;
        writeln!(csv, "2,Tennisbaan,52.35,4.90,tennis,Amsterdam")?;
        writeln!(csv, "3,Zonder locatie,,,tennis,Amsterdam")?;
        csv.flush()?;

        let dir = TempDir::new()?;
        let out = dir.path().join("nested/catalog.v1.msgpack.lz4");
        let (meta, stats) = build_catalog_cache(csv.path(), &out, "v1")?;

        assert_eq!(stats.parsed, 2);
        assert_eq!(stats.skipped_no_coordinates, 1);
        assert_eq!(meta.facility_count, 2);
        assert_eq!(meta.schema_version, "v1");
        assert!(verify_cache(&out, &meta.checksum)?);
        assert!(!verify_cache(&out, "00")?);

        let catalog = load_cache(&out)?;
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.facilities[0].name, "Sporthal Noord");
        Ok(())
    }

    #[test]
    fn test_json_catalog_to_cache() -> Result<()> {
        let mut json = NamedTempFile::new()?;
        json.write_all(sf_core::catalog::FACILITIES_JSON.as_bytes())?;

        let out = NamedTempFile::new()?;
        let meta = build_cache_from_json(json.path(), out.path())?;
        assert!(meta.compressed_size < meta.original_size);

        let loaded = load_cache(out.path())?;
        assert_eq!(loaded, sf_core::catalog::embedded_catalog()?);
        Ok(())
    }

    #[test]
    fn test_human_bytes() {
        assert_eq!(human_bytes(0), "0.00 B");
        assert_eq!(human_bytes(1024), "1.00 KB");
        assert_eq!(human_bytes(1536), "1.50 KB");
        assert_eq!(human_bytes(1024 * 1024), "1.00 MB");
    }
}
