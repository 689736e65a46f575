// Catalog cache: MessagePack + LZ4 with a trailing SHA-256 checksum

use super::FacilityCatalog;
use crate::error::{CoreError, Result};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};

const CHECKSUM_LEN: usize = 32;

/// Serialize, compress and checksum a catalog.
pub fn serialize_and_compress(catalog: &FacilityCatalog) -> Result<Vec<u8>> {
    catalog.validate()?;

    // 1. MessagePack with field names
    let msgpack = to_vec_named(catalog)?;

    // 2. LZ4, size prepended
    let compressed = compress_prepend_size(&msgpack);

    // 3. SHA256 of the compressed payload, appended
    let checksum = Sha256::digest(&compressed);

    let mut result = compressed;
    result.extend_from_slice(&checksum);
    Ok(result)
}

/// Verify, decompress and deserialize a catalog cache.
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<FacilityCatalog> {
    // size header + checksum
    if bytes.len() < 4 + CHECKSUM_LEN {
        return Err(CoreError::Corrupted);
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if Sha256::digest(payload).as_slice() != checksum_bytes {
        return Err(CoreError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| CoreError::Decompression)?;
    let catalog: FacilityCatalog = from_slice(&msgpack)?;
    catalog.validate()?;

    Ok(catalog)
}

/// Hex SHA256 of a whole cache file, as recorded in build metadata.
pub fn checksum_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
