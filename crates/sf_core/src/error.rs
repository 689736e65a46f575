use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Corrupted catalog cache")]
    Corrupted,

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Catalog file not found: {path}")]
    FileNotFound { path: String },

    #[error("Duplicate facility id: {id}")]
    DuplicateFacility { id: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    /// Whether falling back to the embedded catalog makes sense after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::Io(_) => true,
            CoreError::FileNotFound { .. } => true,
            CoreError::VersionMismatch { .. } => true,
            CoreError::Corrupted => false,
            CoreError::ChecksumMismatch => false,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_are_recoverable_corruption_is_not() {
        let missing = CoreError::FileNotFound { path: "x.lz4".to_string() };
        assert!(missing.is_recoverable());
        assert!(!CoreError::ChecksumMismatch.is_recoverable());
        assert!(!CoreError::Corrupted.is_recoverable());
    }

    #[test]
    fn version_mismatch_message_names_both_versions() {
        let err = CoreError::VersionMismatch { found: 3, expected: 1 };
        assert_eq!(err.to_string(), "Version mismatch: found 3, expected 1");
    }
}
