//! Error types
//!
//! Profile errors are recoverable and leave all state untouched. Storage
//! errors are reported by backends but never abort a selection change.

use thiserror::Error;

/// Failures of profile management operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Name is empty/whitespace or already taken
    #[error("profile name {0:?} is empty or already in use")]
    DuplicateName(String),
    /// Refused to delete the only remaining profile
    #[error("cannot delete the last remaining profile")]
    LastProfile,
    #[error("profile {0:?} not found")]
    NotFound(String),
}

/// Failures of a key-value storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failures while ingesting catalog data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}
