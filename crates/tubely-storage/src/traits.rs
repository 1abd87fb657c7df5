//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::asset::BufferedAsset;
use crate::StorageBackend;
use async_trait::async_trait;
use thiserror::Error;
use tubely_core::{AppError, StorageKey, StoredAsset};

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UploadFailed(msg) => AppError::Storage(msg),
            StorageError::InvalidKey(msg) => AppError::Storage(format!("Invalid key: {}", msg)),
            StorageError::IoError(err) => AppError::Storage(format!("IO error: {}", err)),
            StorageError::KeyGeneration(msg) => {
                AppError::Internal(format!("Key generation failed: {}", msg))
            }
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        }
    }
}

/// Storage abstraction trait
///
/// The ingest pipeline only needs one capability from a backend: durably persist a
/// buffered asset under a freshly generated key and report where it can be retrieved.
/// Backends do not retry; failures are reported to the caller as they happen.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write the asset under `key` and return the stored asset with its location.
    ///
    /// The buffered asset is consumed. A staged temp file is removed once this returns,
    /// whether or not the write succeeded.
    async fn put(
        &self,
        key: &StorageKey,
        content_type: &str,
        data: BufferedAsset,
    ) -> StorageResult<StoredAsset>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
