//! Tubely Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration and content
//! validation shared by every Tubely component.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, IngestConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    AssetClass, BufferPolicy, MediaKind, StorageKey, StoredAsset, VideoRecord,
};
pub use storage_types::{S3LocationStyle, StorageBackend};
pub use validation::validate_media_type;
