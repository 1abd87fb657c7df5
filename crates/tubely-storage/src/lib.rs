//! Tubely Storage Library
//!
//! This crate provides the storage capability trait and its implementations for the
//! local filesystem and S3-compatible object storage, plus the pieces every backend
//! shares: key generation and the staged upload types.
//!
//! # Storage key format
//!
//! Keys are flat: `{43 chars of URL-safe base64}.{extension}`. They are generated from 32
//! bytes of OS randomness, never from client input, and never contain a path separator.
//! Key generation is centralized in the `keys` module so all backends stay consistent.

pub mod asset;
pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use asset::{BufferedAsset, StagedFile};
pub use factory::{create_storage, AssetStores};
pub use keys::generate_storage_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
