use crate::asset::BufferedAsset;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tubely_core::{StorageKey, StoredAsset};

/// Local filesystem storage implementation
///
/// Writes go straight to `{base_path}/{key}` with create-and-copy. There is no
/// write-to-temp-then-rename step, so a crash mid-write can leave a partial file
/// behind. Such a file is never linked to a record.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "./assets")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:8091/assets")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert storage key to filesystem path.
    ///
    /// Keys are flat names; anything that could address another directory is refused.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty()
            || storage_key.contains("..")
            || storage_key.contains('/')
            || storage_key.contains('\\')
        {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_key))
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(
        &self,
        key: &StorageKey,
        _content_type: &str,
        data: BufferedAsset,
    ) -> StorageResult<StoredAsset> {
        let path = self.key_to_path(key.as_str())?;
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let byte_size = match data {
            BufferedAsset::Memory(bytes) => {
                file.write_all(&bytes).await.map_err(|e| {
                    StorageError::UploadFailed(format!(
                        "Failed to write file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                bytes.len() as u64
            }
            BufferedAsset::Staged(staged) => {
                let (mut reader, _staged_path, _) = staged.into_parts();
                tokio::io::copy(&mut reader, &mut file).await.map_err(|e| {
                    StorageError::UploadFailed(format!(
                        "Failed to write stream to file {}: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        };

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let location = self.generate_url(key.as_str());

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = byte_size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(StoredAsset {
            key: key.clone(),
            backend: StorageBackend::Local,
            location,
            byte_size,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
