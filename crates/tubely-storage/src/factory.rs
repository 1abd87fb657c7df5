#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Arc;
use tubely_core::{AssetClass, Config};

/// Create a storage backend of the requested kind from configuration
pub async fn create_storage(
    config: &Config,
    backend: StorageBackend,
) -> StorageResult<Arc<dyn Storage>> {
    match backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket()
                .map(String::from)
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config
                .s3_region()
                .map(String::from)
                .or_else(|| config.aws_region().map(String::from))
                .ok_or_else(|| {
                    StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
                })?;
            let endpoint = config.s3_endpoint().map(String::from);

            let storage =
                S3Storage::new(bucket, region, endpoint, config.s3_location_style()).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let storage =
                LocalStorage::new(config.assets_root().clone(), config.local_assets_base_url())
                    .await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

/// The backend assigned to each asset class.
#[derive(Clone)]
pub struct AssetStores {
    thumbnail: Arc<dyn Storage>,
    video: Arc<dyn Storage>,
}

impl AssetStores {
    pub fn new(thumbnail: Arc<dyn Storage>, video: Arc<dyn Storage>) -> Self {
        Self { thumbnail, video }
    }

    /// Build both backends. When both classes use the same kind, one instance is shared.
    pub async fn from_config(config: &Config) -> StorageResult<Self> {
        let thumbnail_backend = config.storage_backend_for(AssetClass::Thumbnail);
        let video_backend = config.storage_backend_for(AssetClass::Video);

        let thumbnail = create_storage(config, thumbnail_backend).await?;
        let video = if video_backend == thumbnail_backend {
            Arc::clone(&thumbnail)
        } else {
            create_storage(config, video_backend).await?
        };

        tracing::info!(
            thumbnail_backend = %thumbnail_backend,
            video_backend = %video_backend,
            "Asset storage initialized"
        );

        Ok(Self::new(thumbnail, video))
    }

    pub fn for_class(&self, asset_class: AssetClass) -> &Arc<dyn Storage> {
        match asset_class {
            AssetClass::Thumbnail => &self.thumbnail,
            AssetClass::Video => &self.video,
        }
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use tubely_core::IngestConfig;

    fn local_only_config(assets_root: &std::path::Path) -> Config {
        let mut config = IngestConfig::default();
        config.assets_root = assets_root.to_path_buf();
        config.thumbnail_backend = StorageBackend::Local;
        config.video_backend = StorageBackend::Local;
        Config::new(config)
    }

    #[tokio::test]
    async fn test_selects_backend_per_class() {
        let dir = tempfile::tempdir().unwrap();
        let stores = AssetStores::from_config(&local_only_config(dir.path()))
            .await
            .unwrap();

        assert_eq!(
            stores.for_class(AssetClass::Thumbnail).backend_type(),
            StorageBackend::Local
        );
        assert_eq!(
            stores.for_class(AssetClass::Video).backend_type(),
            StorageBackend::Local
        );
    }

    #[cfg(feature = "storage-s3")]
    #[tokio::test]
    async fn test_s3_requires_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let config = local_only_config(dir.path());

        let result = create_storage(&config, StorageBackend::S3).await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }
}
