use crate::asset::BufferedAsset;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::buffered::BufWriter;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tubely_core::{S3LocationStyle, StorageKey, StoredAsset};

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    location_style: S3LocationStyle,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `location_style` - Whether returned locations are `s3://` URIs or public URLs
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        location_style: S3LocationStyle,
    ) -> StorageResult<Self> {
        // Credentials come from the environment; bucket and region are explicit.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::from_store(
            Arc::new(store),
            bucket,
            region,
            endpoint_url,
            location_style,
        ))
    }

    /// Wrap an already configured object store.
    pub fn from_store(
        store: Arc<dyn ObjectStore>,
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        location_style: S3LocationStyle,
    ) -> Self {
        S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
            location_style,
        }
    }

    /// Generate the location reported for an object
    ///
    /// `Uri` yields `s3://{bucket}/{key}`. `Public` yields the standard AWS URL
    /// `https://{bucket}.s3.{region}.amazonaws.com/{key}`, or a path-style URL under
    /// the custom endpoint when one is configured.
    fn generate_url(&self, key: &str) -> String {
        match self.location_style {
            S3LocationStyle::Uri => format!("s3://{}/{}", self.bucket, key),
            S3LocationStyle::Public => match self.endpoint_url {
                Some(ref endpoint) => {
                    format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key)
                }
                None => format!(
                    "https://{}.s3.{}.amazonaws.com/{}",
                    self.bucket, self.region, key
                ),
            },
        }
    }

    fn content_type_attributes(content_type: &str) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        attributes
    }

    /// Stream a staged file through a multipart-capable buffered writer.
    async fn put_staged(
        &self,
        location: &Path,
        content_type: &str,
        mut reader: tokio::fs::File,
    ) -> Result<u64, String> {
        let mut writer = BufWriter::new(Arc::clone(&self.store), location.clone())
            .with_attributes(Self::content_type_attributes(content_type));

        let copied = match tokio::io::copy(&mut reader, &mut writer).await {
            Ok(copied) => copied,
            Err(e) => {
                if let Err(abort_err) = writer.abort().await {
                    tracing::warn!(error = %abort_err, "Failed to abort S3 upload");
                }
                return Err(e.to_string());
            }
        };

        writer.shutdown().await.map_err(|e| e.to_string())?;
        Ok(copied)
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put(
        &self,
        key: &StorageKey,
        content_type: &str,
        data: BufferedAsset,
    ) -> StorageResult<StoredAsset> {
        let location = Path::from(key.as_str());
        let start = std::time::Instant::now();
        let expected_size = data.len();

        let result = match data {
            BufferedAsset::Memory(bytes) => {
                let size = bytes.len() as u64;
                let options = PutOptions {
                    attributes: Self::content_type_attributes(content_type),
                    ..Default::default()
                };
                self.store
                    .put_opts(&location, PutPayload::from(bytes), options)
                    .await
                    .map(|_| size)
                    .map_err(|e| e.to_string())
            }
            BufferedAsset::Staged(staged) => {
                // The path guard lives until the copy has finished.
                let (reader, _staged_path, _) = staged.into_parts();
                self.put_staged(&location, content_type, reader).await
            }
        };

        let byte_size = result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = expected_size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e)
        })?;

        let url = self.generate_url(key.as_str());

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = byte_size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(StoredAsset {
            key: key.clone(),
            backend: StorageBackend::S3,
            location: url,
            byte_size,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
