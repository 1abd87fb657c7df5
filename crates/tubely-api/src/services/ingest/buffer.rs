//! Stream buffering
//!
//! An upload body is fully received before anything is written to a backend. Thumbnails are
//! accumulated in memory; videos are copied to a private temp file that is removed when the
//! buffered asset is dropped, on every exit path.

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use std::path::PathBuf;
use tubely_core::{AppError, AssetClass, BufferPolicy, Config};
use tubely_storage::{BufferedAsset, StagedFile};

/// Buffers one upload body according to its asset class.
#[derive(Debug, Clone)]
pub struct StreamBuffer {
    policy: BufferPolicy,
    size_limit: usize,
    temp_dir: Option<PathBuf>,
}

impl StreamBuffer {
    pub fn new(policy: BufferPolicy, size_limit: usize, temp_dir: Option<PathBuf>) -> Self {
        Self {
            policy,
            size_limit,
            temp_dir,
        }
    }

    pub fn for_class(config: &Config, asset_class: AssetClass) -> Self {
        Self::new(
            asset_class.buffer_policy(),
            config.max_upload_size_for(asset_class),
            config.upload_temp_dir().cloned(),
        )
    }

    /// Drain `body` into a [`BufferedAsset`], failing with `PayloadTooLarge` as soon as the
    /// size limit is exceeded. Nothing partial is ever returned.
    pub async fn buffer<S>(&self, body: S) -> Result<BufferedAsset, AppError>
    where
        S: Stream<Item = Result<Bytes, AppError>>,
    {
        let asset = match self.policy {
            BufferPolicy::Memory => self.buffer_in_memory(body).await?,
            BufferPolicy::TempFile => self.buffer_to_temp_file(body).await?,
        };

        if asset.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }

        Ok(asset)
    }

    fn too_large(&self) -> AppError {
        AppError::PayloadTooLarge(format!(
            "Upload exceeds the maximum size of {} bytes",
            self.size_limit
        ))
    }

    async fn buffer_in_memory<S>(&self, body: S) -> Result<BufferedAsset, AppError>
    where
        S: Stream<Item = Result<Bytes, AppError>>,
    {
        let mut body = std::pin::pin!(body);
        let mut data = BytesMut::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            if data.len() + chunk.len() > self.size_limit {
                return Err(self.too_large());
            }
            data.extend_from_slice(&chunk);
        }

        Ok(BufferedAsset::Memory(data.freeze()))
    }

    async fn buffer_to_temp_file<S>(&self, body: S) -> Result<BufferedAsset, AppError>
    where
        S: Stream<Item = Result<Bytes, AppError>>,
    {
        let mut body = std::pin::pin!(body);
        let mut staged = StagedFile::create(self.temp_dir.as_deref())
            .map_err(|e| AppError::Io(format!("Failed to create staging file: {}", e)))?;

        // Early returns drop `staged`, which removes the file.
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            if staged.len() + chunk.len() as u64 > self.size_limit as u64 {
                return Err(self.too_large());
            }
            staged
                .write_chunk(&chunk)
                .await
                .map_err(|e| AppError::Io(format!("Failed to write staging file: {}", e)))?;
        }

        staged
            .rewind()
            .await
            .map_err(|e| AppError::Io(format!("Failed to rewind staging file: {}", e)))?;

        tracing::debug!(
            path = %staged.path().display(),
            size_bytes = staged.len(),
            "Upload staged to temp file"
        );

        Ok(BufferedAsset::Staged(staged))
    }
}
