use axum::http::HeaderMap;
use bytes::Bytes;
use futures::Stream;
use std::sync::Arc;
use tubely_core::{validate_media_type, AppError, AssetClass, VideoRecord};
use tubely_storage::generate_storage_key;
use uuid::Uuid;

use super::buffer::StreamBuffer;
use crate::auth::bearer_token;
use crate::state::AppState;

/// Proof that the requester is authenticated and owns the target record.
///
/// Only [`IngestService::authorize`] creates one, so content can never be ingested for a
/// request that skipped the ownership check.
#[derive(Debug)]
pub struct AuthorizedUpload {
    video: VideoRecord,
    user_id: Uuid,
    asset_class: AssetClass,
}

impl AuthorizedUpload {
    pub fn video(&self) -> &VideoRecord {
        &self.video
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn asset_class(&self) -> AssetClass {
        self.asset_class
    }
}

/// Asset ingest pipeline
///
/// Sequences one upload: authenticate → authorize ownership → validate content → buffer →
/// store → update record. Every step either advances or ends the request with a single
/// `AppError`; nothing is retried.
pub struct IngestService {
    state: Arc<AppState>,
}

impl IngestService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Authenticate the bearer token and check that the requester owns `video_id`.
    #[tracing::instrument(skip(self, headers), fields(video_id = %video_id, asset_class = %asset_class))]
    pub async fn authorize(
        &self,
        headers: &HeaderMap,
        video_id: Uuid,
        asset_class: AssetClass,
    ) -> Result<AuthorizedUpload, AppError> {
        let token = bearer_token(headers)?;
        let user_id = self.state.verifier.verify(token)?;

        let video = self.state.videos.get_video(video_id).await?;
        if !video.is_owned_by(user_id) {
            tracing::warn!(
                user_id = %user_id,
                owner_id = %video.user_id,
                "Upload rejected: requester does not own video"
            );
            return Err(AppError::Forbidden(
                "You do not own this video".to_string(),
            ));
        }

        Ok(AuthorizedUpload {
            video,
            user_id,
            asset_class,
        })
    }

    /// Validate, buffer and store the uploaded content, then link it to the record.
    ///
    /// The record is only updated after the backend reports a complete write. If that update
    /// fails the stored asset is left unlinked and logged for reconciliation.
    #[tracing::instrument(
        skip(self, upload, body),
        fields(
            video_id = %upload.video.id,
            user_id = %upload.user_id,
            asset_class = %upload.asset_class
        )
    )]
    pub async fn ingest<S>(
        &self,
        upload: AuthorizedUpload,
        declared_media_type: Option<&str>,
        body: S,
    ) -> Result<VideoRecord, AppError>
    where
        S: Stream<Item = Result<Bytes, AppError>>,
    {
        let AuthorizedUpload {
            video, asset_class, ..
        } = upload;

        let declared_media_type = declared_media_type.ok_or_else(|| {
            AppError::UnsupportedMediaType(format!(
                "Missing Content-Type for {} upload",
                asset_class
            ))
        })?;
        let media_kind = validate_media_type(declared_media_type, asset_class)?;

        let buffered = StreamBuffer::for_class(&self.state.config, asset_class)
            .buffer(body)
            .await?;

        let key = generate_storage_key(media_kind)?;
        let stored = self
            .state
            .stores
            .for_class(asset_class)
            .put(&key, media_kind.mime_type(), buffered)
            .await?;

        // Only this class's location is written; the record may have changed while buffering.
        let video = match self
            .state
            .videos
            .set_asset_location(video.id, asset_class, &stored.location)
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    video_id = %video.id,
                    storage_key = %stored.key,
                    backend = %stored.backend,
                    location = %stored.location,
                    "Stored asset is orphaned: video record update failed"
                );
                return Err(AppError::Persistence(format!(
                    "Failed to update video {}: {}",
                    video.id, e
                )));
            }
        };

        tracing::info!(
            storage_key = %stored.key,
            backend = %stored.backend,
            size_bytes = stored.byte_size,
            "Asset ingested"
        );

        Ok(video)
    }
}
