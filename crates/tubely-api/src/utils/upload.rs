//! Common utilities for upload handlers

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use futures::TryStreamExt;
use std::sync::Arc;
use tubely_core::{AppError, AssetClass, VideoRecord};
use uuid::Uuid;

use crate::services::ingest::IngestService;
use crate::state::AppState;

/// Map a multipart read error. Hitting the route's body limit is a size error; anything
/// else means the stream could not be read.
fn map_stream_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Io(format!("Failed to read upload stream: {}", err.body_text()))
    }
}

fn map_next_field_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Shared body of the upload handlers.
///
/// The video ID is checked first, then the requester is authenticated and authorized. Only
/// then is the multipart body opened and streamed into the ingest pipeline. Parts after the
/// first one named for the asset class are ignored.
pub async fn ingest_multipart_upload(
    state: &Arc<AppState>,
    asset_class: AssetClass,
    raw_video_id: &str,
    headers: &HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<VideoRecord, AppError> {
    let video_id = Uuid::parse_str(raw_video_id)?;

    let service = IngestService::new(state);
    let upload = service.authorize(headers, video_id, asset_class).await?;

    let mut multipart = multipart.map_err(|e| {
        AppError::BadRequest(format!("Invalid multipart request: {}", e.body_text()))
    })?;
    let field_name = asset_class.form_field();
    let field = loop {
        match multipart
            .next_field()
            .await
            .map_err(map_next_field_error)?
        {
            Some(field) if field.name() == Some(field_name) => break field,
            Some(_) => continue,
            None => {
                return Err(AppError::BadRequest(format!(
                    "No file provided; expected a form field named '{}'",
                    field_name
                )))
            }
        }
    };

    let declared_media_type = field.content_type().map(str::to_owned);
    let body = field.map_err(map_stream_error);

    service
        .ingest(upload, declared_media_type.as_deref(), body)
        .await
}
