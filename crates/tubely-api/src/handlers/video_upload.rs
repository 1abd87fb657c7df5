use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::ingest_multipart_upload;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use tubely_core::{AssetClass, VideoRecord};

/// Upload a video file. The body is staged to a temp file before it is sent to storage.
#[utoipa::path(
    post,
    path = "/api/video_upload/{video_id}",
    tag = "uploads",
    params(
        ("video_id" = String, Path, description = "ID of the video record")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form field `video` carrying a video/mp4 part"),
    responses(
        (status = 200, description = "Video stored and linked", body = VideoRecord),
        (status = 400, description = "Invalid video ID or multipart body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Requester does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "Video too large", body = ErrorResponse),
        (status = 415, description = "Unsupported media type", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VideoRecord>, HttpAppError> {
    let video =
        ingest_multipart_upload(&state, AssetClass::Video, &video_id, &headers, multipart)
            .await?;

    Ok(Json(video))
}
