//! Upload route group.

use crate::constants::{API_PREFIX, MULTIPART_OVERHEAD_BYTES};
use crate::handlers;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use tubely_core::{AssetClass, Config};

/// Request body limit for an upload route: the asset cap plus room for multipart framing.
pub(super) fn body_limit_for(config: &Config, asset_class: AssetClass) -> usize {
    config
        .max_upload_size_for(asset_class)
        .saturating_add(MULTIPART_OVERHEAD_BYTES)
}

pub fn upload_routes(config: &Config, state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/thumbnail_upload/{{video_id}}", API_PREFIX),
            post(handlers::thumbnail_upload::upload_thumbnail)
                .layer(DefaultBodyLimit::max(body_limit_for(config, AssetClass::Thumbnail))),
        )
        .route(
            &format!("{}/video_upload/{{video_id}}", API_PREFIX),
            post(handlers::video_upload::upload_video)
                .layer(DefaultBodyLimit::max(body_limit_for(config, AssetClass::Video))),
        )
        .with_state(state)
}
