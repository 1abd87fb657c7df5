//! Health check and API description routes.

use crate::api_doc::get_openapi_spec;
use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use std::sync::Arc;

pub fn health_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/healthz", API_PREFIX),
            get(handlers::health::healthz),
        )
        .route(
            &format!("{}/openapi.json", API_PREFIX),
            get(|| async { Json(get_openapi_spec()) }),
        )
        .with_state(state)
}
