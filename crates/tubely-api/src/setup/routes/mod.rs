//! Route configuration and setup.
//!
//! Upload routes live in [uploads](uploads); health and API docs in [health](health).

mod health;
mod uploads;

use crate::constants::ASSETS_PATH;
use crate::state::AppState;
use axum::Router;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::Config;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let http_concurrency_limit = config.http_concurrency_limit().max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    // Files written by the local backend are served read-only under /assets.
    let assets = ServeDir::new(config.assets_root());

    let app = uploads::upload_routes(config, state.clone())
        .merge(health::health_routes(state.clone()))
        .nest_service(ASSETS_PATH, assets)
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
