//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::auth::JwtVerifier;
use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first so validation failures are logged
    crate::telemetry::init_telemetry(config.is_production());

    // Validate configuration - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    // Setup record store
    let videos = database::setup_video_repository(&config).await?;

    // Setup storage
    let stores = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState {
        verifier: Arc::new(JwtVerifier::new(config.jwt_secret())),
        config,
        videos,
        stores,
    });

    // Setup routes
    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
