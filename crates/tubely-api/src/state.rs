//! Application state shared by all handlers.

use crate::auth::TokenVerifier;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_storage::AssetStores;

/// Everything an upload request needs, built once at startup and passed explicitly.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// External record store
    pub videos: Arc<dyn VideoRepository>,
    /// Storage backend per asset class
    pub stores: AssetStores,
    /// External token verifier
    pub verifier: Arc<dyn TokenVerifier>,
}
