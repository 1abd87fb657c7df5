//! Test helpers: build AppState and router for integration tests.
//!
//! The app runs over an in-memory record store with both asset classes on the local backend,
//! rooted in temp directories owned by the returned `TestApp`.

#![allow(dead_code)]

pub mod auth;
pub mod fixtures;

use axum_test::TestServer;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::auth::JwtVerifier;
use tubely_api::setup::routes;
use tubely_api::state::AppState;
use tubely_core::{Config, IngestConfig, StorageBackend, VideoRecord};
use tubely_db::{MemoryVideoRepository, VideoRepository};
use tubely_storage::AssetStores;
use uuid::Uuid;

/// Test application: server, record store and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub videos: MemoryVideoRepository,
    pub config: Config,
    pub assets_dir: TempDir,
    pub staging_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Insert a fresh video record owned by `owner`.
    pub async fn create_video(&self, owner: Uuid) -> VideoRecord {
        let video = VideoRecord::new(owner, "Boots", "A video about boots");
        self.videos.insert(video.clone()).await;
        video
    }

    pub async fn get_video(&self, video_id: Uuid) -> VideoRecord {
        self.videos
            .get_video(video_id)
            .await
            .expect("video should exist")
    }

    pub fn assets_path(&self) -> &Path {
        self.assets_dir.path()
    }

    pub fn staging_path(&self) -> &Path {
        self.staging_dir.path()
    }
}

pub fn dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .next()
        .is_none()
}

/// Setup test app with default upload caps.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup test app, letting the caller adjust configuration first.
pub async fn setup_test_app_with(configure: impl FnOnce(&mut IngestConfig)) -> TestApp {
    let assets_dir = tempfile::tempdir().expect("Failed to create assets directory");
    let staging_dir = tempfile::tempdir().expect("Failed to create staging directory");

    let mut ingest_config = IngestConfig::default();
    ingest_config.base.jwt_secret = auth::TEST_JWT_SECRET.to_string();
    ingest_config.assets_root = assets_dir.path().to_path_buf();
    ingest_config.upload_temp_dir = Some(staging_dir.path().to_path_buf());
    ingest_config.thumbnail_backend = StorageBackend::Local;
    ingest_config.video_backend = StorageBackend::Local;
    configure(&mut ingest_config);
    let config = Config::new(ingest_config);

    let videos = MemoryVideoRepository::new();
    let stores = AssetStores::from_config(&config)
        .await
        .expect("Failed to create storage");

    let state = Arc::new(AppState {
        config: config.clone(),
        videos: Arc::new(videos.clone()),
        stores,
        verifier: Arc::new(JwtVerifier::new(config.jwt_secret())),
    });

    let app = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        videos,
        config,
        assets_dir,
        staging_dir,
    }
}
