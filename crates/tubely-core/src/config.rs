//! Configuration module
//!
//! Configuration is read once from the environment and passed by reference into the
//! components that need it. Nothing here is global.

use std::env;
use std::path::PathBuf;

use crate::models::AssetClass;
use crate::storage_types::{S3LocationStyle, StorageBackend};

// Common constants
const SERVER_PORT: u16 = 8091;
const PLATFORM_HOST: &str = "localhost";
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const MAX_THUMBNAIL_SIZE_MB: usize = 10;
const MAX_VIDEO_SIZE_MB: usize = 1024;
const ASSETS_ROOT: &str = "./assets";

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    /// Host used when building public asset URLs
    pub platform_host: String,
    pub environment: String,
    pub jwt_secret: String,
    pub http_concurrency_limit: usize,
}

/// Ingest pipeline configuration
#[derive(Clone, Debug)]
pub struct IngestConfig {
    pub base: BaseConfig,
    /// Postgres URL for the video record store. In-memory store when unset.
    pub database_url: Option<String>,
    // Storage configuration
    pub assets_root: PathBuf,
    pub upload_temp_dir: Option<PathBuf>,
    pub thumbnail_backend: StorageBackend,
    pub video_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub s3_location_style: S3LocationStyle,
    // Upload limits
    pub max_thumbnail_size_bytes: usize,
    pub max_video_size_bytes: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig {
                server_port: SERVER_PORT,
                platform_host: PLATFORM_HOST.to_string(),
                environment: "development".to_string(),
                jwt_secret: String::new(),
                http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            },
            database_url: None,
            assets_root: PathBuf::from(ASSETS_ROOT),
            upload_temp_dir: None,
            thumbnail_backend: StorageBackend::Local,
            video_backend: StorageBackend::S3,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
            s3_location_style: S3LocationStyle::default(),
            max_thumbnail_size_bytes: MAX_THUMBNAIL_SIZE_MB << 20,
            max_video_size_bytes: MAX_VIDEO_SIZE_MB << 20,
        }
    }
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = IngestConfig::default();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| defaults.base.environment.clone());

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            platform_host: env::var("PLATFORM_HOST")
                .unwrap_or_else(|_| PLATFORM_HOST.to_string()),
            environment,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
        };

        let thumbnail_backend = match env::var("THUMBNAIL_STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.thumbnail_backend,
        };
        let video_backend = match env::var("VIDEO_STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.video_backend,
        };
        let s3_location_style = match env::var("S3_LOCATION_STYLE") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.s3_location_style,
        };

        let max_thumbnail_size_bytes = size_limit_bytes(
            "MAX_THUMBNAIL_SIZE_MB",
            env::var("MAX_THUMBNAIL_SIZE_MB").ok().as_deref(),
            MAX_THUMBNAIL_SIZE_MB,
        )?;
        let max_video_size_bytes = size_limit_bytes(
            "MAX_VIDEO_SIZE_MB",
            env::var("MAX_VIDEO_SIZE_MB").ok().as_deref(),
            MAX_VIDEO_SIZE_MB,
        )?;

        Ok(IngestConfig {
            base,
            database_url: env::var("DATABASE_URL").ok(),
            assets_root: env::var("ASSETS_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_root),
            upload_temp_dir: env::var("UPLOAD_TEMP_DIR").ok().map(PathBuf::from),
            thumbnail_backend,
            video_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            s3_location_style,
            max_thumbnail_size_bytes,
            max_video_size_bytes,
        })
    }

    fn uses_backend(&self, backend: StorageBackend) -> bool {
        self.thumbnail_backend == backend || self.video_backend == backend
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.is_empty() {
            return Err(anyhow::anyhow!(
                "JWT secret cannot be empty - set JWT_SECRET environment variable"
            ));
        }
        if self.max_thumbnail_size_bytes == 0 {
            return Err(anyhow::anyhow!("Max thumbnail size cannot be 0"));
        }
        if self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("Max video size cannot be 0"));
        }
        if self.uses_backend(StorageBackend::S3) {
            if self.s3_bucket.is_none() {
                return Err(anyhow::anyhow!(
                    "S3_BUCKET must be set when an asset class uses the s3 backend"
                ));
            }
            if self.s3_region.is_none() && self.aws_region.is_none() {
                return Err(anyhow::anyhow!(
                    "S3_REGION or AWS_REGION must be set when an asset class uses the s3 backend"
                ));
            }
        }
        Ok(())
    }
}

/// Convert a size cap given in megabytes to bytes. Unparseable or overflowing values are errors.
fn size_limit_bytes(
    name: &str,
    value: Option<&str>,
    default_mb: usize,
) -> Result<usize, anyhow::Error> {
    let mb = match value {
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", name))?,
        None => default_mb,
    };
    mb.checked_mul(1 << 20)
        .ok_or_else(|| anyhow::anyhow!("{} is too large", name))
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<IngestConfig>);

impl Config {
    pub fn new(config: IngestConfig) -> Self {
        Config(Box::new(config))
    }

    fn as_ingest(&self) -> &IngestConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(Config::new(IngestConfig::from_env()?))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_ingest().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment().to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.as_ingest().base.server_port
    }

    pub fn platform_host(&self) -> &str {
        &self.as_ingest().base.platform_host
    }

    pub fn environment(&self) -> &str {
        &self.as_ingest().base.environment
    }

    pub fn jwt_secret(&self) -> &str {
        &self.as_ingest().base.jwt_secret
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_ingest().base.http_concurrency_limit
    }

    pub fn database_url(&self) -> Option<&str> {
        self.as_ingest().database_url.as_deref()
    }

    pub fn assets_root(&self) -> &PathBuf {
        &self.as_ingest().assets_root
    }

    /// Base URL under which the local backend's assets are served.
    pub fn local_assets_base_url(&self) -> String {
        format!(
            "http://{}:{}/assets",
            self.platform_host(),
            self.server_port()
        )
    }

    pub fn upload_temp_dir(&self) -> Option<&PathBuf> {
        self.as_ingest().upload_temp_dir.as_ref()
    }

    pub fn storage_backend_for(&self, asset_class: AssetClass) -> StorageBackend {
        match asset_class {
            AssetClass::Thumbnail => self.as_ingest().thumbnail_backend,
            AssetClass::Video => self.as_ingest().video_backend,
        }
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_ingest().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_ingest().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_ingest().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.as_ingest().aws_region.as_deref()
    }

    pub fn s3_location_style(&self) -> S3LocationStyle {
        self.as_ingest().s3_location_style
    }

    pub fn max_upload_size_for(&self, asset_class: AssetClass) -> usize {
        match asset_class {
            AssetClass::Thumbnail => self.as_ingest().max_thumbnail_size_bytes,
            AssetClass::Video => self.as_ingest().max_video_size_bytes,
        }
    }
}
