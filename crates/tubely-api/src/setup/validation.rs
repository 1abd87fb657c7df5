//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use tubely_core::{AssetClass, Config, StorageBackend};

/// Validate critical configuration values
///
/// Runs the config's own checks, then warns about settings that work but are likely
/// unintended.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.database_url().is_none() {
        tracing::warn!(
            "DATABASE_URL not set in production - video records are kept in memory and lost on restart"
        );
    }

    if config.is_production() && config.jwt_secret().len() < 32 {
        tracing::warn!("JWT_SECRET is shorter than 32 characters");
    }

    let uses_s3 = [AssetClass::Thumbnail, AssetClass::Video]
        .into_iter()
        .any(|asset_class| config.storage_backend_for(asset_class) == StorageBackend::S3);
    if config.is_production()
        && uses_s3
        && config.s3_endpoint().is_some_and(|e| e.starts_with("http://"))
    {
        tracing::warn!("S3_ENDPOINT uses plain HTTP in production");
    }

    Ok(())
}
