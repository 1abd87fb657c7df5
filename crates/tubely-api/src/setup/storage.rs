//! Storage setup and initialization

use anyhow::{Context, Result};
use tubely_core::{AssetClass, Config};
use tubely_storage::AssetStores;

/// Build the storage backend for each asset class.
pub async fn setup_storage(config: &Config) -> Result<AssetStores> {
    tracing::info!("Initializing storage backends...");
    let stores = AssetStores::from_config(config)
        .await
        .context("Failed to initialize storage")?;

    for asset_class in [AssetClass::Thumbnail, AssetClass::Video] {
        tracing::info!(
            asset_class = %asset_class,
            backend = %stores.for_class(asset_class).backend_type(),
            max_upload_bytes = config.max_upload_size_for(asset_class),
            "Storage backend ready"
        );
    }

    Ok(stores)
}
