use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::asset::AssetClass;

/// Video metadata record owned by the record store.
///
/// The ingest pipeline only ever touches the two location fields, and only after
/// the corresponding asset has been fully written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VideoRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoRecord {
    pub fn new(user_id: Uuid, title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description: description.into(),
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Location currently linked for the given asset class.
    pub fn location(&self, asset_class: AssetClass) -> Option<&str> {
        match asset_class {
            AssetClass::Thumbnail => self.thumbnail_url.as_deref(),
            AssetClass::Video => self.video_url.as_deref(),
        }
    }

    pub fn set_location(&mut self, asset_class: AssetClass, location: String) {
        match asset_class {
            AssetClass::Thumbnail => self.thumbnail_url = Some(location),
            AssetClass::Video => self.video_url = Some(location),
        }
        self.updated_at = Utc::now();
    }
}
