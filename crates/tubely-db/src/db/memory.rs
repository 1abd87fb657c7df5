use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tubely_core::{AppError, AssetClass, VideoRecord};
use uuid::Uuid;

use super::video::VideoRepository;

/// Process-local record store
///
/// Used when `DATABASE_URL` is not set and by tests. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryVideoRepository {
    videos: Arc<RwLock<HashMap<Uuid, VideoRecord>>>,
}

impl MemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a record.
    pub async fn insert(&self, video: VideoRecord) {
        self.videos.write().await.insert(video.id, video);
    }
}

#[async_trait::async_trait]
impl VideoRepository for MemoryVideoRepository {
    async fn get_video(&self, video_id: Uuid) -> Result<VideoRecord, AppError> {
        self.videos
            .read()
            .await
            .get(&video_id)
            .cloned()
            .ok_or_else(|| AppError::RecordNotFound(format!("Video {} not found", video_id)))
    }

    async fn set_asset_location(
        &self,
        video_id: Uuid,
        asset_class: AssetClass,
        location: &str,
    ) -> Result<VideoRecord, AppError> {
        let mut videos = self.videos.write().await;
        let video = videos
            .get_mut(&video_id)
            .ok_or_else(|| AppError::RecordNotFound(format!("Video {} not found", video_id)))?;
        video.set_location(asset_class, location.to_string());
        Ok(video.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubely_core::AssetClass;

    #[tokio::test]
    async fn get_missing_video_is_not_found() {
        let repo = MemoryVideoRepository::new();
        let result = repo.get_video(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::RecordNotFound(_))));
    }

    #[tokio::test]
    async fn set_location_links_asset() {
        let repo = MemoryVideoRepository::new();
        let video = VideoRecord::new(Uuid::new_v4(), "title", "");
        repo.insert(video.clone()).await;

        let updated = repo
            .set_asset_location(video.id, AssetClass::Video, "s3://bucket/key.mp4")
            .await
            .unwrap();
        assert_eq!(updated.video_url.as_deref(), Some("s3://bucket/key.mp4"));

        let stored = repo.get_video(video.id).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn set_location_keeps_other_asset_class() {
        let repo = MemoryVideoRepository::new();
        let video = VideoRecord::new(Uuid::new_v4(), "title", "");
        repo.insert(video.clone()).await;

        repo.set_asset_location(video.id, AssetClass::Thumbnail, "http://host/assets/a.png")
            .await
            .unwrap();
        let stored = repo
            .set_asset_location(video.id, AssetClass::Video, "s3://bucket/b.mp4")
            .await
            .unwrap();

        assert_eq!(stored.thumbnail_url.as_deref(), Some("http://host/assets/a.png"));
        assert_eq!(stored.video_url.as_deref(), Some("s3://bucket/b.mp4"));
    }

    #[tokio::test]
    async fn set_location_does_not_create_records() {
        let repo = MemoryVideoRepository::new();
        let result = repo
            .set_asset_location(Uuid::new_v4(), AssetClass::Thumbnail, "http://host/assets/a.png")
            .await;
        assert!(matches!(result, Err(AppError::RecordNotFound(_))));
    }
}
