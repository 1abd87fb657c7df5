//! Content validation for uploads
//!
//! The check is advisory: it trusts the media type the client declared on the file part
//! and does not sniff the bytes. A spoofed header passes as long as it names an allowed
//! type, so this is a trust boundary rather than a guarantee about file contents.

use crate::models::{AssetClass, MediaKind};
use crate::AppError;

/// Normalize a Content-Type header value by stripping parameters
/// (e.g. "image/PNG; charset=utf-8" -> "image/png").
pub fn normalize_media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Validate the declared media type against the allow-list for an asset class.
pub fn validate_media_type(
    declared_media_type: &str,
    asset_class: AssetClass,
) -> Result<MediaKind, AppError> {
    let normalized = normalize_media_type(declared_media_type);

    let kind = MediaKind::from_mime(&normalized)
        .filter(|kind| asset_class.allowed_media_kinds().contains(kind));

    kind.ok_or_else(|| {
        let allowed: Vec<&str> = asset_class
            .allowed_media_kinds()
            .iter()
            .map(MediaKind::mime_type)
            .collect();
        AppError::UnsupportedMediaType(format!(
            "{} format '{}' not accepted. Allowed types: {}",
            asset_class,
            normalized,
            allowed.join(", ")
        ))
    })
}
