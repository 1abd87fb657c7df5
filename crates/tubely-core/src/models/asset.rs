use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::StorageBackend;

/// Category of uploaded media. Governs validation rules, buffering and backend choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Thumbnail,
    Video,
}

/// How an incoming upload stream is staged before it is handed to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferPolicy {
    /// Accumulate in memory up to a hard cap
    Memory,
    /// Copy to a private temporary file on local disk
    TempFile,
}

impl AssetClass {
    /// Multipart field name carrying the file part for this class.
    pub fn form_field(&self) -> &'static str {
        match self {
            AssetClass::Thumbnail => "thumbnail",
            AssetClass::Video => "video",
        }
    }

    pub fn allowed_media_kinds(&self) -> &'static [MediaKind] {
        match self {
            AssetClass::Thumbnail => &[MediaKind::Jpeg, MediaKind::Png],
            AssetClass::Video => &[MediaKind::Mp4],
        }
    }

    pub fn buffer_policy(&self) -> BufferPolicy {
        match self {
            AssetClass::Thumbnail => BufferPolicy::Memory,
            AssetClass::Video => BufferPolicy::TempFile,
        }
    }
}

impl Display for AssetClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.form_field())
    }
}

/// A media type that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Jpeg,
    Png,
    Mp4,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [MediaKind::Jpeg, MediaKind::Png, MediaKind::Mp4];

    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaKind::Jpeg => "image/jpeg",
            MediaKind::Png => "image/png",
            MediaKind::Mp4 => "video/mp4",
        }
    }

    /// File extension for stored keys: the subtype of the canonical media type.
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Jpeg => "jpeg",
            MediaKind::Png => "png",
            MediaKind::Mp4 => "mp4",
        }
    }

    /// Look up a canonical (already normalized) media type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.mime_type() == mime)
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.mime_type())
    }
}

/// Opaque identifier of a stored asset within a backend namespace.
///
/// Keys are produced by the storage crate's key generator from random bytes and are
/// never derived from client input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An asset that has been durably written. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAsset {
    pub key: StorageKey,
    pub backend: StorageBackend,
    pub location: String,
    pub byte_size: u64,
}
