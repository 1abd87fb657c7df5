pub mod asset;
pub mod video;

pub use asset::{AssetClass, BufferPolicy, MediaKind, StorageKey, StoredAsset};
pub use video::VideoRecord;
