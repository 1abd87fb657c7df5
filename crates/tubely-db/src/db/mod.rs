//! Video record repositories
//
// Trait and PostgreSQL implementation
pub mod video;
//
// In-memory implementation used when no database is configured
pub mod memory;

pub use memory::MemoryVideoRepository;
pub use video::{PgVideoRepository, VideoRepository};
