//! Tubely Database Library
//!
//! Persistence for video records. The ingest pipeline only reads a record by ID and
//! writes it back once a new asset location is known.

pub mod db;

pub use db::{MemoryVideoRepository, PgVideoRepository, VideoRepository};
