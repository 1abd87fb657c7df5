//! Asset ingest pipeline
//!
//! [`IngestService`] runs one upload end to end. [`StreamBuffer`] receives the body before
//! it is handed to a storage backend.

mod buffer;
mod orchestrator;

pub use buffer::StreamBuffer;
pub use orchestrator::{AuthorizedUpload, IngestService};
