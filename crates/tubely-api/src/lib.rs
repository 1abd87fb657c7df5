//! Tubely API Library
//!
//! This crate provides the HTTP upload handlers, the ingest pipeline and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::ingest::{AuthorizedUpload, IngestService, StreamBuffer};
pub use state::AppState;
