//! Request-scoped services
pub mod ingest;
