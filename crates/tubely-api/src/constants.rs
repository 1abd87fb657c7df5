//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Path under which locally stored assets are served
pub const ASSETS_PATH: &str = "/assets";

/// Headroom added to the per-route body limit for multipart framing (boundaries, part headers,
/// other small form fields) on top of the asset cap itself.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
