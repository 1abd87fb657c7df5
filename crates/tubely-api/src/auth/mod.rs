//! Request authentication
//!
//! Upload requests carry `Authorization: Bearer <jwt>`. The token is verified by a
//! [`TokenVerifier`], which yields the requester's user ID.

pub mod bearer;
pub mod jwt;

pub use bearer::bearer_token;
pub use jwt::{JwtClaims, JwtVerifier, TOKEN_ISSUER};

use tubely_core::AppError;
use uuid::Uuid;

/// Verifies a bearer token and returns the identity it was issued to.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Uuid, AppError>;
}
