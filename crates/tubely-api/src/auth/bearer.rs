use axum::http::{header::AUTHORIZATION, HeaderMap};
use tubely_core::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthenticated("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthenticated("Invalid authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::Unauthenticated("Invalid authorization header format".to_string())
        })?;

    Ok(token)
}
