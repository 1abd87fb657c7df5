use jsonwebtoken::{encode, EncodingKey, Header};
use tubely_api::auth::{JwtClaims, TOKEN_ISSUER};
use uuid::Uuid;

/// Signing secret configured in `setup_test_app`.
pub const TEST_JWT_SECRET: &str = "test-secret-key-min-32-characters-long";

/// Mint an access token for `user_id` valid for one hour.
pub fn make_token(user_id: Uuid) -> String {
    make_token_with(TEST_JWT_SECRET, user_id, 3600)
}

pub fn make_token_with(secret: &str, user_id: Uuid, expires_in_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = JwtClaims {
        iss: TOKEN_ISSUER.to_string(),
        sub: user_id.to_string(),
        exp: now + expires_in_secs,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign token")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
