//! Session tokens.
//!
//! A signed-in user holds a short-lived HS256 access token carrying
//! [`Claims`] and an opaque single-use refresh token. Only the SHA-256 digest
//! of a refresh token is ever stored.

use chrono::{Duration, Utc};
use escrutinio_core::roles::Role;
use escrutinio_core::types::{DbId, Timestamp};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 secret. Also keys local blob URL signatures.
    pub secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl JwtConfig {
    /// | Env Var                    | Default |
    /// |----------------------------|---------|
    /// | `JWT_SECRET`               | required |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | `7`     |
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is missing or empty, or a lifetime is not a
    /// positive integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .expect("JWT_SECRET must be set and non-empty");

        Self {
            secret,
            access_ttl: Duration::minutes(positive_env("JWT_ACCESS_EXPIRY_MINS", 15)),
            refresh_ttl: Duration::days(positive_env("JWT_REFRESH_EXPIRY_DAYS", 7)),
        }
    }
}

fn positive_env(name: &str, default: i64) -> i64 {
    let value = std::env::var(name).map_or(Ok(default), |v| v.parse::<i64>());
    match value {
        Ok(v) if v > 0 => v,
        _ => panic!("{name} must be a positive integer"),
    }
}

/// A signed access token and its lifetime in seconds.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: i64,
}

pub fn issue_access_token(
    user_id: DbId,
    role: Role,
    config: &JwtConfig,
) -> Result<AccessToken, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let expires_in = config.access_ttl.num_seconds();
    let claims = Claims {
        sub: user_id,
        role,
        iat: now,
        exp: now + expires_in,
        jti: Uuid::new_v4(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok(AccessToken { token, expires_in })
}

/// Verify signature, algorithm and expiry.
pub fn decode_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

/// The token in an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// A new refresh token. `plaintext` goes to the client, `digest` to the
/// database.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub plaintext: String,
    pub digest: String,
    pub expires_at: Timestamp,
}

impl RefreshToken {
    pub fn issue(config: &JwtConfig) -> Self {
        let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        Self {
            digest: Self::digest_of(&plaintext),
            plaintext,
            expires_at: Utc::now() + config.refresh_ttl,
        }
    }

    pub fn digest_of(plaintext: &str) -> String {
        format!("{:x}", Sha256::digest(plaintext.as_bytes()))
    }
}
