//! Bearer-token extractors.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use escrutinio_core::error::CoreError;
use escrutinio_core::roles::Role;
use escrutinio_core::types::DbId;

use crate::auth::jwt::{bearer_token, decode_access_token};
use crate::error::AppError;
use crate::state::AppState;

/// The caller, taken from the `Authorization: Bearer` access token.
///
/// Rejects with 401 when the header is missing, malformed or the token does
/// not verify.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: Role,
}

/// Like [`AuthUser`], but a request without an `Authorization` header yields
/// `None`. A header that is present still has to verify.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}

/// `Ok(None)` when no header was sent.
fn caller_from_parts(parts: &Parts, state: &AppState) -> Result<Option<AuthUser>, AppError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let token = value
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or_else(|| unauthorized("Expected 'Authorization: Bearer <token>'"))?;

    let claims = decode_access_token(token, &state.config.jwt)
        .map_err(|_| unauthorized("Invalid or expired token"))?;

    Ok(Some(AuthUser {
        user_id: claims.sub,
        role: claims.role,
    }))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        caller_from_parts(parts, state)?.ok_or_else(|| unauthorized("Missing Authorization header"))
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        caller_from_parts(parts, state).map(MaybeAuthUser)
    }
}
