//! Handlers for the `/auth` resource (login, refresh, logout, session).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use escrutinio_core::error::CoreError;
use escrutinio_db::models::user::{User, UserResponse};
use escrutinio_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{issue_access_token, RefreshToken};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// Consecutive failed logins before the account is locked.
const MAX_FAILED_ATTEMPTS: i32 = 5;

const LOCK_DURATION_MINS: i64 = 15;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Tokens plus the signed-in user, returned by login, refresh and a
/// development sign-in.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Response of `POST /auth/session`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SessionResponse {
    /// The bearer token was valid; no new tokens are issued.
    Existing { user: UserResponse },
    /// No session was sent and the development account signed in.
    SignedIn(AuthResponse),
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    input.validate()?;
    let user = authenticate(&state, &input.email, &input.password).await?;
    Ok(Json(create_auth_response(&state, &user).await?))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new pair. Each refresh token works once.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let digest = RefreshToken::digest_of(&input.refresh_token);
    let session = SessionRepo::consume(&state.pool, &digest)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    ensure_active(&user)?;

    Ok(Json(create_auth_response(&state, &user).await?))
}

/// POST /api/v1/auth/logout
///
/// Close every session of the caller. Access tokens already issued stay
/// valid until they expire.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let closed = SessionRepo::close_all(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, closed, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    let role = RoleRepo::role_of(&state.pool, user.role_id).await?;
    Ok(Json(UserResponse::new(&user, role)))
}

/// POST /api/v1/auth/session
///
/// Resolve the current session. With a valid bearer token the caller is
/// returned as is. Without one, the development account is signed in when
/// `DEV_AUTO_LOGIN` is enabled; otherwise the request is unauthorized.
pub async fn session(
    State(state): State<AppState>,
    MaybeAuthUser(auth_user): MaybeAuthUser,
) -> AppResult<Json<SessionResponse>> {
    if let Some(auth_user) = auth_user {
        let Json(user) = me(State(state), auth_user).await?;
        return Ok(Json(SessionResponse::Existing { user }));
    }

    let Some(dev) = state.config.dev_login.clone() else {
        return Err(AppError::Core(CoreError::Unauthorized(
            "No active session".into(),
        )));
    };

    let user = authenticate(&state, &dev.email, &dev.password).await?;
    tracing::warn!(user_id = user.id, "Development auto-login used");
    Ok(Json(SessionResponse::SignedIn(
        create_auth_response(&state, &user).await?,
    )))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Check credentials, applying the failed-attempt lockout.
async fn authenticate(state: &AppState, email: &str, password: &str) -> AppResult<User> {
    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    ensure_active(&user)?;

    if user.locked_until.is_some_and(|until| until > Utc::now()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is temporarily locked. Try again later.".into(),
        )));
    }

    let password_valid = verify_password(password, &user.password_hash)?;

    if !password_valid {
        let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
        let updated =
            UserRepo::record_failed_login(&state.pool, user.id, MAX_FAILED_ATTEMPTS, lock_until)
                .await?;
        if updated.failed_login_count == MAX_FAILED_ATTEMPTS {
            tracing::warn!(user_id = user.id, "Account locked after repeated failed logins");
        }
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    Ok(user)
}

fn ensure_active(user: &User) -> AppResult<()> {
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }
    Ok(())
}

/// Issue a token pair, persist the session and build the response.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let role = RoleRepo::role_of(&state.pool, user.role_id).await?;

    let access = issue_access_token(user.id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh = RefreshToken::issue(&state.config.jwt);
    SessionRepo::open(&state.pool, user.id, &refresh.digest, refresh.expires_at).await?;

    Ok(AuthResponse {
        access_token: access.token,
        refresh_token: refresh.plaintext,
        expires_in: access.expires_in,
        user: UserResponse::new(user, role),
    })
}
