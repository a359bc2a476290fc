//! Handlers for the `/admin` resource (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use escrutinio_core::roles::Role;
use escrutinio_core::types::DbId;
use escrutinio_db::models::user::{CreateUser, UserResponse};
use escrutinio_db::repositories::{RoleRepo, UserRepo};
use escrutinio_db::DbPool;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{check_new_password, hash_password};
use crate::config::DevLogin;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub display_name: String,
    pub password: String,
    /// Role name: `admin`, `operador`, `voluntario` or `observador`.
    pub role: String,
}

/// POST /api/v1/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.validate()?;
    check_new_password(&input.password)?;

    let role: Role = input.role.parse()?;
    let role_id = RoleRepo::id_of(&state.pool, role).await?;

    let password_hash = hash_password(&input.password)?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email.trim().to_lowercase(),
            display_name: input.display_name,
            password_hash,
            role_id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, %role, created_by = admin.user_id, "User created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::new(&user, role),
        }),
    ))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let roles: HashMap<DbId, Role> = RoleRepo::all(&state.pool).await?.into_iter().collect();

    let data = users
        .iter()
        .map(|u| {
            roles
                .get(&u.role_id)
                .map(|role| UserResponse::new(u, *role))
                .ok_or_else(|| AppError::InternalError(format!("User {} has no known role", u.id)))
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(DataResponse { data }))
}

/// Create the configured first administrator unless that email already
/// has an account.
pub async fn ensure_bootstrap_admin(pool: &DbPool, login: &DevLogin) -> AppResult<()> {
    if UserRepo::find_by_email(pool, &login.email).await?.is_some() {
        return Ok(());
    }
    check_new_password(&login.password)?;

    let role_id = RoleRepo::id_of(pool, Role::Admin).await?;
    let password_hash = hash_password(&login.password)?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: login.email.trim().to_lowercase(),
            display_name: "Administrador".to_string(),
            password_hash,
            role_id,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "Bootstrap administrator created");
    Ok(())
}
