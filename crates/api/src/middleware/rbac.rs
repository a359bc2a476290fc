//! Role-gated extractors. Each wraps [`AuthUser`] and rejects with 403 when
//! the caller's role is not allowed.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use escrutinio_core::error::CoreError;
use escrutinio_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

macro_rules! role_gate {
    ($(#[$meta:meta])* $name:ident, $allows:expr, $message:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, AppError> {
                let user = AuthUser::from_request_parts(parts, state).await?;
                let allows: fn(Role) -> bool = $allows;
                if !allows(user.role) {
                    return Err(AppError::Core(CoreError::Forbidden($message.into())));
                }
                Ok($name(user))
            }
        }
    };
}

role_gate!(
    /// User administration.
    RequireAdmin,
    Role::is_admin,
    "Admin role required"
);

role_gate!(
    /// Vote transcription: `operador` or `admin`.
    RequireOperador,
    Role::can_digitize,
    "Operador or Admin role required"
);
