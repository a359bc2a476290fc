//! Handler for the application shell's navigation entries.

use axum::Json;
use escrutinio_core::navigation::{shell, Shell};

use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

/// GET /api/v1/navegacion
pub async fn get_shell(_user: AuthUser) -> Json<DataResponse<Shell>> {
    Json(DataResponse { data: shell() })
}
