//! Handler for the active party catalog.

use axum::extract::State;
use axum::Json;
use escrutinio_db::models::partido::Partido;
use escrutinio_db::repositories::PartidoRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/partidos
///
/// Active parties in ballot order.
pub async fn list_partidos(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Partido>>>> {
    let data = PartidoRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}
