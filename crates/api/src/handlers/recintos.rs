//! Handlers for polling venues: the upload page's venue picker and a
//! venue's table list.

use axum::extract::{Path, Query, State};
use axum::Json;
use escrutinio_core::error::CoreError;
use escrutinio_core::navigator::{venue_tables, TableEntry, TableRecord};
use escrutinio_core::text::{fold, folded_contains};
use escrutinio_core::types::DbId;
use escrutinio_db::models::mesa::MesaOpcion;
use escrutinio_db::models::recinto::{Recinto, RecintoConDistrito};
use escrutinio_db::repositories::{MesaRepo, RecintoRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::TextFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/// A picker option.
#[derive(Debug, Serialize)]
pub struct RecintoOpcion {
    #[serde(flatten)]
    pub recinto: RecintoConDistrito,
    /// `"{venue} — {district}"`.
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct RecintoMesas {
    pub recinto: Recinto,
    pub mesas: Vec<TableEntry>,
}

/// GET /api/v1/recintos?q=
///
/// Venues whose label contains `q`, ignoring case and accents.
pub async fn list_recintos(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<TextFilter>,
) -> AppResult<Json<DataResponse<Vec<RecintoOpcion>>>> {
    let term = fold(filter.q.trim());
    let data = RecintoRepo::list_with_distrito(&state.pool)
        .await?
        .into_iter()
        .map(|recinto| RecintoOpcion {
            label: recinto.label(),
            recinto,
        })
        .filter(|o| term.is_empty() || folded_contains(&o.label, &term))
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/recintos/{id}/mesas
///
/// Priority tables first, then by number.
pub async fn recinto_mesas(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(recinto_id): Path<DbId>,
) -> AppResult<Json<DataResponse<RecintoMesas>>> {
    let recinto = load_recinto(&state, recinto_id).await?;
    let tables: Vec<TableRecord> = MesaRepo::list_navegacion_by_recinto(&state.pool, recinto_id)
        .await?
        .into_iter()
        .map(TableRecord::from)
        .collect();

    Ok(Json(DataResponse {
        data: RecintoMesas {
            mesas: venue_tables(&tables, recinto_id),
            recinto,
        },
    }))
}

/// GET /api/v1/recintos/{id}/mesas/opciones
///
/// The upload page's table picker, by number.
pub async fn recinto_mesa_opciones(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(recinto_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MesaOpcion>>>> {
    load_recinto(&state, recinto_id).await?;
    let data = MesaRepo::list_opciones_by_recinto(&state.pool, recinto_id).await?;
    Ok(Json(DataResponse { data }))
}

async fn load_recinto(state: &AppState, recinto_id: DbId) -> AppResult<Recinto> {
    RecintoRepo::find_by_id(&state.pool, recinto_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recinto",
            id: recinto_id,
        }))
}
