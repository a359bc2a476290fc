//! Handlers for the digitization navigator: district overview, table search
//! and a district's table list.

use axum::extract::{Path, Query, State};
use axum::Json;
use escrutinio_core::error::CoreError;
use escrutinio_core::navigator::{
    district_tables, search_tables, select_table, summarize_districts, DistrictRecord,
    DistrictSummary, SearchOutcome, TableEntry, TableRecord,
};
use escrutinio_core::types::DbId;
use escrutinio_db::models::distrito::Distrito;
use escrutinio_db::repositories::{DistritoRepo, MesaRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::TextFilter;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DistritoMesas {
    pub distrito: Distrito,
    pub mesas: Vec<TableEntry>,
}

/// Where the client goes after picking a table.
#[derive(Debug, Serialize)]
pub struct Apertura {
    pub mesa_id: DbId,
    pub ruta: String,
}

/// GET /api/v1/digitacion/distritos
pub async fn distritos(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<DistrictSummary>>>> {
    let districts: Vec<DistrictRecord> = DistritoRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(DistrictRecord::from)
        .collect();
    let tables = navigator_rows(MesaRepo::list_navegacion(&state.pool).await?);

    Ok(Json(DataResponse {
        data: summarize_districts(&districts, &tables),
    }))
}

/// GET /api/v1/digitacion/buscar?q=
pub async fn buscar(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(filter): Query<TextFilter>,
) -> AppResult<Json<DataResponse<SearchOutcome>>> {
    if filter.q.trim().is_empty() {
        return Ok(Json(DataResponse {
            data: SearchOutcome::NoQuery,
        }));
    }
    let tables = navigator_rows(MesaRepo::list_navegacion(&state.pool).await?);
    Ok(Json(DataResponse {
        data: search_tables(&tables, &filter.q),
    }))
}

/// GET /api/v1/digitacion/distritos/{id}/mesas?q=
pub async fn distrito_mesas(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(distrito_id): Path<DbId>,
    Query(filter): Query<TextFilter>,
) -> AppResult<Json<DataResponse<DistritoMesas>>> {
    let distrito = load_distrito(&state, distrito_id).await?;
    let tables =
        navigator_rows(MesaRepo::list_navegacion_by_distrito(&state.pool, distrito_id).await?);

    Ok(Json(DataResponse {
        data: DistritoMesas {
            mesas: district_tables(&tables, distrito_id, &filter.q),
            distrito,
        },
    }))
}

/// GET /api/v1/digitacion/distritos/{id}/mesas/{mesa_id}/abrir
///
/// Registered tables cannot be opened again; that is a 409.
pub async fn abrir(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((distrito_id, mesa_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Apertura>>> {
    let tables =
        navigator_rows(MesaRepo::list_navegacion_by_distrito(&state.pool, distrito_id).await?);
    let entry = district_tables(&tables, distrito_id, "")
        .into_iter()
        .find(|e| e.mesa_id == mesa_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Mesa",
            id: mesa_id,
        }))?;

    let mesa_id = select_table(&entry).ok_or_else(|| {
        AppError::Core(CoreError::AlreadyRegistered {
            numero_mesa: entry.numero_mesa,
        })
    })?;

    Ok(Json(DataResponse {
        data: Apertura {
            mesa_id,
            ruta: format!("/mesa/{mesa_id}"),
        },
    }))
}

async fn load_distrito(state: &AppState, distrito_id: DbId) -> AppResult<Distrito> {
    DistritoRepo::find_by_id(&state.pool, distrito_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Distrito",
            id: distrito_id,
        }))
}

fn navigator_rows<T: Into<TableRecord>>(rows: Vec<T>) -> Vec<TableRecord> {
    rows.into_iter().map(Into::into).collect()
}
