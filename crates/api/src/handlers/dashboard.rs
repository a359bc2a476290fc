//! Handlers for the results dashboards.
//!
//! All figures come from the `estadistica_*` procedures; only display sums
//! and chart sizing happen here.

use axum::extract::{Query, State};
use axum::Json;
use escrutinio_core::dashboard::{
    distribution_chart, party_chart, AggregateRow, BarChart, DashboardView, Progress,
};
use escrutinio_core::error::CoreError;
use escrutinio_core::types::DbId;
use escrutinio_db::models::estadistica::VotosPartidoRow;
use escrutinio_db::repositories::{DistritoRepo, EstadisticaRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::DistritoScope;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PartidosDashboard {
    pub grafico: BarChart,
    pub partidos: Vec<VotosPartidoRow>,
}

#[derive(Debug, Serialize)]
pub struct AvanceDashboard {
    pub vista: DashboardView,
    pub progreso: Progress,
    pub votos_validos: i64,
    pub votos_nulos: i64,
    pub votos_blancos: i64,
}

/// GET /api/v1/dashboard/distribucion?distrito_id=
///
/// Voter roll by district, or by venue within one district.
pub async fn distribucion(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(scope): Query<DistritoScope>,
) -> AppResult<Json<DataResponse<BarChart>>> {
    let view = DashboardView::from_query(scope.distrito_id);

    let districts: Vec<AggregateRow> = EstadisticaRepo::distritos(&state.pool)
        .await?
        .into_iter()
        .map(AggregateRow::from)
        .collect();

    let rows = match view {
        DashboardView::Districts => districts.clone(),
        DashboardView::District { distrito_id } => {
            if !districts.iter().any(|d| d.id == distrito_id) {
                return Err(distrito_not_found(distrito_id));
            }
            EstadisticaRepo::recintos(&state.pool, distrito_id)
                .await?
                .into_iter()
                .map(AggregateRow::from)
                .collect()
        }
    };

    Ok(Json(DataResponse {
        data: distribution_chart(view, &districts, &rows),
    }))
}

/// GET /api/v1/dashboard/partidos?distrito_id=
pub async fn partidos(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(scope): Query<DistritoScope>,
) -> AppResult<Json<DataResponse<PartidosDashboard>>> {
    let view = DashboardView::from_query(scope.distrito_id);
    let distrito = match view.distrito_id() {
        Some(id) => Some(
            DistritoRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or_else(|| distrito_not_found(id))?,
        ),
        None => None,
    };

    let partidos = EstadisticaRepo::partidos(&state.pool, view.distrito_id()).await?;
    let rows: Vec<AggregateRow> = partidos.iter().map(AggregateRow::from).collect();

    Ok(Json(DataResponse {
        data: PartidosDashboard {
            grafico: party_chart(view, distrito.as_ref().map(|d| d.nombre.as_str()), &rows),
            partidos,
        },
    }))
}

/// GET /api/v1/dashboard/avance?distrito_id=
pub async fn avance(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(scope): Query<DistritoScope>,
) -> AppResult<Json<DataResponse<AvanceDashboard>>> {
    let view = DashboardView::from_query(scope.distrito_id);
    if let Some(id) = view.distrito_id() {
        DistritoRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| distrito_not_found(id))?;
    }

    let row = EstadisticaRepo::avance(&state.pool, view.distrito_id()).await?;

    Ok(Json(DataResponse {
        data: AvanceDashboard {
            vista: view,
            progreso: Progress::new(row.mesas_total, row.mesas_computadas, row.porcentaje),
            votos_validos: row.votos_validos,
            votos_nulos: row.votos_nulos,
            votos_blancos: row.votos_blancos,
        },
    }))
}

fn distrito_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Distrito",
        id,
    })
}
