//! Handlers for vote entry on a single polling table.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use escrutinio_core::ballot::{BallotLayout, BallotParty, EntryView};
use escrutinio_core::error::CoreError;
use escrutinio_core::tally::{can_submit, SubmissionPlan, TallyTotals, VoteForm, VoteTally};
use escrutinio_core::types::DbId;
use escrutinio_db::models::mesa::MesaDetalle;
use escrutinio_db::models::resultado::ResultadoMesaTotales;
use escrutinio_db::repositories::{MesaRepo, PartidoRepo, ResultadoRepo, SubmitOutcome};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireOperador;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Everything the vote entry form renders.
#[derive(Debug, Serialize)]
pub struct Formulario {
    pub mesa: MesaDetalle,
    pub registrada: bool,
    pub layout: BallotLayout,
}

/// Live figures for the form's summary panel.
#[derive(Debug, Serialize)]
pub struct Verificacion {
    pub totales: TallyTotals,
    pub puede_enviar: bool,
}

#[derive(Debug, Serialize)]
pub struct Registro {
    pub vista: EntryView,
    /// Table list the saved view links back to.
    pub volver_a: Option<String>,
    pub totales: ResultadoMesaTotales,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/mesas/{id}/formulario
pub async fn formulario(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(mesa_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Formulario>>> {
    let mesa = load_mesa(&state, mesa_id).await?;
    let parties = active_parties(&state).await?;

    Ok(Json(DataResponse {
        data: Formulario {
            registrada: mesa.registrada(),
            layout: BallotLayout::from_parties(&parties),
            mesa,
        },
    }))
}

/// POST /api/v1/mesas/{id}/resultados/verificar
///
/// Derive the totals for the posted form without writing anything.
pub async fn verificar(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(mesa_id): Path<DbId>,
    Json(form): Json<VoteForm>,
) -> AppResult<Json<DataResponse<Verificacion>>> {
    let meta = load_mesa(&state, mesa_id).await?.meta();
    let tally = VoteTally::from_form(&form)?;

    Ok(Json(DataResponse {
        data: Verificacion {
            totales: tally.totals(meta.habilitados),
            puede_enviar: !meta.registrada && can_submit(Some(&meta), &tally),
        },
    }))
}

/// POST /api/v1/mesas/{id}/resultados
///
/// Commit the results, the totals row and the status flip in one
/// transaction. A table that is no longer pending is a 409.
pub async fn registrar(
    State(state): State<AppState>,
    RequireOperador(user): RequireOperador,
    Path(mesa_id): Path<DbId>,
    Json(form): Json<VoteForm>,
) -> AppResult<(StatusCode, Json<DataResponse<Registro>>)> {
    let mesa = load_mesa(&state, mesa_id).await?;
    let tally = VoteTally::from_form(&form)?;
    let parties = active_parties(&state).await?;

    let plan = SubmissionPlan::build(&mesa.meta(), &parties, &tally, user.user_id)?;

    let totales = match ResultadoRepo::submit(&state.pool, &plan).await? {
        SubmitOutcome::Registered(totales) => totales,
        SubmitOutcome::NotPending => {
            tracing::warn!(mesa_id, user_id = user.user_id, "Submission for a table that is not pending");
            return Err(AppError::Core(CoreError::AlreadyRegistered {
                numero_mesa: mesa.numero_mesa,
            }));
        }
    };

    tracing::info!(
        mesa_id,
        user_id = user.user_id,
        votos_validos = totales.votos_validos,
        "Mesa results registered",
    );

    let vista = EntryView::Editing.saved(mesa.distrito_id);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: Registro {
                volver_a: vista.return_route(),
                vista,
                totales,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_mesa(state: &AppState, mesa_id: DbId) -> AppResult<MesaDetalle> {
    MesaRepo::find_detalle(&state.pool, mesa_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Mesa",
            id: mesa_id,
        }))
}

async fn active_parties(state: &AppState) -> AppResult<Vec<BallotParty>> {
    let partidos = PartidoRepo::list_active(&state.pool).await?;
    Ok(partidos.iter().map(BallotParty::from).collect())
}
