//! Rows returned by the `estadistica_*` aggregation procedures.

use escrutinio_core::dashboard::AggregateRow;
use escrutinio_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// Voter roll of one district or venue and its share of the whole.
#[derive(Debug, Clone, FromRow)]
pub struct DistribucionRow {
    pub id: DbId,
    pub nombre: String,
    pub total_habilitados: i64,
    pub porcentaje: f64,
}

impl From<DistribucionRow> for AggregateRow {
    fn from(r: DistribucionRow) -> Self {
        Self {
            id: r.id,
            nombre: r.nombre,
            porcentaje: r.porcentaje,
            total: r.total_habilitados,
        }
    }
}

/// Votes of one party and its share of valid votes.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct VotosPartidoRow {
    pub id: DbId,
    pub codigo: String,
    pub nombre: String,
    pub orden: i32,
    pub votos: i64,
    pub porcentaje: f64,
}

impl From<&VotosPartidoRow> for AggregateRow {
    fn from(r: &VotosPartidoRow) -> Self {
        Self {
            id: r.id,
            nombre: r.codigo.clone(),
            porcentaje: r.porcentaje,
            total: r.votos,
        }
    }
}

/// Counting progress and vote totals.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct AvanceRow {
    pub mesas_total: i64,
    pub mesas_computadas: i64,
    pub porcentaje: f64,
    pub votos_validos: i64,
    pub votos_nulos: i64,
    pub votos_blancos: i64,
}
