//! Party model.

use escrutinio_core::ballot::BallotParty;
use escrutinio_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;
use ts_rs::TS;

/// A row from the `partidos` table.
#[derive(Debug, Clone, FromRow, Serialize, TS)]
#[ts(export)]
pub struct Partido {
    pub id: DbId,
    pub nombre: String,
    pub codigo: String,
    pub logo_path: Option<String>,
    pub orden: i32,
    pub activo: bool,
}

impl From<&Partido> for BallotParty {
    fn from(p: &Partido) -> Self {
        Self {
            id: p.id,
            codigo: p.codigo.clone(),
            nombre: p.nombre.clone(),
            orden: p.orden,
        }
    }
}
