//! Vote result rows.

use escrutinio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `resultados_mesa` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResultadoMesa {
    pub id: DbId,
    pub mesa_id: DbId,
    pub partido_id: DbId,
    pub votos: i32,
    pub created_at: Timestamp,
}

/// A row from the `resultados_mesa_totales` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResultadoMesaTotales {
    pub id: DbId,
    pub mesa_id: DbId,
    pub votos_validos: i32,
    pub votos_nulos: i32,
    pub votos_blancos: i32,
    pub registrado_por: DbId,
    pub created_at: Timestamp,
}
