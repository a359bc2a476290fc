//! Calls into the `estadistica_*` aggregation procedures.

use escrutinio_core::types::DbId;
use sqlx::PgPool;

use crate::models::estadistica::{AvanceRow, DistribucionRow, VotosPartidoRow};

/// Read-only access to the dashboard aggregates.
pub struct EstadisticaRepo;

impl EstadisticaRepo {
    /// Voter roll distribution across districts.
    pub async fn distritos(pool: &PgPool) -> Result<Vec<DistribucionRow>, sqlx::Error> {
        sqlx::query_as::<_, DistribucionRow>(
            "SELECT id, nombre, total_habilitados, porcentaje FROM estadistica_distritos()",
        )
        .fetch_all(pool)
        .await
    }

    /// Voter roll distribution across the venues of one district.
    pub async fn recintos(
        pool: &PgPool,
        distrito_id: DbId,
    ) -> Result<Vec<DistribucionRow>, sqlx::Error> {
        sqlx::query_as::<_, DistribucionRow>(
            "SELECT id, nombre, total_habilitados, porcentaje FROM estadistica_recintos($1)",
        )
        .bind(distrito_id)
        .fetch_all(pool)
        .await
    }

    /// Vote share per active party, optionally scoped to a district.
    pub async fn partidos(
        pool: &PgPool,
        distrito_id: Option<DbId>,
    ) -> Result<Vec<VotosPartidoRow>, sqlx::Error> {
        sqlx::query_as::<_, VotosPartidoRow>(
            "SELECT id, codigo, nombre, orden, votos, porcentaje FROM estadistica_partidos($1)",
        )
        .bind(distrito_id)
        .fetch_all(pool)
        .await
    }

    /// Counting progress, optionally scoped to a district.
    pub async fn avance(pool: &PgPool, distrito_id: Option<DbId>) -> Result<AvanceRow, sqlx::Error> {
        sqlx::query_as::<_, AvanceRow>(
            "SELECT mesas_total, mesas_computadas, porcentaje, votos_validos, votos_nulos, \
                    votos_blancos
             FROM estadistica_avance($1)",
        )
        .bind(distrito_id)
        .fetch_one(pool)
        .await
    }
}
