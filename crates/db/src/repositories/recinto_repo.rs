//! Repository for the `recintos` table.

use escrutinio_core::types::DbId;
use sqlx::PgPool;

use crate::models::recinto::{Recinto, RecintoConDistrito};

/// Provides read operations for polling places.
pub struct RecintoRepo;

impl RecintoRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recinto>, sqlx::Error> {
        sqlx::query_as::<_, Recinto>("SELECT id, nombre, distrito_id FROM recintos WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All venues with their district name, ordered by venue name.
    pub async fn list_with_distrito(pool: &PgPool) -> Result<Vec<RecintoConDistrito>, sqlx::Error> {
        sqlx::query_as::<_, RecintoConDistrito>(
            "SELECT r.id, r.nombre, r.distrito_id, d.nombre AS distrito_nombre
             FROM recintos r
             JOIN distritos d ON d.id = r.distrito_id
             ORDER BY r.nombre, r.id",
        )
        .fetch_all(pool)
        .await
    }
}
