//! Repository for the `distritos` table.

use escrutinio_core::types::DbId;
use sqlx::PgPool;

use crate::models::distrito::Distrito;

/// Provides read operations for districts.
pub struct DistritoRepo;

impl DistritoRepo {
    /// List all districts ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Distrito>, sqlx::Error> {
        sqlx::query_as::<_, Distrito>("SELECT id, nombre FROM distritos ORDER BY nombre, id")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Distrito>, sqlx::Error> {
        sqlx::query_as::<_, Distrito>("SELECT id, nombre FROM distritos WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
