//! Repository for the `fotos_mesa` table.

use escrutinio_core::types::DbId;
use sqlx::PgPool;

use crate::models::foto::{CreateFotoMesa, FotoMesa};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, mesa_id, usuario_id, origen, storage_path, created_at";

/// Provides operations for tally sheet photos.
pub struct FotoRepo;

impl FotoRepo {
    /// Record an uploaded photo, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFotoMesa) -> Result<FotoMesa, sqlx::Error> {
        let query = format!(
            "INSERT INTO fotos_mesa (mesa_id, usuario_id, origen, storage_path)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FotoMesa>(&query)
            .bind(input.mesa_id)
            .bind(input.usuario_id)
            .bind(&input.origen)
            .bind(&input.storage_path)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FotoMesa>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fotos_mesa WHERE id = $1");
        sqlx::query_as::<_, FotoMesa>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Photos uploaded by one user, newest first.
    pub async fn list_by_usuario(
        pool: &PgPool,
        usuario_id: DbId,
    ) -> Result<Vec<FotoMesa>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fotos_mesa
             WHERE usuario_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, FotoMesa>(&query)
            .bind(usuario_id)
            .fetch_all(pool)
            .await
    }
}
