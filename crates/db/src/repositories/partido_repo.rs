//! Repository for the `partidos` table.

use sqlx::PgPool;

use crate::models::partido::Partido;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nombre, codigo, logo_path, orden, activo";

/// Provides read operations for parties.
pub struct PartidoRepo;

impl PartidoRepo {
    /// Active parties in ballot order (`orden`, ties by id).
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Partido>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM partidos WHERE activo ORDER BY orden, id");
        sqlx::query_as::<_, Partido>(&query).fetch_all(pool).await
    }
}
