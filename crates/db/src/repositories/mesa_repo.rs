//! Repository for the `mesas` table and the navigator's flat table listing.

use escrutinio_core::types::DbId;
use sqlx::PgPool;

use crate::models::mesa::{Mesa, MesaDetalle, MesaNavegacion, MesaOpcion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, recinto_id, numero_mesa, habilitados, es_prioridad, estado_id, \
                       created_at, updated_at";

/// Columns of the navigator listing, aliased to [`MesaNavegacion`].
const NAV_SELECT: &str = "SELECT m.id AS mesa_id, m.numero_mesa, m.es_prioridad, m.estado_id,
        EXISTS (SELECT 1 FROM resultados_mesa_totales t WHERE t.mesa_id = m.id) AS digitada,
        EXISTS (SELECT 1 FROM fotos_mesa f WHERE f.mesa_id = m.id) AS con_foto,
        r.id AS recinto_id, r.nombre AS recinto_nombre,
        d.id AS distrito_id, d.nombre AS distrito_nombre
     FROM mesas m
     JOIN recintos r ON r.id = m.recinto_id
     JOIN distritos d ON d.id = r.distrito_id";

/// Provides read operations for polling tables.
pub struct MesaRepo;

impl MesaRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Mesa>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mesas WHERE id = $1");
        sqlx::query_as::<_, Mesa>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A table joined with its venue and district.
    pub async fn find_detalle(pool: &PgPool, id: DbId) -> Result<Option<MesaDetalle>, sqlx::Error> {
        sqlx::query_as::<_, MesaDetalle>(
            "SELECT m.id, m.numero_mesa, m.habilitados, m.es_prioridad, m.estado_id,
                    r.id AS recinto_id, r.nombre AS recinto_nombre,
                    d.id AS distrito_id, d.nombre AS distrito_nombre
             FROM mesas m
             JOIN recintos r ON r.id = m.recinto_id
             JOIN distritos d ON d.id = r.distrito_id
             WHERE m.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Tables of one venue ordered by number.
    pub async fn list_opciones_by_recinto(
        pool: &PgPool,
        recinto_id: DbId,
    ) -> Result<Vec<MesaOpcion>, sqlx::Error> {
        sqlx::query_as::<_, MesaOpcion>(
            "SELECT id, numero_mesa FROM mesas WHERE recinto_id = $1 ORDER BY numero_mesa, id",
        )
        .bind(recinto_id)
        .fetch_all(pool)
        .await
    }

    /// Every table with venue, district and progress flags.
    pub async fn list_navegacion(pool: &PgPool) -> Result<Vec<MesaNavegacion>, sqlx::Error> {
        let query = format!("{NAV_SELECT} ORDER BY d.id, r.id, m.numero_mesa");
        sqlx::query_as::<_, MesaNavegacion>(&query)
            .fetch_all(pool)
            .await
    }

    /// Navigator rows restricted to one district.
    pub async fn list_navegacion_by_distrito(
        pool: &PgPool,
        distrito_id: DbId,
    ) -> Result<Vec<MesaNavegacion>, sqlx::Error> {
        let query = format!("{NAV_SELECT} WHERE d.id = $1 ORDER BY r.id, m.numero_mesa");
        sqlx::query_as::<_, MesaNavegacion>(&query)
            .bind(distrito_id)
            .fetch_all(pool)
            .await
    }

    /// Navigator rows restricted to one venue.
    pub async fn list_navegacion_by_recinto(
        pool: &PgPool,
        recinto_id: DbId,
    ) -> Result<Vec<MesaNavegacion>, sqlx::Error> {
        let query = format!("{NAV_SELECT} WHERE r.id = $1 ORDER BY m.numero_mesa");
        sqlx::query_as::<_, MesaNavegacion>(&query)
            .bind(recinto_id)
            .fetch_all(pool)
            .await
    }
}
