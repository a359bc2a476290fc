//! Repository for `resultados_mesa` and `resultados_mesa_totales`.

use escrutinio_core::tally::SubmissionPlan;
use escrutinio_core::types::DbId;
use sqlx::PgPool;

use crate::models::resultado::{ResultadoMesa, ResultadoMesaTotales};
use crate::models::status::MesaStatus;

const TOTALES_COLUMNS: &str =
    "id, mesa_id, votos_validos, votos_nulos, votos_blancos, registrado_por, created_at";

/// Result of a submission attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Rows written and the table flipped to `registrado`.
    Registered(ResultadoMesaTotales),
    /// The table was not pending (already registered, or gone); nothing written.
    NotPending,
}

/// Provides the vote submission transaction and result reads.
pub struct ResultadoRepo;

impl ResultadoRepo {
    /// Write a submission atomically.
    ///
    /// The status flip is conditional on the table still being pending and
    /// runs first, so a concurrent submission for the same table blocks on the
    /// row lock and then finds nothing to update. The unique constraint on
    /// the totals row backs this up. Any error rolls the whole batch back.
    pub async fn submit(pool: &PgPool, plan: &SubmissionPlan) -> Result<SubmitOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let flipped = sqlx::query("UPDATE mesas SET estado_id = $2 WHERE id = $1 AND estado_id = $3")
            .bind(plan.mesa_id)
            .bind(MesaStatus::Registrado.id())
            .bind(MesaStatus::Pendiente.id())
            .execute(&mut *tx)
            .await?;

        if flipped.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(SubmitOutcome::NotPending);
        }

        for result in &plan.results {
            sqlx::query("INSERT INTO resultados_mesa (mesa_id, partido_id, votos) VALUES ($1, $2, $3)")
                .bind(plan.mesa_id)
                .bind(result.partido_id)
                .bind(result.votos)
                .execute(&mut *tx)
                .await?;
        }

        let query = format!(
            "INSERT INTO resultados_mesa_totales
                (mesa_id, votos_validos, votos_nulos, votos_blancos, registrado_por)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {TOTALES_COLUMNS}"
        );
        let totales = sqlx::query_as::<_, ResultadoMesaTotales>(&query)
            .bind(plan.mesa_id)
            .bind(plan.totals.votos_validos)
            .bind(plan.totals.votos_nulos)
            .bind(plan.totals.votos_blancos)
            .bind(plan.registrado_por)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(SubmitOutcome::Registered(totales))
    }

    /// Per-party rows of one table.
    pub async fn list_by_mesa(pool: &PgPool, mesa_id: DbId) -> Result<Vec<ResultadoMesa>, sqlx::Error> {
        sqlx::query_as::<_, ResultadoMesa>(
            "SELECT id, mesa_id, partido_id, votos, created_at
             FROM resultados_mesa WHERE mesa_id = $1 ORDER BY partido_id",
        )
        .bind(mesa_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_totales(
        pool: &PgPool,
        mesa_id: DbId,
    ) -> Result<Option<ResultadoMesaTotales>, sqlx::Error> {
        let query = format!("SELECT {TOTALES_COLUMNS} FROM resultados_mesa_totales WHERE mesa_id = $1");
        sqlx::query_as::<_, ResultadoMesaTotales>(&query)
            .bind(mesa_id)
            .fetch_optional(pool)
            .await
    }
}
