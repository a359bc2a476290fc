//! Repository for the `user_sessions` table.

use escrutinio_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::session::UserSession;

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, consumed_at, created_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Store the digest of a freshly issued refresh token.
    pub async fn open(
        pool: &PgPool,
        user_id: DbId,
        refresh_token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .bind(refresh_token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Mark the live session for `refresh_token_hash` as used and return it.
    ///
    /// `None` when the token is unknown, expired or already used. Two
    /// concurrent exchanges of the same token cannot both succeed.
    pub async fn consume(
        pool: &PgPool,
        refresh_token_hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET consumed_at = NOW()
             WHERE refresh_token_hash = $1
               AND consumed_at IS NULL
               AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(refresh_token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Close every live session of a user, returning how many there were.
    pub async fn close_all(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let done = sqlx::query(
            "UPDATE user_sessions SET consumed_at = NOW()
             WHERE user_id = $1 AND consumed_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(done.rows_affected())
    }
}
