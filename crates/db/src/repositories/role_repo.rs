//! Repository for the seeded `roles` lookup table.

use escrutinio_core::roles::Role;
use escrutinio_core::types::DbId;
use sqlx::PgPool;

pub struct RoleRepo;

impl RoleRepo {
    /// Row id of a seeded role.
    pub async fn id_of(pool: &PgPool, role: Role) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM roles WHERE name = $1")
            .bind(role.as_str())
            .fetch_one(pool)
            .await
    }

    /// The role a `users.role_id` points at.
    pub async fn role_of(pool: &PgPool, role_id: DbId) -> Result<Role, sqlx::Error> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_one(pool)
            .await?;
        parse(&name)
    }

    /// Every role keyed by row id.
    pub async fn all(pool: &PgPool) -> Result<Vec<(DbId, Role)>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (DbId, String)>("SELECT id, name FROM roles ORDER BY id")
            .fetch_all(pool)
            .await?;
        rows.into_iter()
            .map(|(id, name)| Ok((id, parse(&name)?)))
            .collect()
    }
}

/// A role row outside the known set means the seed data and the code
/// disagree.
fn parse(name: &str) -> Result<Role, sqlx::Error> {
    name.parse::<Role>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
