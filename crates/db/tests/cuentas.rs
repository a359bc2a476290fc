mod common;

use chrono::{Duration, Utc};
use escrutinio_core::roles::Role;
use escrutinio_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use sqlx::PgPool;

use common::*;

#[sqlx::test(migrations = "../../db/migrations")]
async fn every_seeded_role_is_known(pool: PgPool) {
    let roles: Vec<Role> = RoleRepo::all(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|(_, r)| r)
        .collect();
    assert_eq!(roles, Role::ALL.to_vec());

    let id = RoleRepo::id_of(&pool, Role::Voluntario).await.unwrap();
    assert_eq!(RoleRepo::role_of(&pool, id).await.unwrap(), Role::Voluntario);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lock_is_set_by_the_failure_reaching_the_limit(pool: PgPool) {
    let user_id = insert_user(&pool, "vol@example.com", Role::Voluntario).await;
    let until = Utc::now() + Duration::minutes(15);

    for attempt in 1..=2 {
        let user = UserRepo::record_failed_login(&pool, user_id, 3, until).await.unwrap();
        assert_eq!(user.failed_login_count, attempt);
        assert!(user.locked_until.is_none());
    }
    let user = UserRepo::record_failed_login(&pool, user_id, 3, until).await.unwrap();
    assert_eq!(user.failed_login_count, 3);
    assert!(user.locked_until.is_some());

    UserRepo::record_successful_login(&pool, user_id).await.unwrap();
    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(user.failed_login_count, 0);
    assert!(user.locked_until.is_none());
    assert!(user.last_login_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_sessions_are_single_use(pool: PgPool) {
    let user_id = insert_user(&pool, "op@example.com", Role::Operador).await;
    let expires = Utc::now() + Duration::days(7);
    SessionRepo::open(&pool, user_id, "hash-a", expires).await.unwrap();

    let first = SessionRepo::consume(&pool, "hash-a").await.unwrap();
    assert_eq!(first.map(|s| s.user_id), Some(user_id));
    assert!(SessionRepo::consume(&pool, "hash-a").await.unwrap().is_none());
    assert!(SessionRepo::consume(&pool, "unknown").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_and_closed_sessions_cannot_be_consumed(pool: PgPool) {
    let user_id = insert_user(&pool, "op@example.com", Role::Operador).await;
    SessionRepo::open(&pool, user_id, "old", Utc::now() - Duration::minutes(1))
        .await
        .unwrap();
    SessionRepo::open(&pool, user_id, "live-1", Utc::now() + Duration::days(1))
        .await
        .unwrap();
    SessionRepo::open(&pool, user_id, "live-2", Utc::now() + Duration::days(1))
        .await
        .unwrap();

    assert!(SessionRepo::consume(&pool, "old").await.unwrap().is_none());
    // The expired row is still unconsumed, so it is counted too.
    assert_eq!(SessionRepo::close_all(&pool, user_id).await.unwrap(), 3);
    assert!(SessionRepo::consume(&pool, "live-1").await.unwrap().is_none());
}
