//! Fixture helpers shared by the repository integration tests.
//!
//! Reference data has no write path in the application, so fixtures insert
//! it with plain SQL.

#![allow(dead_code)]

use escrutinio_core::roles::Role;
use escrutinio_db::models::user::CreateUser;
use escrutinio_db::repositories::{RoleRepo, UserRepo};
use sqlx::PgPool;

pub async fn insert_distrito(pool: &PgPool, nombre: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO distritos (nombre) VALUES ($1) RETURNING id")
        .bind(nombre)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_recinto(pool: &PgPool, distrito_id: i64, nombre: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO recintos (nombre, distrito_id) VALUES ($1, $2) RETURNING id")
        .bind(nombre)
        .bind(distrito_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_mesa(
    pool: &PgPool,
    recinto_id: i64,
    numero_mesa: i32,
    habilitados: Option<i32>,
    es_prioridad: bool,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO mesas (recinto_id, numero_mesa, habilitados, es_prioridad)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(recinto_id)
    .bind(numero_mesa)
    .bind(habilitados)
    .bind(es_prioridad)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_partido(pool: &PgPool, codigo: &str, orden: i32, activo: bool) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO partidos (nombre, codigo, orden, activo) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(format!("Partido {codigo}"))
    .bind(codigo)
    .bind(orden)
    .bind(activo)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_user(pool: &PgPool, email: &str, role: Role) -> i64 {
    let role_id = RoleRepo::id_of(pool, role).await.unwrap();
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            display_name: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role_id,
        },
    )
    .await
    .unwrap()
    .id
}
