//! Shared setup for the HTTP integration tests.
//!
//! [`TestApp`] wires the production router over a per-test database and a
//! temporary local blob root. Requests go through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use escrutinio_api::auth::jwt::{issue_access_token, JwtConfig};
use escrutinio_api::auth::password::hash_password;
use escrutinio_api::config::{DevLogin, ServerConfig, StorageBackend, StorageConfig};
use escrutinio_api::router::build_app_router;
use escrutinio_api::state::AppState;
use escrutinio_api::storage::build_blob_store;
use escrutinio_db::models::user::CreateUser;
use escrutinio_db::repositories::{RoleRepo, UserRepo};

pub const TEST_PASSWORD: &str = "clave-de-prueba-123";

pub const BASE_URL: &str = "http://localhost:3000";

pub fn test_config(blob_root: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-with-enough-entropy".to_string(),
            access_ttl: chrono::Duration::minutes(15),
            refresh_ttl: chrono::Duration::days(7),
        },
        storage: StorageConfig {
            backend: StorageBackend::Local {
                root: blob_root.to_path_buf(),
                public_base_url: BASE_URL.to_string(),
            },
            signed_url_ttl: Duration::from_secs(300),
        },
        dev_login: None,
        bootstrap_admin: None,
    }
}

/// The router plus what it needs to stay alive.
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    pub config: Arc<ServerConfig>,
    pub blob_dir: TempDir,
}

impl TestApp {
    pub fn new(pool: PgPool) -> Self {
        Self::with_config(pool, |_| {})
    }

    /// Build with a tweaked configuration (e.g. development auto-login).
    pub fn with_config(pool: PgPool, tweak: impl FnOnce(&mut ServerConfig)) -> Self {
        let blob_dir = tempfile::tempdir().unwrap();
        let mut config = test_config(blob_dir.path());
        tweak(&mut config);

        let (blobs, local_blobs) = build_blob_store(&config).unwrap();
        let state = AppState {
            pool: pool.clone(),
            config: Arc::new(config.clone()),
            blobs,
            local_blobs,
        };

        Self {
            router: build_app_router(state, &config),
            pool,
            config: Arc::new(config),
            blob_dir,
        }
    }

    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Bearer token for `user_id` acting as `role` (a seed role name).
    pub fn token(&self, user_id: i64, role: &str) -> String {
        issue_access_token(user_id, role.parse().unwrap(), &self.config.jwt)
            .unwrap()
            .token
    }
}

pub fn dev_login(email: &str) -> DevLogin {
    DevLogin {
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user with [`TEST_PASSWORD`] and return its id.
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> i64 {
    let role_id = RoleRepo::id_of(pool, role.parse().unwrap()).await.unwrap();
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            display_name: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role_id,
        },
    )
    .await
    .unwrap()
    .id
}

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

pub async fn insert_partido(pool: &PgPool, codigo: &str, orden: i32) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO partidos (nombre, codigo, orden, activo) VALUES ($1, $2, $3, true) RETURNING id",
    )
    .bind(format!("Partido {codigo}"))
    .bind(codigo)
    .bind(orden)
    .fetch_one(pool)
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// A multipart part: `(name, optional (filename, content type), bytes)`.
pub type Part<'a> = (&'a str, Option<(&'a str, &'a str)>, Vec<u8>);

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    parts: Vec<Part<'_>>,
    token: &str,
) -> Response<Body> {
    const BOUNDARY: &str = "escrutinio-test-boundary";
    let mut body = Vec::new();
    for (name, file, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file {
            Some((filename, content_type)) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(&bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
