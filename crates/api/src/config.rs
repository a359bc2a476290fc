use std::path::PathBuf;
use std::time::Duration;

use escrutinio_core::storage::DEFAULT_SIGNED_URL_TTL;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the JWT
/// secret. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Where acta photos are stored.
    pub storage: StorageConfig,
    /// Development auto-login account. `None` unless explicitly enabled.
    pub dev_login: Option<DevLogin>,
    /// First administrator created at startup when no account has that email.
    pub bootstrap_admin: Option<DevLogin>,
}

/// Blob storage backend selection.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// Files under a local directory, signed URLs served by this server.
    Local {
        root: PathBuf,
        public_base_url: String,
    },
    /// Hosted object storage reached over its REST API.
    Supabase {
        url: String,
        service_key: String,
        bucket: String,
    },
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Lifetime of signed read URLs (default: 300 s).
    pub signed_url_ttl: Duration,
}

/// Fixed credentials for development sign-in.
#[derive(Debug, Clone)]
pub struct DevLogin {
    pub email: String,
    pub password: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                    |
    /// |-----------------------------|----------------------------|
    /// | `HOST`                      | `0.0.0.0`                  |
    /// | `PORT`                      | `3000`                     |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                       |
    /// | `STORAGE_BACKEND`           | `local`                    |
    /// | `STORAGE_LOCAL_ROOT`        | `storage/actas`            |
    /// | `STORAGE_PUBLIC_BASE_URL`   | `http://localhost:3000`    |
    /// | `SUPABASE_URL`              | required for `supabase`    |
    /// | `SUPABASE_SERVICE_KEY`      | required for `supabase`    |
    /// | `STORAGE_BUCKET`            | `actas`                    |
    /// | `SIGNED_URL_TTL_SECS`       | `300`                      |
    /// | `DEV_AUTO_LOGIN`            | `false`                    |
    /// | `DEV_LOGIN_EMAIL`           | --                         |
    /// | `DEV_LOGIN_PASSWORD`        | --                         |
    /// | `BOOTSTRAP_ADMIN_EMAIL`     | --                         |
    /// | `BOOTSTRAP_ADMIN_PASSWORD`  | --                         |
    ///
    /// JWT settings are documented on [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on malformed numbers, an unknown storage backend, or a
    /// `supabase` backend without URL and key.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            storage: StorageConfig::from_env(),
            dev_login: dev_login_from_env(),
            bootstrap_admin: credentials_from_env("BOOTSTRAP_ADMIN_EMAIL", "BOOTSTRAP_ADMIN_PASSWORD"),
        }
    }
}

impl StorageConfig {
    fn from_env() -> Self {
        let backend = match std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".into())
            .as_str()
        {
            "local" => StorageBackend::Local {
                root: std::env::var("STORAGE_LOCAL_ROOT")
                    .unwrap_or_else(|_| "storage/actas".into())
                    .into(),
                public_base_url: std::env::var("STORAGE_PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:3000".into())
                    .trim_end_matches('/')
                    .to_string(),
            },
            "supabase" => StorageBackend::Supabase {
                url: std::env::var("SUPABASE_URL")
                    .expect("SUPABASE_URL must be set when STORAGE_BACKEND=supabase")
                    .trim_end_matches('/')
                    .to_string(),
                service_key: std::env::var("SUPABASE_SERVICE_KEY")
                    .expect("SUPABASE_SERVICE_KEY must be set when STORAGE_BACKEND=supabase"),
                bucket: std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "actas".into()),
            },
            other => panic!("Unknown STORAGE_BACKEND '{other}'. Must be one of: local, supabase"),
        };

        let signed_url_ttl = std::env::var("SIGNED_URL_TTL_SECS")
            .ok()
            .map(|v| {
                v.parse::<u64>()
                    .expect("SIGNED_URL_TTL_SECS must be a valid u64")
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SIGNED_URL_TTL);

        Self {
            backend,
            signed_url_ttl,
        }
    }
}

/// The development account, only when `DEV_AUTO_LOGIN=true` and both
/// credentials are present.
fn dev_login_from_env() -> Option<DevLogin> {
    let enabled = std::env::var("DEV_AUTO_LOGIN")
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false);
    if !enabled {
        return None;
    }
    let login = credentials_from_env("DEV_LOGIN_EMAIL", "DEV_LOGIN_PASSWORD");
    if login.is_none() {
        tracing::warn!("DEV_AUTO_LOGIN is set but DEV_LOGIN_EMAIL/DEV_LOGIN_PASSWORD are missing");
    }
    login
}

fn credentials_from_env(email_var: &str, password_var: &str) -> Option<DevLogin> {
    let email = std::env::var(email_var).ok().filter(|s| !s.is_empty())?;
    let password = std::env::var(password_var).ok().filter(|s| !s.is_empty())?;
    Some(DevLogin { email, password })
}
