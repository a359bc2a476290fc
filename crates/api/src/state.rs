use std::sync::Arc;

use escrutinio_core::storage::BlobStore;

use crate::config::ServerConfig;
use crate::storage::local::LocalBlobStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: escrutinio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where acta photos are written and signed.
    pub blobs: Arc<dyn BlobStore>,
    /// Set when `blobs` is the local store, so `/blobs` can serve its files.
    pub local_blobs: Option<Arc<LocalBlobStore>>,
}
