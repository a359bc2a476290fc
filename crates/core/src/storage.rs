//! Blob storage abstraction for acta photos.
//!
//! The server picks a concrete backend at startup (hosted object storage or
//! a local directory); handlers only see [`BlobStore`].

use std::time::Duration;

use async_trait::async_trait;

/// Default lifetime of a signed read URL.
pub const DEFAULT_SIGNED_URL_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage backend returned {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("Storage transport error: {0}")]
    Transport(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Store `bytes` at `path`. Existing objects are not overwritten.
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// A URL granting read access to `path` for `ttl`.
    async fn signed_url(&self, path: &str, ttl: Duration) -> Result<String, StorageError>;
}

/// Reject paths that could escape the bucket or root directory.
///
/// Paths are relative, `/`-separated, and contain no empty, `.` or `..`
/// segments.
pub fn validate_object_path(path: &str) -> Result<(), StorageError> {
    if path.is_empty() || path.starts_with('/') || path.contains('\\') {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    if path
        .split('/')
        .any(|seg| seg.is_empty() || seg == "." || seg == "..")
    {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(())
}
