//! Blob store clients for acta photos.
//!
//! - [`local::LocalBlobStore`] -- a directory on disk; signed URLs point back
//!   at this server's `/blobs` route.
//! - [`supabase::SupabaseStorage`] -- hosted object storage over its REST API.

pub mod local;
pub mod supabase;

use std::sync::Arc;

use escrutinio_core::storage::BlobStore;

use crate::config::{ServerConfig, StorageBackend};
use local::LocalBlobStore;
use supabase::SupabaseStorage;

/// Build the configured blob store.
///
/// Returns the store handlers use, plus the local store again when that is
/// the backend, so the router can mount the signed-read route.
pub fn build_blob_store(
    config: &ServerConfig,
) -> Result<(Arc<dyn BlobStore>, Option<Arc<LocalBlobStore>>), hmac::digest::InvalidLength> {
    match &config.storage.backend {
        StorageBackend::Local {
            root,
            public_base_url,
        } => {
            let local = Arc::new(LocalBlobStore::new(
                root.clone(),
                public_base_url.clone(),
                config.jwt.secret.as_bytes(),
            )?);
            tracing::info!(root = %root.display(), "Using local blob store");
            Ok((local.clone(), Some(local)))
        }
        StorageBackend::Supabase {
            url,
            service_key,
            bucket,
        } => {
            tracing::info!(%url, %bucket, "Using hosted blob store");
            let remote = SupabaseStorage::new(url.clone(), service_key.clone(), bucket.clone());
            Ok((Arc::new(remote), None))
        }
    }
}
