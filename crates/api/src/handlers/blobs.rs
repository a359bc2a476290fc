//! Signed reads of locally stored acta photos.
//!
//! Only mounted in practice when the local blob store is configured; with
//! hosted storage the signed URLs point at the storage service instead.

use axum::extract::{Path, Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::IntoResponse;
use escrutinio_core::acta::OUTPUT_CONTENT_TYPE;
use escrutinio_core::error::CoreError;
use escrutinio_core::storage::StorageError;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignedParams {
    pub expires: i64,
    pub token: String,
}

/// GET /blobs/{*path}?expires=&token=
pub async fn read_blob(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(params): Query<SignedParams>,
) -> AppResult<impl IntoResponse> {
    let store = state
        .local_blobs
        .as_ref()
        .ok_or_else(|| AppError::Storage(StorageError::NotFound(path.clone())))?;

    if !store.verify(&path, params.expires, &params.token) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Invalid or expired signature".into(),
        )));
    }

    let bytes = store.read(&path).await?;
    Ok((
        [(CONTENT_TYPE, OUTPUT_CONTENT_TYPE), (CACHE_CONTROL, "private, max-age=60")],
        bytes,
    ))
}
