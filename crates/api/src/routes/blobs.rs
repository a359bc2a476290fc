use axum::routing::get;
use axum::Router;

use crate::handlers::blobs;
use crate::state::AppState;

/// Signed reads of the local blob store, mounted at the root.
///
/// ```text
/// GET /blobs/{*path}?expires=&token=   -> read_blob (public, signature checked)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/blobs/{*path}", get(blobs::read_blob))
}
