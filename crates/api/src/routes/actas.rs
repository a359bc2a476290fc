use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use escrutinio_core::acta::MAX_UPLOAD_BYTES;

use crate::handlers::actas;
use crate::state::AppState;

/// Room for the multipart framing and the `mesa_id` field around the image.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/actas`.
///
/// ```text
/// POST /           -> upload_acta (multipart: mesa_id, file)
/// GET  /mias       -> mis_actas
/// GET  /{id}/url   -> acta_url
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(actas::upload_acta)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .route("/mias", get(actas::mis_actas))
        .route("/{id}/url", get(actas::acta_url))
}
