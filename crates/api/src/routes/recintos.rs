use axum::routing::get;
use axum::Router;

use crate::handlers::recintos;
use crate::state::AppState;

/// Routes mounted at `/recintos`.
///
/// ```text
/// GET /?q=                  -> list_recintos
/// GET /{id}/mesas           -> recinto_mesas
/// GET /{id}/mesas/opciones  -> recinto_mesa_opciones
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recintos::list_recintos))
        .route("/{id}/mesas", get(recintos::recinto_mesas))
        .route("/{id}/mesas/opciones", get(recintos::recinto_mesa_opciones))
}
