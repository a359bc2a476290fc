use axum::routing::{get, post};
use axum::Router;

use crate::handlers::mesas;
use crate::state::AppState;

/// Routes mounted at `/mesas`.
///
/// ```text
/// GET  /{id}/formulario             -> formulario
/// POST /{id}/resultados/verificar   -> verificar
/// POST /{id}/resultados             -> registrar (operador or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/formulario", get(mesas::formulario))
        .route("/{id}/resultados/verificar", post(mesas::verificar))
        .route("/{id}/resultados", post(mesas::registrar))
}
