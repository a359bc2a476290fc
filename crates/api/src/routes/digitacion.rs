use axum::routing::get;
use axum::Router;

use crate::handlers::digitacion;
use crate::state::AppState;

/// Routes mounted at `/digitacion`.
///
/// ```text
/// GET /distritos                                   -> distritos
/// GET /buscar?q=                                   -> buscar
/// GET /distritos/{id}/mesas?q=                     -> distrito_mesas
/// GET /distritos/{id}/mesas/{mesa_id}/abrir        -> abrir
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/distritos", get(digitacion::distritos))
        .route("/buscar", get(digitacion::buscar))
        .route("/distritos/{id}/mesas", get(digitacion::distrito_mesas))
        .route(
            "/distritos/{id}/mesas/{mesa_id}/abrir",
            get(digitacion::abrir),
        )
}
