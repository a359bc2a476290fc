use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`. Each accepts an optional `?distrito_id=`.
///
/// ```text
/// GET /distribucion  -> distribucion
/// GET /partidos      -> partidos
/// GET /avance        -> avance
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/distribucion", get(dashboard::distribucion))
        .route("/partidos", get(dashboard::partidos))
        .route("/avance", get(dashboard::avance))
}
