pub mod actas;
pub mod admin;
pub mod auth;
pub mod blobs;
pub mod dashboard;
pub mod digitacion;
pub mod health;
pub mod mesas;
pub mod recintos;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout
/// /auth/me                                         current user
/// /auth/session                                    session or development auto-login
///
/// /admin/users                                     list, create (admin only)
///
/// /navegacion                                      sidebar and tab entries
/// /partidos                                        active parties
///
/// /mesas/{id}/formulario                           vote entry form
/// /mesas/{id}/resultados/verificar                 derived totals, no writes
/// /mesas/{id}/resultados                           submit (operador or admin)
///
/// /digitacion/distritos                            district progress
/// /digitacion/buscar?q=                            table search
/// /digitacion/distritos/{id}/mesas?q=              tables of a district
/// /digitacion/distritos/{id}/mesas/{mesa_id}/abrir open a pending table
///
/// /recintos?q=                                     venue picker
/// /recintos/{id}/mesas                             tables of a venue
/// /recintos/{id}/mesas/opciones                    table picker
///
/// /actas                                           upload (multipart)
/// /actas/mias                                      caller's uploads
/// /actas/{id}/url                                  signed read URL
///
/// /dashboard/distribucion?distrito_id=             voter roll chart
/// /dashboard/partidos?distrito_id=                 party vote chart
/// /dashboard/avance?distrito_id=                   tables computed
/// ```
///
/// Everything except login, refresh and session requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .route("/navegacion", get(handlers::navegacion::get_shell))
        .route("/partidos", get(handlers::partidos::list_partidos))
        .nest("/mesas", mesas::router())
        .nest("/digitacion", digitacion::router())
        .nest("/recintos", recintos::router())
        .nest("/actas", actas::router())
        .nest("/dashboard", dashboard::router())
}
