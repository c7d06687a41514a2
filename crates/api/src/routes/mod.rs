pub mod audit;
pub mod catalog;
pub mod documents;
pub mod health;
pub mod requirement_sets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /fields                                          field registry (public)
/// /operators                                       operator catalog (public)
///
/// /requirement-sets                                list, create
/// /requirement-sets/{id}                           get (with rules), update, delete
/// /requirement-sets/{id}/rules                     add rule
/// /requirement-sets/{id}/rules/{rule_id}           update, delete rule
///
/// /documents                                       list, register
/// /documents/{id}                                  get, rename, delete
/// /documents/{id}/extract                          run extraction (POST)
/// /documents/{id}/extracted-data                   manual correction (PUT)
/// /documents/{id}/validate                         check against a set (POST)
///
/// /audit-logs                                      recent entries
/// /audit-logs/export                               CSV download
/// ```
///
/// Everything except the catalogs requires an `X-User-Id` header.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .nest("/requirement-sets", requirement_sets::router())
        .nest("/documents", documents::router())
        .nest("/audit-logs", audit::router())
}
