//! Route definitions for the static catalogs.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// ```text
/// GET    /fields                            -> list_fields
/// GET    /operators                         -> list_operators
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/fields", get(catalog::list_fields))
        .route("/operators", get(catalog::list_operators))
}
