//! Route definitions for the `/audit-logs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// Routes mounted at `/audit-logs`.
///
/// ```text
/// GET    /                                  -> list
/// GET    /export                            -> export
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(audit::list))
        .route("/export", get(audit::export))
}
