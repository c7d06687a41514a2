//! Route definitions for the `/requirement-sets` resource.
//!
//! Also nests rule routes under `/requirement-sets/{id}/rules`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{requirement_sets, requirements};
use crate::state::AppState;

/// Routes mounted at `/requirement-sets`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
///
/// POST   /{id}/rules                        -> requirements::create
/// PUT    /{id}/rules/{rule_id}              -> requirements::update
/// DELETE /{id}/rules/{rule_id}              -> requirements::delete
/// ```
pub fn router() -> Router<AppState> {
    let rule_routes = Router::new()
        .route("/", post(requirements::create))
        .route(
            "/{rule_id}",
            put(requirements::update).delete(requirements::delete),
        );

    Router::new()
        .route(
            "/",
            get(requirement_sets::list).post(requirement_sets::create),
        )
        .route(
            "/{id}",
            get(requirement_sets::get_by_id)
                .put(requirement_sets::update)
                .delete(requirement_sets::delete),
        )
        .nest("/{id}/rules", rule_routes)
}
