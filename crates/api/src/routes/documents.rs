//! Route definitions for the `/documents` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{documents, validation};
use crate::state::AppState;

/// Routes mounted at `/documents`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// POST   /{id}/extract                      -> extract
/// PUT    /{id}/extracted-data               -> update_extracted_data
/// POST   /{id}/validate                     -> validation::validate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(documents::list).post(documents::create))
        .route(
            "/{id}",
            get(documents::get_by_id)
                .put(documents::update)
                .delete(documents::delete),
        )
        .route("/{id}/extract", post(documents::extract))
        .route("/{id}/extracted-data", put(documents::update_extracted_data))
        .route("/{id}/validate", post(validation::validate))
}
