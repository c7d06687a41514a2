//! Caller identity extractor.
//!
//! Every owner-scoped route takes the caller's UUID from the `X-User-Id`
//! header. The header is trusted as given; authentication happens upstream.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use coi_core::error::CoreError;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user on whose behalf a request runs.
///
/// ```ignore
/// async fn my_handler(caller: CallerIdentity) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %caller.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CallerIdentity {
    pub user_id: Uuid,
}

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing X-User-Id header".into()))
            })?;

        let user_id = Uuid::parse_str(raw.trim()).map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid X-User-Id header. Expected a UUID".into(),
            ))
        })?;

        Ok(CallerIdentity { user_id })
    }
}
