//! Handlers for the `/requirement-sets` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coi_core::audit::{action_types, entity_types};
use coi_core::error::CoreError;
use coi_core::types::DbId;
use coi_db::models::requirement_set::{
    CreateRequirementSet, RequirementSet, RequirementSetWithRules, UpdateRequirementSet,
};
use coi_db::repositories::{RequirementRepo, RequirementSetRepo};
use coi_db::DbPool;
use serde_json::json;
use uuid::Uuid;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::identity::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load one of the caller's sets or fail with 404.
pub(crate) async fn load_set(
    pool: &DbPool,
    owner_id: Uuid,
    id: DbId,
) -> AppResult<RequirementSet> {
    RequirementSetRepo::find_by_id(pool, owner_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RequirementSet",
            id,
        }))
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Requirement set name is required".into()));
    }
    Ok(())
}

/// POST /api/v1/requirement-sets
pub async fn create(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(mut input): Json<CreateRequirementSet>,
) -> AppResult<(StatusCode, Json<DataResponse<RequirementSet>>)> {
    validate_name(&input.name)?;
    input.name = input.name.trim().to_string();

    let set = RequirementSetRepo::create(&state.pool, caller.user_id, &input).await?;
    tracing::info!(requirement_set_id = set.id, user_id = %caller.user_id, "Requirement set created");

    audit::record(
        &state.pool,
        caller.user_id,
        action_types::CREATE,
        entity_types::REQUIREMENT_SET,
        Some(set.id),
        Some(json!({ "name": set.name })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: set })))
}

/// GET /api/v1/requirement-sets
pub async fn list(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> AppResult<Json<DataResponse<Vec<RequirementSet>>>> {
    let sets = RequirementSetRepo::list(&state.pool, caller.user_id).await?;
    Ok(Json(DataResponse { data: sets }))
}

/// GET /api/v1/requirement-sets/{id}
///
/// The set with its rules in stored order.
pub async fn get_by_id(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RequirementSetWithRules>>> {
    let set = load_set(&state.pool, caller.user_id, id).await?;
    let rules = RequirementRepo::list_by_set(&state.pool, set.id).await?;
    Ok(Json(DataResponse {
        data: RequirementSetWithRules { set, rules },
    }))
}

/// PUT /api/v1/requirement-sets/{id}
pub async fn update(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateRequirementSet>,
) -> AppResult<Json<DataResponse<RequirementSet>>> {
    if let Some(name) = input.name.as_mut() {
        validate_name(name)?;
        *name = name.trim().to_string();
    }

    let set = RequirementSetRepo::update(&state.pool, caller.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RequirementSet",
            id,
        }))?;

    audit::record(
        &state.pool,
        caller.user_id,
        action_types::UPDATE,
        entity_types::REQUIREMENT_SET,
        Some(set.id),
        Some(json!({ "name": set.name, "description": set.description })),
    )
    .await;

    Ok(Json(DataResponse { data: set }))
}

/// DELETE /api/v1/requirement-sets/{id}
///
/// Removes the set and all of its rules.
pub async fn delete(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = RequirementSetRepo::delete(&state.pool, caller.user_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "RequirementSet",
            id,
        }));
    }

    audit::record(
        &state.pool,
        caller.user_id,
        action_types::DELETE,
        entity_types::REQUIREMENT_SET,
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
