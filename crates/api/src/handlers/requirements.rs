//! Handlers for rules nested under `/requirement-sets/{id}/rules`.
//!
//! Field keys are checked against the registry on every write so unknown
//! keys never reach storage through the API.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coi_core::audit::{action_types, entity_types};
use coi_core::error::CoreError;
use coi_core::fields;
use coi_core::types::DbId;
use coi_db::models::requirement::{CreateRequirement, Requirement, UpdateRequirement};
use coi_db::repositories::RequirementRepo;
use serde_json::json;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::handlers::requirement_sets::load_set;
use crate::middleware::identity::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/requirement-sets/{id}/rules
pub async fn create(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(set_id): Path<DbId>,
    Json(mut input): Json<CreateRequirement>,
) -> AppResult<(StatusCode, Json<DataResponse<Requirement>>)> {
    let set = load_set(&state.pool, caller.user_id, set_id).await?;
    input.field_name = fields::resolve(input.field_name.trim())?.key.to_string();

    let rule = RequirementRepo::create(&state.pool, set.id, &input).await?;

    audit::record(
        &state.pool,
        caller.user_id,
        action_types::CREATE,
        entity_types::REQUIREMENT,
        Some(rule.id),
        Some(json!({
            "requirement_set_id": set.id,
            "field_name": rule.field_name,
            "comparison_operator": rule.comparison_operator,
            "expected_value": rule.expected_value,
        })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: rule })))
}

/// PUT /api/v1/requirement-sets/{id}/rules/{rule_id}
pub async fn update(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path((set_id, id)): Path<(DbId, DbId)>,
    Json(mut input): Json<UpdateRequirement>,
) -> AppResult<Json<DataResponse<Requirement>>> {
    let set = load_set(&state.pool, caller.user_id, set_id).await?;
    if let Some(name) = input.field_name.as_mut() {
        *name = fields::resolve(name.trim())?.key.to_string();
    }

    let rule = RequirementRepo::update(&state.pool, set.id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Requirement",
            id,
        }))?;

    audit::record(
        &state.pool,
        caller.user_id,
        action_types::UPDATE,
        entity_types::REQUIREMENT,
        Some(rule.id),
        Some(json!({
            "requirement_set_id": set.id,
            "field_name": rule.field_name,
            "comparison_operator": rule.comparison_operator,
            "expected_value": rule.expected_value,
            "enabled": rule.enabled,
        })),
    )
    .await;

    Ok(Json(DataResponse { data: rule }))
}

/// DELETE /api/v1/requirement-sets/{id}/rules/{rule_id}
pub async fn delete(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path((set_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let set = load_set(&state.pool, caller.user_id, set_id).await?;
    let deleted = RequirementRepo::delete(&state.pool, set.id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Requirement",
            id,
        }));
    }

    audit::record(
        &state.pool,
        caller.user_id,
        action_types::DELETE,
        entity_types::REQUIREMENT,
        Some(id),
        Some(json!({ "requirement_set_id": set.id })),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
