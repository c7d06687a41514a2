//! Handler for checking a document against a requirement set.

use axum::extract::{Path, State};
use axum::Json;
use coi_core::audit::{action_types, entity_types};
use coi_core::error::CoreError;
use coi_core::requirements::chain::{describe_chain, evaluate_chain, AdvisoryChain, ChainStep};
use coi_core::requirements::rules::{ValidationMap, ValidationSummary};
use coi_core::types::DbId;
use coi_db::repositories::{ExtractedDataRepo, RequirementRepo};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::audit;
use crate::error::AppResult;
use crate::handlers::documents::load_document;
use crate::handlers::requirement_sets::load_set;
use crate::middleware::identity::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /documents/{id}/validate`.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub requirement_set_id: DbId,
}

/// Per-field results of one validation run.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub document_id: DbId,
    pub requirement_set_id: DbId,
    /// Keyed by field key, in registry order.
    pub results: ValidationMap,
    pub summary: ValidationSummary,
    /// The enabled rules rendered with their logical joiners.
    pub chain: Vec<ChainStep>,
}

/// POST /api/v1/documents/{id}/validate
///
/// Evaluates the set's enabled rules against the document's extracted data.
/// Results are computed fresh and not stored.
pub async fn validate(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<DbId>,
    Json(input): Json<ValidateRequest>,
) -> AppResult<Json<DataResponse<ValidationReport>>> {
    let document = load_document(&state.pool, caller.user_id, id).await?;
    let set = load_set(&state.pool, caller.user_id, input.requirement_set_id).await?;

    let extracted = ExtractedDataRepo::find_by_document(&state.pool, document.id)
        .await?
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Document {} has no extracted data; run extraction first",
                document.id
            ))
        })?;
    let record = extracted.to_record()?;

    let rules = RequirementRepo::list_by_set(&state.pool, set.id).await?;
    let rule_set = set.to_rule_set(&rules)?;

    let outcome = evaluate_chain(&record, &rule_set, &AdvisoryChain);
    let summary = ValidationSummary::from_results(&outcome.results);

    tracing::info!(
        document_id = document.id,
        requirement_set_id = set.id,
        passed = summary.passed,
        failed = summary.failed,
        missing = summary.missing,
        "Document validated"
    );

    audit::record(
        &state.pool,
        caller.user_id,
        action_types::VALIDATE,
        entity_types::DOCUMENT,
        Some(document.id),
        Some(json!({
            "requirement_set_id": set.id,
            "requirement_set_name": set.name,
            "passed": summary.passed,
            "failed": summary.failed,
            "missing": summary.missing,
        })),
    )
    .await;

    Ok(Json(DataResponse {
        data: ValidationReport {
            document_id: document.id,
            requirement_set_id: set.id,
            results: outcome.results,
            summary,
            chain: describe_chain(&rule_set),
        },
    }))
}
