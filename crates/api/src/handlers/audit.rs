//! Handlers for the caller's audit trail.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coi_core::audit::{action_types, entity_types, render_csv};
use coi_db::models::audit::{AuditLog, AuditQuery};
use coi_db::repositories::AuditLogRepo;
use serde::Serialize;
use serde_json::json;

use crate::audit;
use crate::error::AppResult;
use crate::middleware::identity::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// A page of audit entries with the caller's total entry count.
#[derive(Debug, Serialize)]
pub struct AuditLogPage {
    pub items: Vec<AuditLog>,
    pub total: i64,
}

/// GET /api/v1/audit-logs?limit=N
///
/// Newest first; `limit` defaults to 100 and is capped at 500.
pub async fn list(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Query(params): Query<AuditQuery>,
) -> AppResult<Json<DataResponse<AuditLogPage>>> {
    let items =
        AuditLogRepo::list_recent(&state.pool, caller.user_id, params.effective_limit()).await?;
    let total = AuditLogRepo::count(&state.pool, caller.user_id).await?;
    Ok(Json(DataResponse {
        data: AuditLogPage { items, total },
    }))
}

/// GET /api/v1/audit-logs/export?limit=N
///
/// The same window as the listing, as a CSV attachment.
pub async fn export(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Query(params): Query<AuditQuery>,
) -> AppResult<Response> {
    let logs =
        AuditLogRepo::list_recent(&state.pool, caller.user_id, params.effective_limit()).await?;
    let csv = render_csv(logs.iter().map(AuditLog::as_csv_row));

    audit::record(
        &state.pool,
        caller.user_id,
        action_types::EXPORT,
        entity_types::AUDIT_LOG,
        None,
        Some(json!({ "entries": logs.len() })),
    )
    .await;

    let file_name = format!("audit-logs-{}.csv", chrono::Utc::now().format("%Y-%m-%d"));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
