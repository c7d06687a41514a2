//! Audit trail writes for handler mutations.
//!
//! Recording never fails the originating request: insert errors are logged
//! and dropped.

use coi_core::types::DbId;
use coi_db::models::audit::CreateAuditLog;
use coi_db::repositories::AuditLogRepo;
use coi_db::DbPool;
use uuid::Uuid;

/// Append an audit entry, logging instead of propagating any failure.
pub async fn record(
    pool: &DbPool,
    user_id: Uuid,
    action_type: &str,
    entity_type: &str,
    entity_id: Option<DbId>,
    details: Option<serde_json::Value>,
) {
    let entry = CreateAuditLog {
        user_id: Some(user_id),
        action_type: action_type.to_string(),
        entity_type: entity_type.to_string(),
        entity_id,
        details_json: details,
    };

    if let Err(e) = AuditLogRepo::insert(pool, &entry).await {
        tracing::warn!(
            error = %e,
            %user_id,
            action_type,
            entity_type,
            ?entity_id,
            "Failed to write audit log entry"
        );
    }
}
