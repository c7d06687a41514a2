//! Audit log entity model and DTOs.
//!
//! Audit logs are append-only and have no `updated_at` column.

use coi_core::audit::AuditCsvRow;
use coi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Default and maximum page sizes for audit log listings.
pub const DEFAULT_AUDIT_LIMIT: i64 = 100;
pub const MAX_AUDIT_LIMIT: i64 = 500;

/// A single audit log entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub timestamp: Timestamp,
    pub user_id: Option<Uuid>,
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub details_json: Option<serde_json::Value>,
}

impl AuditLog {
    pub fn as_csv_row(&self) -> AuditCsvRow<'_> {
        AuditCsvRow {
            timestamp: self.timestamp,
            action_type: &self.action_type,
            entity_type: &self.entity_type,
            entity_id: self.entity_id,
            details: self.details_json.as_ref(),
        }
    }
}

/// DTO for inserting an audit log entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub user_id: Option<Uuid>,
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub details_json: Option<serde_json::Value>,
}

/// Query parameters for listing audit logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    pub limit: Option<i64>,
}

impl AuditQuery {
    /// Requested limit clamped to `1..=MAX_AUDIT_LIMIT`.
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_AUDIT_LIMIT)
            .clamp(1, MAX_AUDIT_LIMIT)
    }
}
