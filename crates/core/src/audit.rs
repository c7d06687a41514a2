//! Audit logging constants and export helpers.
//!
//! Lives in `core` so handlers and any future tooling agree on the action and
//! entity vocabulary stored in `audit_logs`.

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Known action types for audit log entries.
pub mod action_types {
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
    pub const EXTRACT: &str = "extract";
    pub const VALIDATE: &str = "validate";
    pub const EXPORT: &str = "export";
}

/// Known entity types for audit log entries.
pub mod entity_types {
    pub const DOCUMENT: &str = "document";
    pub const EXTRACTED_DATA: &str = "extracted_data";
    pub const REQUIREMENT_SET: &str = "requirement_set";
    pub const REQUIREMENT: &str = "requirement";
    pub const AUDIT_LOG: &str = "audit_log";
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Header line of the audit CSV export.
pub const CSV_HEADER: &str = "\"Timestamp\",\"Action\",\"Entity Type\",\"Entity ID\",\"Details\"";

/// The columns of one exported audit entry.
#[derive(Debug, Clone, Copy)]
pub struct AuditCsvRow<'a> {
    pub timestamp: Timestamp,
    pub action_type: &'a str,
    pub entity_type: &'a str,
    pub entity_id: Option<DbId>,
    pub details: Option<&'a serde_json::Value>,
}

/// Quote a CSV cell, doubling embedded quotes.
pub fn csv_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render rows as a CSV document with [`CSV_HEADER`].
pub fn render_csv<'a>(rows: impl IntoIterator<Item = AuditCsvRow<'a>>) -> String {
    let mut out = String::from(CSV_HEADER);
    for row in rows {
        let details = row.details.map(|d| d.to_string()).unwrap_or_default();
        let entity_id = row.entity_id.map(|id| id.to_string()).unwrap_or_default();
        out.push('\n');
        out.push_str(
            &[
                csv_cell(&row.timestamp.to_rfc3339()),
                csv_cell(row.action_type),
                csv_cell(row.entity_type),
                csv_cell(&entity_id),
                csv_cell(&details),
            ]
            .join(","),
        );
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn cell_quotes_are_doubled() {
        assert_eq!(csv_cell(r#"{"a":"b"}"#), r#""{""a"":""b""}""#);
        assert_eq!(csv_cell(""), "\"\"");
    }

    #[test]
    fn renders_header_and_rows() {
        let ts = chrono::Utc.with_ymd_and_hms(2025, 11, 24, 9, 30, 0).unwrap();
        let details = json!({"file_name": "Example2.pdf"});
        let csv = render_csv([
            AuditCsvRow {
                timestamp: ts,
                action_type: action_types::CREATE,
                entity_type: entity_types::DOCUMENT,
                entity_id: Some(12),
                details: Some(&details),
            },
            AuditCsvRow {
                timestamp: ts,
                action_type: action_types::EXPORT,
                entity_type: entity_types::AUDIT_LOG,
                entity_id: None,
                details: None,
            },
        ]);

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            r#""2025-11-24T09:30:00+00:00","create","document","12","{""file_name"":""Example2.pdf""}""#
        );
        assert_eq!(lines[2], r#""2025-11-24T09:30:00+00:00","export","audit_log","","""#);
    }
}
