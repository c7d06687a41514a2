//! Certificate document entity model and DTOs.

use coi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::extracted_data::ExtractedData;

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub owner_id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub mime_type: String,
    pub file_size: i64,
    /// One of the `coi_core::documents::STATUS_*` values.
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering an uploaded document.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocument {
    pub file_name: String,
    pub file_url: String,
    pub mime_type: String,
    pub file_size: i64,
}

/// DTO for updating a document. Only the display name is editable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDocument {
    pub file_name: Option<String>,
}

/// A document with its extracted record, if extraction has run.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentWithData {
    #[serde(flatten)]
    pub document: Document,
    pub extracted_data: Option<ExtractedData>,
}
