//! Extracted certificate data model.
//!
//! Top-level slots are columns; the per-class coverage sections live in a
//! single JSONB `coverages` column shaped like [`CoverageSet`].

use coi_core::error::CoreError;
use coi_core::extraction::{CoverageSet, ExtractedRecord};
use coi_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `extracted_data` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExtractedData {
    pub id: DbId,
    pub document_id: DbId,
    pub named_insured: Option<String>,
    pub certificate_holder: Option<String>,
    pub additional_insured: Option<String>,
    pub cancellation_notice_period: Option<String>,
    pub form_type: Option<String>,
    pub coverages: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ExtractedData {
    /// Rebuild the core record from this row.
    pub fn to_record(&self) -> Result<ExtractedRecord, CoreError> {
        let coverages: CoverageSet = serde_json::from_value(self.coverages.clone())
            .map_err(|e| CoreError::Internal(format!("Malformed coverages for document {}: {e}", self.document_id)))?;
        Ok(ExtractedRecord {
            named_insured: self.named_insured.clone(),
            certificate_holder: self.certificate_holder.clone(),
            additional_insured: self.additional_insured.clone(),
            cancellation_notice_period: self.cancellation_notice_period.clone(),
            form_type: self.form_type.clone(),
            coverages,
        })
    }
}
