//! Repository for the `extracted_data` table.
//!
//! One row per document, enforced by `uq_extracted_data_document_id`.

use coi_core::extraction::ExtractedRecord;
use coi_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::extracted_data::ExtractedData;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, document_id, named_insured, certificate_holder, \
    additional_insured, cancellation_notice_period, form_type, coverages, \
    created_at, updated_at";

/// Provides read and upsert operations for extracted certificate data.
pub struct ExtractedDataRepo;

impl ExtractedDataRepo {
    /// Store the record for a document, replacing any previous extraction.
    pub async fn upsert(
        pool: &PgPool,
        document_id: DbId,
        record: &ExtractedRecord,
    ) -> Result<ExtractedData, sqlx::Error> {
        let query = format!(
            "INSERT INTO extracted_data
                (document_id, named_insured, certificate_holder, additional_insured,
                 cancellation_notice_period, form_type, coverages)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT ON CONSTRAINT uq_extracted_data_document_id DO UPDATE SET
                named_insured = EXCLUDED.named_insured,
                certificate_holder = EXCLUDED.certificate_holder,
                additional_insured = EXCLUDED.additional_insured,
                cancellation_notice_period = EXCLUDED.cancellation_notice_period,
                form_type = EXCLUDED.form_type,
                coverages = EXCLUDED.coverages
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExtractedData>(&query)
            .bind(document_id)
            .bind(&record.named_insured)
            .bind(&record.certificate_holder)
            .bind(&record.additional_insured)
            .bind(&record.cancellation_notice_period)
            .bind(&record.form_type)
            .bind(Json(&record.coverages))
            .fetch_one(pool)
            .await
    }

    /// Find the record stored for a document.
    pub async fn find_by_document(
        pool: &PgPool,
        document_id: DbId,
    ) -> Result<Option<ExtractedData>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM extracted_data WHERE document_id = $1");
        sqlx::query_as::<_, ExtractedData>(&query)
            .bind(document_id)
            .fetch_optional(pool)
            .await
    }

    /// Records for several documents at once, for list views.
    pub async fn list_for_documents(
        pool: &PgPool,
        document_ids: &[DbId],
    ) -> Result<Vec<ExtractedData>, sqlx::Error> {
        if document_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM extracted_data WHERE document_id = ANY($1)");
        sqlx::query_as::<_, ExtractedData>(&query)
            .bind(document_ids)
            .fetch_all(pool)
            .await
    }
}
