//! Repository for the `documents` table.

use coi_core::documents::STATUS_UPLOADED;
use coi_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::document::{CreateDocument, Document, UpdateDocument};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, file_name, file_url, mime_type, file_size, \
    status, error_message, created_at, updated_at";

/// Provides CRUD and status operations for certificate documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Register an uploaded document with status `uploaded`.
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        input: &CreateDocument,
    ) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (owner_id, file_name, file_url, mime_type, file_size, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(owner_id)
            .bind(&input.file_name)
            .bind(&input.file_url)
            .bind(&input.mime_type)
            .bind(input.file_size)
            .bind(STATUS_UPLOADED)
            .fetch_one(pool)
            .await
    }

    /// Find one of the owner's documents by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: Uuid,
        id: DbId,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List the owner's documents, most recently uploaded first.
    pub async fn list(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents WHERE owner_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a document. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        owner_id: Uuid,
        id: DbId,
        input: &UpdateDocument,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET file_name = COALESCE($3, file_name)
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.file_name)
            .fetch_optional(pool)
            .await
    }

    /// Move a document to a new processing status.
    ///
    /// `error_message` replaces the stored one, so passing `None` clears it.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        error_message: Option<&str>,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET status = $2, error_message = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(status)
            .bind(error_message)
            .fetch_optional(pool)
            .await
    }

    /// Delete a document and, by cascade, its extracted data.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, owner_id: Uuid, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
