//! Handlers for the `/documents` resource and certificate extraction.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use coi_core::audit::{action_types, entity_types};
use coi_core::documents::{
    validate_file_name, validate_file_size, validate_file_type, STATUS_FAILED, STATUS_PARSED,
    STATUS_PROCESSING,
};
use coi_core::error::CoreError;
use coi_core::extraction::ExtractedRecord;
use coi_core::types::DbId;
use coi_db::models::document::{CreateDocument, Document, DocumentWithData, UpdateDocument};
use coi_db::models::extracted_data::ExtractedData;
use coi_db::repositories::{DocumentRepo, ExtractedDataRepo};
use coi_db::DbPool;
use serde_json::json;
use uuid::Uuid;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::identity::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load one of the caller's documents or fail with 404.
pub(crate) async fn load_document(
    pool: &DbPool,
    owner_id: Uuid,
    id: DbId,
) -> AppResult<Document> {
    DocumentRepo::find_by_id(pool, owner_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))
}

/// Message stored on a document whose extraction failed.
///
/// Extraction errors are shown as-is; storage faults get a generic line.
fn failure_message(err: &AppError) -> String {
    match err {
        AppError::Extraction(e) => e.to_string(),
        _ => "Failed to store extracted certificate data".to_string(),
    }
}

/// POST /api/v1/documents
///
/// Registers a certificate that has already been uploaded to storage.
pub async fn create(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(mut input): Json<CreateDocument>,
) -> AppResult<(StatusCode, Json<DataResponse<Document>>)> {
    validate_file_name(&input.file_name)?;
    validate_file_type(&input.mime_type)?;
    validate_file_size(input.file_size)?;
    if input.file_url.trim().is_empty() {
        return Err(AppError::BadRequest("file_url is required".into()));
    }
    input.file_name = input.file_name.trim().to_string();

    let document = DocumentRepo::create(&state.pool, caller.user_id, &input).await?;
    tracing::info!(document_id = document.id, user_id = %caller.user_id, "Document registered");

    audit::record(
        &state.pool,
        caller.user_id,
        action_types::CREATE,
        entity_types::DOCUMENT,
        Some(document.id),
        Some(json!({
            "file_name": document.file_name,
            "mime_type": document.mime_type,
            "file_size": document.file_size,
        })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

/// GET /api/v1/documents
///
/// The caller's documents, newest first, each with its extracted data.
pub async fn list(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> AppResult<Json<DataResponse<Vec<DocumentWithData>>>> {
    let documents = DocumentRepo::list(&state.pool, caller.user_id).await?;
    let ids: Vec<DbId> = documents.iter().map(|d| d.id).collect();

    let mut extracted: HashMap<DbId, ExtractedData> =
        ExtractedDataRepo::list_for_documents(&state.pool, &ids)
            .await?
            .into_iter()
            .map(|row| (row.document_id, row))
            .collect();

    let data = documents
        .into_iter()
        .map(|document| DocumentWithData {
            extracted_data: extracted.remove(&document.id),
            document,
        })
        .collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DocumentWithData>>> {
    let document = load_document(&state.pool, caller.user_id, id).await?;
    let extracted_data = ExtractedDataRepo::find_by_document(&state.pool, document.id).await?;
    Ok(Json(DataResponse {
        data: DocumentWithData {
            document,
            extracted_data,
        },
    }))
}

/// PUT /api/v1/documents/{id}
pub async fn update(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateDocument>,
) -> AppResult<Json<DataResponse<Document>>> {
    if let Some(name) = input.file_name.as_mut() {
        validate_file_name(name)?;
        *name = name.trim().to_string();
    }

    let document = DocumentRepo::update(&state.pool, caller.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;

    audit::record(
        &state.pool,
        caller.user_id,
        action_types::UPDATE,
        entity_types::DOCUMENT,
        Some(document.id),
        Some(json!({ "file_name": document.file_name })),
    )
    .await;

    Ok(Json(DataResponse { data: document }))
}

/// DELETE /api/v1/documents/{id}
///
/// Removes the document and its extracted data.
pub async fn delete(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let document = load_document(&state.pool, caller.user_id, id).await?;
    DocumentRepo::delete(&state.pool, caller.user_id, document.id).await?;

    audit::record(
        &state.pool,
        caller.user_id,
        action_types::DELETE,
        entity_types::DOCUMENT,
        Some(document.id),
        Some(json!({ "file_name": document.file_name })),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/documents/{id}/extract
///
/// Runs extraction and stores the resulting record, replacing any earlier
/// one. The document moves to `processing`, then `parsed` or `failed`.
pub async fn extract(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DocumentWithData>>> {
    let document = load_document(&state.pool, caller.user_id, id).await?;
    DocumentRepo::set_status(&state.pool, document.id, STATUS_PROCESSING, None).await?;

    // Any failure from here on leaves the document `failed`, never `processing`.
    let outcome = async {
        let payload = state.extractor.extract(&document).await?;
        let coverage_count = payload.coverages.len();
        let record = ExtractedRecord::from_payload(payload);
        let extracted = ExtractedDataRepo::upsert(&state.pool, document.id, &record).await?;
        let parsed = DocumentRepo::set_status(&state.pool, document.id, STATUS_PARSED, None)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Document",
                id,
            }))?;
        Ok::<_, AppError>((parsed, extracted, record, coverage_count))
    }
    .await;

    let (document, extracted, record, coverage_count) = match outcome {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(document_id = document.id, error = %e, "Certificate extraction failed");
            let message = failure_message(&e);
            if let Err(db_err) =
                DocumentRepo::set_status(&state.pool, document.id, STATUS_FAILED, Some(&message))
                    .await
            {
                tracing::error!(document_id = document.id, error = %db_err, "Failed to mark document as failed");
            }
            return Err(e);
        }
    };

    tracing::info!(document_id = document.id, coverage_count, "Certificate parsed");

    audit::record(
        &state.pool,
        caller.user_id,
        action_types::EXTRACT,
        entity_types::DOCUMENT,
        Some(document.id),
        Some(json!({
            "file_name": document.file_name,
            "named_insured": record.named_insured,
            "coverage_count": coverage_count,
        })),
    )
    .await;

    Ok(Json(DataResponse {
        data: DocumentWithData {
            document,
            extracted_data: Some(extracted),
        },
    }))
}

/// PUT /api/v1/documents/{id}/extracted-data
///
/// Replaces the stored record with a manually corrected one.
pub async fn update_extracted_data(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<DbId>,
    Json(record): Json<ExtractedRecord>,
) -> AppResult<Json<DataResponse<ExtractedData>>> {
    let document = load_document(&state.pool, caller.user_id, id).await?;
    let extracted = ExtractedDataRepo::upsert(&state.pool, document.id, &record).await?;

    audit::record(
        &state.pool,
        caller.user_id,
        action_types::UPDATE,
        entity_types::EXTRACTED_DATA,
        Some(extracted.id),
        Some(json!({ "document_id": document.id, "named_insured": record.named_insured })),
    )
    .await;

    Ok(Json(DataResponse { data: extracted }))
}
