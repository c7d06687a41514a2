//! HTTP-level integration tests for documents, extraction and validation.

mod common;

use axum::http::StatusCode;
use coi_core::samples::sample_for_file;
use common::{
    add_rule, body_json, create_set, delete, get, post_empty, post_json, put_json,
    register_document, FakeGateway,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_document_returns_201_with_uploaded_status(pool: PgPool) {
    let id = register_document(&pool, "Example2.pdf").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/documents/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["file_name"], "Example2.pdf");
    assert_eq!(json["data"]["status"], "uploaded");
    assert!(json["data"]["extracted_data"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unsupported_file_type_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/documents",
        json!({
            "file_name": "certificate.docx",
            "file_url": "https://storage.example.test/certificate.docx",
            "mime_type": "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "file_size": 2048,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_file_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/documents",
        json!({
            "file_name": "scan.png",
            "file_url": "https://storage.example.test/scan.png",
            "mime_type": "image/png",
            "file_size": 10 * 1024 * 1024 + 1,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rename_and_delete_document(pool: PgPool) {
    let id = register_document(&pool, "Example2.pdf").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/documents/{id}"),
        json!({ "file_name": "GFH certificate 2025.pdf" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["file_name"], "GFH certificate 2025.pdf");

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/documents/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/documents/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sample_certificate_extracts_without_gateway(pool: PgPool) {
    let id = register_document(&pool, "Example2.pdf").await;

    let app = common::build_test_app(pool.clone());
    let response = post_empty(app, &format!("/api/v1/documents/{id}/extract")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["status"], "parsed");
    let extracted = &data["extracted_data"];
    assert_eq!(extracted["cancellation_notice_period"], "30");
    assert_eq!(extracted["coverages"]["general_liability"]["policy_number"], "654321");
    assert_eq!(extracted["coverages"]["trailer_liability"]["coverage_limit"], "85,000");
    assert_eq!(extracted["coverages"]["trailer_liability"]["deductible"], "5,000");

    // Listing carries the extracted data alongside each document.
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/documents").await;
    let json = body_json(response).await;
    let documents = json["data"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(
        documents[0]["extracted_data"]["coverages"]["auto_liability"]["policy_number"],
        "123456"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gateway_payload_is_folded_into_record(pool: PgPool) {
    let mut payload = sample_for_file("Example2.pdf").unwrap().payload();
    payload.named_insured = Some("Northern Haulage Inc.".to_string());
    payload.coverages[0].deductible_currency = None;
    payload.coverages[0].coverage_currency = Some("USD".to_string());
    let id = register_document(&pool, "northern-haulage.pdf").await;

    let app = common::build_test_app_with_gateway(pool, FakeGateway::Payload(payload));
    let response = post_empty(app, &format!("/api/v1/documents/{id}/extract")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let extracted = &json["data"]["extracted_data"];
    assert_eq!(extracted["named_insured"], "Northern Haulage Inc.");
    assert_eq!(
        extracted["coverages"]["general_liability"]["deductible_currency"],
        "USD"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rate_limited_extraction_returns_429_and_marks_failed(pool: PgPool) {
    let id = register_document(&pool, "scan.pdf").await;

    let app = common::build_test_app_with_gateway(pool.clone(), FakeGateway::RateLimited);
    let response = post_empty(app, &format!("/api/v1/documents/{id}/extract")).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body_json(response).await["code"], "RATE_LIMITED");

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/documents/{id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "failed");
    assert_eq!(
        json["data"]["error_message"],
        "Rate limit exceeded. Please try again later."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn exhausted_credits_return_402(pool: PgPool) {
    let id = register_document(&pool, "scan.pdf").await;

    let app = common::build_test_app_with_gateway(pool, FakeGateway::CreditsRequired);
    let response = post_empty(app, &format!("/api/v1/documents/{id}/extract")).await;
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn storage_failure_after_extraction_marks_failed(pool: PgPool) {
    let id = register_document(&pool, "Example2.pdf").await;

    sqlx::query(
        "CREATE FUNCTION reject_extracted_data() RETURNS trigger AS $$
         BEGIN
             RAISE EXCEPTION 'extracted_data is read-only';
         END
         $$ LANGUAGE plpgsql",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER trg_reject_extracted_data BEFORE INSERT ON extracted_data
         FOR EACH ROW EXECUTE FUNCTION reject_extracted_data()",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_empty(app, &format!("/api/v1/documents/{id}/extract")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/documents/{id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "failed");
    assert_eq!(
        json["data"]["error_message"],
        "Failed to store extracted certificate data"
    );
    assert!(json["data"]["extracted_data"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unparseable_completion_returns_502(pool: PgPool) {
    let id = register_document(&pool, "scan.pdf").await;

    let app = common::build_test_app_with_gateway(pool, FakeGateway::InvalidResponse);
    let response = post_empty(app, &format!("/api/v1/documents/{id}/extract")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "EXTRACTION_FAILED");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid AI response format"));
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sample_certificate_end_to_end(pool: PgPool) {
    let doc_id = register_document(&pool, "Example2.pdf").await;

    let app = common::build_test_app(pool.clone());
    let response = post_empty(app, &format!("/api/v1/documents/{doc_id}/extract")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let mut record = body_json(response).await["data"]["extracted_data"].clone();

    // Manual correction: the additional insured is cleared.
    record["additional_insured"] = json!("");
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/documents/{doc_id}/extracted-data"),
        record,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_id = create_set(&pool, "EDM Trailer Rentals").await;
    for rule in [
        json!({ "field_name": "gl_coverage_limits", "comparison_operator": "greater_than_or_equal", "expected_value": "1000000" }),
        json!({ "field_name": "gl_deductible_currency", "comparison_operator": "equal_to", "expected_value": "USD", "logical_operator": "or" }),
        json!({ "field_name": "additional_insured", "comparison_operator": "contains", "expected_value": "EDM Trailer Rentals" }),
        json!({ "field_name": "form_type", "comparison_operator": "contains", "expected_value": "ACORD", "enabled": false }),
    ] {
        add_rule(&pool, set_id, rule).await;
    }

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/documents/{doc_id}/validate"),
        json!({ "requirement_set_id": set_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let results = &json["data"]["results"];
    assert_eq!(results.as_object().unwrap().len(), 3);

    assert_eq!(results["gl_coverage_limits"]["status"], "pass");
    assert_eq!(results["gl_coverage_limits"]["message"], "2,000,000 ≥ 1,000,000");
    assert_eq!(results["gl_deductible_currency"]["status"], "fail");
    assert_eq!(results["gl_deductible_currency"]["message"], "Expected: USD");
    assert_eq!(results["additional_insured"]["status"], "missing");
    assert_eq!(results["additional_insured"]["message"], "Field is empty");
    assert!(results.get("form_type").is_none());

    let summary = &json["data"]["summary"];
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["passed"], 1);
    assert_eq!(summary["failed"], 1);
    assert_eq!(summary["missing"], 1);

    let chain = json["data"]["chain"].as_array().unwrap();
    assert_eq!(chain.len(), 3);
    assert_eq!(chain[0]["description"], "GL - Coverage Limits ≥ 1000000");
    assert_eq!(chain[0]["joiner"], "and");
    assert_eq!(chain[1]["joiner"], "or");
    assert!(chain[2].get("joiner").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn validating_without_extracted_data_returns_400(pool: PgPool) {
    let doc_id = register_document(&pool, "Example2.pdf").await;
    let set_id = create_set(&pool, "Standard").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/documents/{doc_id}/validate"),
        json!({ "requirement_set_id": set_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stale_field_key_fails_validation_loudly(pool: PgPool) {
    let doc_id = register_document(&pool, "Example2.pdf").await;
    let app = common::build_test_app(pool.clone());
    post_empty(app, &format!("/api/v1/documents/{doc_id}/extract")).await;

    let set_id = create_set(&pool, "Legacy").await;
    sqlx::query(
        "INSERT INTO requirements (requirement_set_id, field_name, comparison_operator, expected_value)
         VALUES ($1, 'umbrella_limit', 'greater_than', '5000000')",
    )
    .bind(set_id)
    .execute(&pool)
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/documents/{doc_id}/validate"),
        json!({ "requirement_set_id": set_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "UNKNOWN_FIELD");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_rule_set_yields_empty_results(pool: PgPool) {
    let doc_id = register_document(&pool, "Example2.pdf").await;
    let app = common::build_test_app(pool.clone());
    post_empty(app, &format!("/api/v1/documents/{doc_id}/extract")).await;
    let set_id = create_set(&pool, "Empty").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/documents/{doc_id}/validate"),
        json!({ "requirement_set_id": set_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["results"].as_object().unwrap().is_empty());
    assert_eq!(json["data"]["summary"]["total"], 0);
}
