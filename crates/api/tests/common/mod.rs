#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use coi_api::config::{ExtractionConfig, ServerConfig};
use coi_api::extraction::{ExtractionError, ExtractionSource, SampleAwareExtractor};
use coi_api::middleware::identity::USER_ID_HEADER;
use coi_api::routes;
use coi_api::state::AppState;
use coi_core::extraction::ExtractionPayload;
use coi_db::models::document::Document;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

/// Caller used by the plain request helpers.
pub const TEST_USER: Uuid = Uuid::from_u128(0x6f1c_2d3e_4a5b_4c6d_8e7f_9012_3456_7890);

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        extraction: ExtractionConfig {
            gateway_url: "http://127.0.0.1:9".to_string(),
            api_key: None,
            model: "test-model".to_string(),
            timeout_secs: 1,
        },
    }
}

/// Stand-in for the AI gateway.
pub enum FakeGateway {
    /// Answers every request with this payload.
    Payload(ExtractionPayload),
    RateLimited,
    CreditsRequired,
    InvalidResponse,
}

#[async_trait]
impl ExtractionSource for FakeGateway {
    async fn extract(&self, _document: &Document) -> Result<ExtractionPayload, ExtractionError> {
        match self {
            FakeGateway::Payload(payload) => Ok(payload.clone()),
            FakeGateway::RateLimited => Err(ExtractionError::RateLimited),
            FakeGateway::CreditsRequired => Err(ExtractionError::CreditsRequired),
            FakeGateway::InvalidResponse => Err(ExtractionError::InvalidResponse(
                "Invalid AI response format: expected value at line 1 column 1".to_string(),
            )),
        }
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Non-sample documents hit a rate-limited fake gateway.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_gateway(pool, FakeGateway::RateLimited)
}

/// Like [`build_test_app`] with a chosen fake gateway behind the sample
/// certificate short-circuit.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app_with_gateway(pool: PgPool, gateway: FakeGateway) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        extractor: Arc::new(SampleAwareExtractor::new(Arc::new(gateway))),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static(USER_ID_HEADER),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send one request through the router.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    user: Option<Uuid>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user.to_string());
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, Some(TEST_USER), None).await
}

pub async fn get_as(app: Router, uri: &str, user: Uuid) -> Response {
    send(app, Method::GET, uri, Some(user), None).await
}

pub async fn get_anonymous(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(TEST_USER), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(TEST_USER), Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, Some(TEST_USER), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, Some(TEST_USER), None).await
}

/// Collect a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a requirement set as [`TEST_USER`] and return its id.
pub async fn create_set(pool: &PgPool, name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/requirement-sets",
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Add a rule to a set and return its id.
pub async fn add_rule(pool: &PgPool, set_id: i64, rule: serde_json::Value) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/requirement-sets/{set_id}/rules"),
        rule,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Register a PDF document as [`TEST_USER`] and return its id.
pub async fn register_document(pool: &PgPool, file_name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/documents",
        serde_json::json!({
            "file_name": file_name,
            "file_url": format!("https://storage.example.test/certificates/{file_name}"),
            "mime_type": "application/pdf",
            "file_size": 184320,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
