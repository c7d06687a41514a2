use axum::extract::State;
use axum::{routing::get, Json, Router};
use coi_core::samples::SAMPLE_CERTIFICATES;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub extraction: ExtractionHealth,
}

/// How certificate extraction is wired up.
///
/// Without an API key only the built-in sample certificates can be parsed;
/// the service itself stays `ok`.
#[derive(Serialize)]
pub struct ExtractionHealth {
    pub gateway_configured: bool,
    pub model: String,
    pub sample_certificates: usize,
}

/// GET /health -- database reachability and extraction setup.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = coi_db::health_check(&state.pool).await.is_ok();
    let status = if db_healthy { "ok" } else { "degraded" };

    let extraction = &state.config.extraction;
    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        extraction: ExtractionHealth {
            gateway_configured: extraction.api_key.is_some(),
            model: extraction.model.clone(),
            sample_certificates: SAMPLE_CERTIFICATES.len(),
        },
    })
}

/// Mount health check routes (root-level, outside `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
