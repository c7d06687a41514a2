use std::sync::Arc;

use crate::config::ServerConfig;
use crate::extraction::ExtractionSource;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: coi_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Source of structured data for uploaded certificates.
    pub extractor: Arc<dyn ExtractionSource>,
}
