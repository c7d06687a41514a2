//! Certificate data extraction.
//!
//! [`ExtractionSource`] is the seam between the API and whatever turns an
//! uploaded certificate into an [`ExtractionPayload`]. Production wires a
//! [`SampleAwareExtractor`] around a [`GatewayExtractor`]; tests substitute
//! their own sources.

pub mod gateway;
pub mod sample;

use async_trait::async_trait;
use coi_core::extraction::ExtractionPayload;
use coi_db::models::document::Document;

pub use gateway::GatewayExtractor;
pub use sample::SampleAwareExtractor;

/// Errors from certificate extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// No gateway credentials are configured.
    #[error("Extraction gateway is not configured: {0}")]
    NotConfigured(String),

    /// The gateway answered 429.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// The gateway answered 402.
    #[error("AI credits required. Please add funds to your workspace.")]
    CreditsRequired,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned another non-2xx status code.
    #[error("Extraction gateway error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The completion was not the JSON document the prompt asks for.
    #[error("{0}")]
    InvalidResponse(String),
}

/// Produces structured certificate data for a stored document.
#[async_trait]
pub trait ExtractionSource: Send + Sync + 'static {
    async fn extract(&self, document: &Document) -> Result<ExtractionPayload, ExtractionError>;
}
