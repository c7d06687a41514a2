//! Client for an OpenAI-compatible chat completions gateway.

use std::time::Duration;

use async_trait::async_trait;
use coi_core::error::CoreError;
use coi_core::extraction::{parse_completion, ExtractionPayload};
use coi_db::models::document::Document;
use serde::Deserialize;
use serde_json::json;

use super::{ExtractionError, ExtractionSource};
use crate::config::ExtractionConfig;

const SYSTEM_PROMPT: &str = "\
You are an expert at extracting data from insurance certificates and covernotes.
Extract the following information and return it as JSON:
- named_insured: string
- certificate_holder: string
- additional_insured: string
- cancellation_notice_period: string
- form_type: string
- coverages: array of objects with structure:
  {
    type: string (e.g., \"Commercial General Liability\", \"Automobile Liability\", \"Non-Owned Trailer Liability\"),
    insurance_company: string,
    policy_number: string,
    coverage_limit: string,
    coverage_currency: string,
    deductible_limit: string,
    deductible_currency: string,
    effective_date: string (ISO format),
    expiry_date: string (ISO format)
  }

Return ONLY valid JSON, no additional text.";

/// Extracts certificate data by prompting a hosted model.
pub struct GatewayExtractor {
    client: reqwest::Client,
    config: ExtractionConfig,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl GatewayExtractor {
    /// Build a client with the configured request timeout.
    pub fn new(config: ExtractionConfig) -> Result<Self, ExtractionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.config.gateway_url)
    }

    fn request_body(&self, document: &Document) -> serde_json::Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!("Parse this insurance certificate: {}", document.file_url),
                },
            ],
        })
    }

    /// Map the gateway's non-2xx statuses onto extraction errors.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ExtractionError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        match status.as_u16() {
            429 => Err(ExtractionError::RateLimited),
            402 => Err(ExtractionError::CreditsRequired),
            code => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<unreadable body>".to_string());
                Err(ExtractionError::Upstream { status: code, body })
            }
        }
    }
}

#[async_trait]
impl ExtractionSource for GatewayExtractor {
    async fn extract(&self, document: &Document) -> Result<ExtractionPayload, ExtractionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ExtractionError::NotConfigured("AI_GATEWAY_API_KEY is not set".into()))?;

        tracing::info!(document_id = document.id, model = %self.config.model, "Requesting certificate extraction");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&self.request_body(document))
            .send()
            .await?;

        let completion: ChatCompletion = Self::ensure_success(response).await?.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ExtractionError::InvalidResponse("Invalid AI response format: empty completion".into()))?;

        tracing::debug!(document_id = document.id, chars = content.len(), "Extraction completion received");

        parse_completion(&content).map_err(|e| match e {
            CoreError::Validation(msg) => ExtractionError::InvalidResponse(msg),
            other => ExtractionError::InvalidResponse(other.to_string()),
        })
    }
}
