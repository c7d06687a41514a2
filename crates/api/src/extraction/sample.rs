//! Built-in sample certificates short-circuit the gateway.

use std::sync::Arc;

use async_trait::async_trait;
use coi_core::extraction::ExtractionPayload;
use coi_core::samples::sample_for_file;
use coi_db::models::document::Document;

use super::{ExtractionError, ExtractionSource};

/// Answers with the canned payload when a document's file name matches a
/// sample certificate and delegates everything else.
pub struct SampleAwareExtractor {
    fallback: Arc<dyn ExtractionSource>,
}

impl SampleAwareExtractor {
    pub fn new(fallback: Arc<dyn ExtractionSource>) -> Self {
        Self { fallback }
    }
}

#[async_trait]
impl ExtractionSource for SampleAwareExtractor {
    async fn extract(&self, document: &Document) -> Result<ExtractionPayload, ExtractionError> {
        if let Some(sample) = sample_for_file(&document.file_name) {
            tracing::info!(document_id = document.id, sample = sample.id, "Using sample certificate data");
            return Ok(sample.payload());
        }
        self.fallback.extract(document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    struct Unreachable;

    #[async_trait]
    impl ExtractionSource for Unreachable {
        async fn extract(&self, _: &Document) -> Result<ExtractionPayload, ExtractionError> {
            Err(ExtractionError::RateLimited)
        }
    }

    fn document(file_name: &str) -> Document {
        Document {
            id: 1,
            owner_id: Uuid::new_v4(),
            file_name: file_name.to_string(),
            file_url: format!("https://storage.example.test/{file_name}"),
            mime_type: "application/pdf".to_string(),
            file_size: 2048,
            status: "processing".to_string(),
            error_message: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn sample_file_name_returns_canned_payload() {
        let extractor = SampleAwareExtractor::new(Arc::new(Unreachable));
        let payload = extractor.extract(&document("Example2.pdf")).await.unwrap();
        assert_eq!(payload.named_insured.as_deref(), Some("General Freight Hauling Ltd."));
        assert_eq!(payload.coverages.len(), 3);
    }

    #[tokio::test]
    async fn other_files_are_delegated() {
        let extractor = SampleAwareExtractor::new(Arc::new(Unreachable));
        let err = extractor.extract(&document("other.pdf")).await.unwrap_err();
        assert!(matches!(err, ExtractionError::RateLimited));
    }
}
