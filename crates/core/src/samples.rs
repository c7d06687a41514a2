//! Built-in sample certificates.
//!
//! Extraction answers with a fixed payload for documents whose file name
//! matches a sample, so the full upload → extract → validate flow can be
//! exercised without calling the AI service.

use crate::extraction::{CoveragePayload, ExtractedRecord, ExtractionPayload};

/// A known certificate with a fixed extraction result.
#[derive(Debug, Clone, Copy)]
pub struct SampleCertificate {
    pub id: &'static str,
    pub name: &'static str,
    pub file_name: &'static str,
    build: fn() -> ExtractionPayload,
}

impl SampleCertificate {
    pub fn payload(&self) -> ExtractionPayload {
        (self.build)()
    }
}

pub static SAMPLE_CERTIFICATES: &[SampleCertificate] = &[SampleCertificate {
    id: "example2",
    name: "Example 2 - General Freight Hauling Ltd.",
    file_name: "Example2.pdf",
    build: general_freight_hauling,
}];

/// Find the sample registered under a file name (exact match).
pub fn sample_for_file(file_name: &str) -> Option<&'static SampleCertificate> {
    SAMPLE_CERTIFICATES.iter().find(|s| s.file_name == file_name)
}

/// The General Freight Hauling certificate as an extracted record.
pub fn sample_record() -> ExtractedRecord {
    ExtractedRecord::from_payload(general_freight_hauling())
}

fn coverage(kind: &str, policy: &str, limit: &str, deductible: &str) -> CoveragePayload {
    CoveragePayload {
        coverage_type: Some(kind.to_string()),
        insurance_company: Some("Intact Insurance Co.".to_string()),
        policy_number: Some(policy.to_string()),
        coverage_limit: Some(limit.to_string()),
        coverage_currency: Some("CAD".to_string()),
        deductible_limit: Some(deductible.to_string()),
        deductible_currency: Some("CAD".to_string()),
        effective_date: Some("2025-11-24".to_string()),
        expiry_date: Some("2026-11-24".to_string()),
    }
}

fn general_freight_hauling() -> ExtractionPayload {
    ExtractionPayload {
        named_insured: Some(
            "General Freight Hauling Ltd.\n9623 25 Ave NW, Edmonton, AB, T6N 1H7".to_string(),
        ),
        certificate_holder: Some("EDM Trailer Rentals Ltd.\n9623 25 Ave NW, Edmonton, AB".to_string()),
        additional_insured: Some("Edm Trailer Rentals Ltd.\n9623 25 Ave NW, Edmonton, AB".to_string()),
        cancellation_notice_period: Some("30".to_string()),
        form_type: Some("CSIO C0910ECL - CERTIFICATE OF LIABILITY INSURANCE - 2010/09".to_string()),
        coverages: vec![
            coverage("Commercial General Liability", "654321", "2,000,000", "0"),
            coverage("Automobile Liability", "123456", "2,000,000", "0"),
            coverage("Non-Owned Trailer Liability", "123456", "85,000", "5,000"),
        ],
    }
}
