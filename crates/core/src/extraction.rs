//! Extracted certificate records and the AI extraction payload.
//!
//! The extraction service answers with a loosely structured JSON document
//! ([`ExtractionPayload`]) listing coverages as an array of typed entries.
//! [`ExtractedRecord::from_payload`] folds it into the fixed shape the field
//! registry reads from: top-level slots plus one [`CoverageRecord`] per
//! [`CoverageClass`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Coverage classes
// ---------------------------------------------------------------------------

/// The coverage sections a certificate can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageClass {
    GeneralLiability,
    AutoLiability,
    TrailerLiability,
}

impl CoverageClass {
    pub const ALL: [CoverageClass; 3] = [
        CoverageClass::GeneralLiability,
        CoverageClass::AutoLiability,
        CoverageClass::TrailerLiability,
    ];

    /// Field key prefix (`gl`, `auto`, `trailer`).
    pub fn prefix(self) -> &'static str {
        match self {
            CoverageClass::GeneralLiability => "gl",
            CoverageClass::AutoLiability => "auto",
            CoverageClass::TrailerLiability => "trailer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CoverageClass::GeneralLiability => "Commercial General Liability",
            CoverageClass::AutoLiability => "Automobile Liability",
            CoverageClass::TrailerLiability => "Non-Owned Trailer Liability",
        }
    }

    /// Classify a free-text coverage type as written on the certificate.
    ///
    /// Trailer is checked first because "Non-Owned Trailer Liability" forms
    /// often mention automobiles as well.
    pub fn classify(coverage_type: &str) -> Option<Self> {
        let lower = coverage_type.to_lowercase();
        if lower.contains("trailer") {
            Some(CoverageClass::TrailerLiability)
        } else if lower.contains("auto") {
            Some(CoverageClass::AutoLiability)
        } else if lower.contains("general liability") || lower.contains("cgl") {
            Some(CoverageClass::GeneralLiability)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One coverage section of a certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageRecord {
    pub insurance_company: Option<String>,
    pub policy_number: Option<String>,
    pub coverage_limit: Option<String>,
    pub coverage_currency: Option<String>,
    pub deductible: Option<String>,
    pub deductible_currency: Option<String>,
    pub effective_date: Option<String>,
    pub expiry_date: Option<String>,
}

/// All coverage sections, keyed by class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageSet {
    pub general_liability: CoverageRecord,
    pub auto_liability: CoverageRecord,
    pub trailer_liability: CoverageRecord,
}

impl CoverageSet {
    pub fn get(&self, class: CoverageClass) -> &CoverageRecord {
        match class {
            CoverageClass::GeneralLiability => &self.general_liability,
            CoverageClass::AutoLiability => &self.auto_liability,
            CoverageClass::TrailerLiability => &self.trailer_liability,
        }
    }

    pub fn get_mut(&mut self, class: CoverageClass) -> &mut CoverageRecord {
        match class {
            CoverageClass::GeneralLiability => &mut self.general_liability,
            CoverageClass::AutoLiability => &mut self.auto_liability,
            CoverageClass::TrailerLiability => &mut self.trailer_liability,
        }
    }
}

/// Structured values pulled from one certificate. Immutable input to
/// evaluation; every slot may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedRecord {
    pub named_insured: Option<String>,
    pub certificate_holder: Option<String>,
    pub additional_insured: Option<String>,
    pub cancellation_notice_period: Option<String>,
    pub form_type: Option<String>,
    pub coverages: CoverageSet,
}

impl ExtractedRecord {
    pub fn coverage(&self, class: CoverageClass) -> &CoverageRecord {
        self.coverages.get(class)
    }

    /// Fold an extraction payload into a record.
    ///
    /// Coverage entries are classified by their `type` text; entries that fit
    /// no known class are dropped and the first entry of each class wins. A
    /// blank deductible currency inherits the coverage currency, since most
    /// certificates state a single currency per coverage line.
    pub fn from_payload(payload: ExtractionPayload) -> Self {
        let mut record = ExtractedRecord {
            named_insured: payload.named_insured,
            certificate_holder: payload.certificate_holder,
            additional_insured: payload.additional_insured,
            cancellation_notice_period: payload.cancellation_notice_period,
            form_type: payload.form_type,
            coverages: CoverageSet::default(),
        };

        let mut filled: Vec<CoverageClass> = Vec::with_capacity(CoverageClass::ALL.len());
        for entry in payload.coverages {
            let Some(class) = entry.coverage_type.as_deref().and_then(CoverageClass::classify)
            else {
                continue;
            };
            if filled.contains(&class) {
                continue;
            }
            filled.push(class);

            let deductible_currency = match entry.deductible_currency {
                Some(c) if !c.trim().is_empty() => Some(c),
                _ => entry.coverage_currency.clone(),
            };
            *record.coverages.get_mut(class) = CoverageRecord {
                insurance_company: entry.insurance_company,
                policy_number: entry.policy_number,
                coverage_limit: entry.coverage_limit,
                coverage_currency: entry.coverage_currency,
                deductible: entry.deductible_limit,
                deductible_currency,
                effective_date: entry.effective_date,
                expiry_date: entry.expiry_date,
            };
        }

        record
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// The JSON document the extraction prompt asks the model to emit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionPayload {
    #[serde(deserialize_with = "lenient_string")]
    pub named_insured: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub certificate_holder: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub additional_insured: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cancellation_notice_period: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub form_type: Option<String>,
    pub coverages: Vec<CoveragePayload>,
}

/// One entry of the payload's `coverages` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoveragePayload {
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub coverage_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub insurance_company: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub policy_number: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub coverage_limit: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub coverage_currency: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub deductible_limit: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub deductible_currency: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub effective_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub expiry_date: Option<String>,
}

/// Models occasionally emit numbers (`"coverage_limit": 2000000`) where the
/// prompt asks for strings; accept scalars and keep their textual form.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Parse the raw text of a model completion into a payload.
///
/// A surrounding Markdown code fence (` ```json ... ``` `) is tolerated.
pub fn parse_completion(text: &str) -> Result<ExtractionPayload, CoreError> {
    let body = strip_code_fence(text.trim());
    serde_json::from_str(body)
        .map_err(|e| CoreError::Validation(format!("Invalid AI response format: {e}")))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (`json`) up to the first newline.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
