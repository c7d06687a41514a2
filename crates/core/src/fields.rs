//! Certificate field registry.
//!
//! Every attribute a requirement rule can target is a [`FieldKey`]. The
//! registry ([`FIELD_REGISTRY`]) gives each key a stable string name, a human
//! label, a display category and a declared value kind. Registry order is the
//! display order used by rule editors and result tables.
//!
//! Resolving a key against an [`ExtractedRecord`] is an exhaustive `match`, so
//! adding a key without a lookup path does not compile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::extraction::{CoverageClass, ExtractedRecord};

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Top-level certificate attributes that are not tied to a coverage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeneralField {
    NamedInsured,
    CertificateHolder,
    AdditionalInsured,
    CancellationNoticePeriod,
    FormType,
}

impl GeneralField {
    pub const ALL: [GeneralField; 5] = [
        GeneralField::NamedInsured,
        GeneralField::CertificateHolder,
        GeneralField::AdditionalInsured,
        GeneralField::CancellationNoticePeriod,
        GeneralField::FormType,
    ];
}

/// Attributes repeated once per coverage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoverageField {
    CompanyName,
    PolicyNumber,
    CoverageLimits,
    CoverageCurrency,
    Deductible,
    DeductibleCurrency,
    EffectiveDate,
    ExpiryDate,
}

impl CoverageField {
    pub const ALL: [CoverageField; 8] = [
        CoverageField::CompanyName,
        CoverageField::PolicyNumber,
        CoverageField::CoverageLimits,
        CoverageField::CoverageCurrency,
        CoverageField::Deductible,
        CoverageField::DeductibleCurrency,
        CoverageField::EffectiveDate,
        CoverageField::ExpiryDate,
    ];
}

/// Stable identifier of one certificate attribute.
///
/// Serializes as its registry name (`"named_insured"`, `"gl_policy_number"`),
/// so it can be used directly as a JSON map key. The derived ordering matches
/// registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldKey {
    General(GeneralField),
    Coverage(CoverageClass, CoverageField),
}

impl FieldKey {
    /// Position of this key in [`FIELD_REGISTRY`].
    fn index(self) -> usize {
        match self {
            FieldKey::General(field) => field as usize,
            FieldKey::Coverage(class, field) => {
                GeneralField::ALL.len() + class as usize * CoverageField::ALL.len() + field as usize
            }
        }
    }

    /// The registry entry for this key.
    pub fn descriptor(self) -> &'static FieldDescriptor {
        &FIELD_REGISTRY[self.index()]
    }

    /// The registry name, e.g. `"gl_coverage_limits"`.
    pub fn as_str(self) -> &'static str {
        self.descriptor().name
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    /// All keys in registry (display) order.
    pub fn all() -> impl Iterator<Item = FieldKey> {
        FIELD_REGISTRY.iter().map(|d| d.key)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s).map(|d| d.key)
    }
}

impl TryFrom<String> for FieldKey {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldKey> for String {
    fn from(key: FieldKey) -> Self {
        key.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// Display grouping for the rule editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    General,
    GeneralLiability,
    AutoLiability,
    TrailerLiability,
}

impl FieldCategory {
    pub fn label(self) -> &'static str {
        match self {
            FieldCategory::General => "General Information",
            FieldCategory::GeneralLiability => "Commercial General Liability",
            FieldCategory::AutoLiability => "Automobile Liability",
            FieldCategory::TrailerLiability => "Non-Owned Trailer Liability",
        }
    }
}

/// Declared shape of a field's value. Informational; the comparator decides
/// numeric vs. lexical mode from the values themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Text,
    CurrencyAmount,
    Date,
    FreeForm,
}

/// One registry entry.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub key: FieldKey,
    #[serde(skip)]
    pub name: &'static str,
    pub label: &'static str,
    pub category: FieldCategory,
    pub kind: ValueKind,
}

const fn general(
    field: GeneralField,
    name: &'static str,
    label: &'static str,
    kind: ValueKind,
) -> FieldDescriptor {
    FieldDescriptor {
        key: FieldKey::General(field),
        name,
        label,
        category: FieldCategory::General,
        kind,
    }
}

const fn coverage(
    class: CoverageClass,
    field: CoverageField,
    name: &'static str,
    label: &'static str,
    kind: ValueKind,
) -> FieldDescriptor {
    let category = match class {
        CoverageClass::GeneralLiability => FieldCategory::GeneralLiability,
        CoverageClass::AutoLiability => FieldCategory::AutoLiability,
        CoverageClass::TrailerLiability => FieldCategory::TrailerLiability,
    };
    FieldDescriptor {
        key: FieldKey::Coverage(class, field),
        name,
        label,
        category,
        kind,
    }
}

use CoverageClass::{AutoLiability as Auto, GeneralLiability as Gl, TrailerLiability as Trailer};
use CoverageField as C;
use GeneralField as G;
use ValueKind::{CurrencyAmount, Date, FreeForm, Text};

/// The canonical field registry, in display order.
pub static FIELD_REGISTRY: [FieldDescriptor; 29] = [
    general(G::NamedInsured, "named_insured", "Named Insured", FreeForm),
    general(G::CertificateHolder, "certificate_holder", "Certificate Holder", FreeForm),
    general(G::AdditionalInsured, "additional_insured", "Additional Insured", FreeForm),
    general(
        G::CancellationNoticePeriod,
        "cancellation_notice_period",
        "Cancellation Notice Period",
        Text,
    ),
    general(G::FormType, "form_type", "Form Type", Text),
    // General Liability
    coverage(Gl, C::CompanyName, "gl_company_name", "GL - Company Name", Text),
    coverage(Gl, C::PolicyNumber, "gl_policy_number", "GL - Policy Number", Text),
    coverage(Gl, C::CoverageLimits, "gl_coverage_limits", "GL - Coverage Limits", CurrencyAmount),
    coverage(Gl, C::CoverageCurrency, "gl_coverage_currency", "GL - Coverage Currency", Text),
    coverage(Gl, C::Deductible, "gl_deductible", "GL - Deductible", CurrencyAmount),
    coverage(Gl, C::DeductibleCurrency, "gl_deductible_currency", "GL - Deductible Currency", Text),
    coverage(Gl, C::EffectiveDate, "gl_effective_date", "GL - Effective Date", Date),
    coverage(Gl, C::ExpiryDate, "gl_expiry_date", "GL - Expiry Date", Date),
    // Automobile Liability
    coverage(Auto, C::CompanyName, "auto_company_name", "Auto - Company Name", Text),
    coverage(Auto, C::PolicyNumber, "auto_policy_number", "Auto - Policy Number", Text),
    coverage(Auto, C::CoverageLimits, "auto_coverage_limits", "Auto - Coverage Limits", CurrencyAmount),
    coverage(Auto, C::CoverageCurrency, "auto_coverage_currency", "Auto - Coverage Currency", Text),
    coverage(Auto, C::Deductible, "auto_deductible", "Auto - Deductible", CurrencyAmount),
    coverage(Auto, C::DeductibleCurrency, "auto_deductible_currency", "Auto - Deductible Currency", Text),
    coverage(Auto, C::EffectiveDate, "auto_effective_date", "Auto - Effective Date", Date),
    coverage(Auto, C::ExpiryDate, "auto_expiry_date", "Auto - Expiry Date", Date),
    // Non-Owned Trailer Liability
    coverage(Trailer, C::CompanyName, "trailer_company_name", "Trailer - Company Name", Text),
    coverage(Trailer, C::PolicyNumber, "trailer_policy_number", "Trailer - Policy Number", Text),
    coverage(Trailer, C::CoverageLimits, "trailer_coverage_limits", "Trailer - Coverage Limits", CurrencyAmount),
    coverage(Trailer, C::CoverageCurrency, "trailer_coverage_currency", "Trailer - Coverage Currency", Text),
    coverage(Trailer, C::Deductible, "trailer_deductible", "Trailer - Deductible", CurrencyAmount),
    coverage(Trailer, C::DeductibleCurrency, "trailer_deductible_currency", "Trailer - Deductible Currency", Text),
    coverage(Trailer, C::EffectiveDate, "trailer_effective_date", "Trailer - Effective Date", Date),
    coverage(Trailer, C::ExpiryDate, "trailer_expiry_date", "Trailer - Expiry Date", Date),
];

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a registry name to its descriptor.
///
/// Unknown names are a configuration error (a rule pointing at a field that
/// no longer exists), so this fails instead of reporting the value missing.
pub fn resolve(name: &str) -> Result<&'static FieldDescriptor, CoreError> {
    FIELD_REGISTRY
        .iter()
        .find(|d| d.name == name)
        .ok_or_else(|| CoreError::UnknownField(name.to_string()))
}

/// Registry entries belonging to one category, in display order.
pub fn fields_in_category(category: FieldCategory) -> impl Iterator<Item = &'static FieldDescriptor> {
    FIELD_REGISTRY.iter().filter(move |d| d.category == category)
}

/// Read the raw value a key points at inside an extracted record.
pub fn lookup_value(record: &ExtractedRecord, key: FieldKey) -> Option<&str> {
    let value = match key {
        FieldKey::General(field) => match field {
            GeneralField::NamedInsured => &record.named_insured,
            GeneralField::CertificateHolder => &record.certificate_holder,
            GeneralField::AdditionalInsured => &record.additional_insured,
            GeneralField::CancellationNoticePeriod => &record.cancellation_notice_period,
            GeneralField::FormType => &record.form_type,
        },
        FieldKey::Coverage(class, field) => {
            let coverage = record.coverage(class);
            match field {
                CoverageField::CompanyName => &coverage.insurance_company,
                CoverageField::PolicyNumber => &coverage.policy_number,
                CoverageField::CoverageLimits => &coverage.coverage_limit,
                CoverageField::CoverageCurrency => &coverage.coverage_currency,
                CoverageField::Deductible => &coverage.deductible,
                CoverageField::DeductibleCurrency => &coverage.deductible_currency,
                CoverageField::EffectiveDate => &coverage.effective_date,
                CoverageField::ExpiryDate => &coverage.expiry_date,
            }
        }
    };
    value.as_deref()
}
