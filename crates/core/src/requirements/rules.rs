//! Requirement rule, rule set and result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::operators::{ComparisonOperator, LogicalOperator};
use crate::fields::FieldKey;
use crate::types::DbId;

/// One comparison constraint on one certificate field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub field_key: FieldKey,
    pub operator: ComparisonOperator,
    pub expected_value: String,
    /// Joins this rule to the next one for display. Does not change scoring.
    #[serde(default)]
    pub logical_operator: LogicalOperator,
    /// Disabled rules stay in the set but are skipped by evaluation.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Rule {
    pub fn new(
        field_key: FieldKey,
        operator: ComparisonOperator,
        expected_value: impl Into<String>,
    ) -> Self {
        Self {
            field_key,
            operator,
            expected_value: expected_value.into(),
            logical_operator: LogicalOperator::default(),
            enabled: true,
        }
    }
}

/// A named, ordered collection of rules.
///
/// Order only matters for displaying the logical-operator chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub rules: Vec<Rule>,
}

/// Outcome of one rule against one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Pass,
    Fail,
    /// The field had no usable value. Reported as data, never as an error.
    Missing,
}

impl ValidationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStatus::Pass => "pass",
            ValidationStatus::Fail => "fail",
            ValidationStatus::Missing => "missing",
        }
    }

    pub(crate) fn from_bool(passed: bool) -> Self {
        if passed {
            ValidationStatus::Pass
        } else {
            ValidationStatus::Fail
        }
    }
}

/// Per-field verdict with an optional human-readable explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub field_key: FieldKey,
    pub status: ValidationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Results of a rule set keyed by field, iterated in registry order.
pub type ValidationMap = BTreeMap<FieldKey, ValidationResult>;

/// Tally of statuses for display. A count, not a verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub missing: usize,
}

impl ValidationSummary {
    pub fn from_results(results: &ValidationMap) -> Self {
        results.values().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            match r.status {
                ValidationStatus::Pass => acc.passed += 1,
                ValidationStatus::Fail => acc.failed += 1,
                ValidationStatus::Missing => acc.missing += 1,
            }
            acc
        })
    }
}
