//! Requirement (single rule) entity model and DTOs.
//!
//! Field keys and operators are stored as text. Operators are constrained by
//! CHECK constraints; field keys are validated against the registry on write
//! and again when a set is evaluated.

use coi_core::error::CoreError;
use coi_core::requirements::operators::{ComparisonOperator, LogicalOperator};
use coi_core::requirements::rules::Rule;
use coi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `requirements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Requirement {
    pub id: DbId,
    pub requirement_set_id: DbId,
    pub field_name: String,
    pub comparison_operator: String,
    pub expected_value: String,
    pub logical_operator: String,
    pub enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Requirement {
    /// Convert the stored row into an evaluable rule.
    pub fn to_rule(&self) -> Result<Rule, CoreError> {
        Ok(Rule {
            field_key: self.field_name.parse()?,
            operator: self.comparison_operator.parse()?,
            expected_value: self.expected_value.clone(),
            logical_operator: self.logical_operator.parse()?,
            enabled: self.enabled,
        })
    }
}

/// DTO for adding a rule to a set.
///
/// `field_name` stays a plain string so an unknown key can be reported as
/// `UNKNOWN_FIELD` rather than a body deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequirement {
    pub field_name: String,
    pub comparison_operator: ComparisonOperator,
    #[serde(default)]
    pub expected_value: String,
    /// Defaults to `and` if omitted.
    pub logical_operator: Option<LogicalOperator>,
    /// Defaults to `true` if omitted.
    pub enabled: Option<bool>,
}

/// DTO for updating a rule. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequirement {
    pub field_name: Option<String>,
    pub comparison_operator: Option<ComparisonOperator>,
    pub expected_value: Option<String>,
    pub logical_operator: Option<LogicalOperator>,
    pub enabled: Option<bool>,
}
