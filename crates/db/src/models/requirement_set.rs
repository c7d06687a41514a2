//! Requirement set entity model and DTOs.

use coi_core::error::CoreError;
use coi_core::requirements::rules::RuleSet;
use coi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::requirement::Requirement;

/// A row from the `requirement_sets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RequirementSet {
    pub id: DbId,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RequirementSet {
    /// Assemble the evaluable rule set from this row and its stored rules.
    ///
    /// Fails with [`CoreError::UnknownField`] if any rule names a field key
    /// the registry no longer knows.
    pub fn to_rule_set(&self, requirements: &[Requirement]) -> Result<RuleSet, CoreError> {
        let rules = requirements
            .iter()
            .map(Requirement::to_rule)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RuleSet {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            rules,
        })
    }
}

/// DTO for creating a requirement set.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequirementSet {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating a requirement set. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequirementSet {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A set together with its rules in stored order.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementSetWithRules {
    #[serde(flatten)]
    pub set: RequirementSet,
    pub rules: Vec<Requirement>,
}
