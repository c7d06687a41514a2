//! Comparison and logical operators used by requirement rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How a rule compares the extracted value with its expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    EqualTo,
    NotEqualTo,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Contains,
    NotContains,
}

impl ComparisonOperator {
    pub const ALL: [ComparisonOperator; 8] = [
        ComparisonOperator::EqualTo,
        ComparisonOperator::NotEqualTo,
        ComparisonOperator::GreaterThan,
        ComparisonOperator::LessThan,
        ComparisonOperator::GreaterThanOrEqual,
        ComparisonOperator::LessThanOrEqual,
        ComparisonOperator::Contains,
        ComparisonOperator::NotContains,
    ];

    /// Stored name, e.g. `"greater_than_or_equal"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOperator::EqualTo => "equal_to",
            ComparisonOperator::NotEqualTo => "not_equal_to",
            ComparisonOperator::GreaterThan => "greater_than",
            ComparisonOperator::LessThan => "less_than",
            ComparisonOperator::GreaterThanOrEqual => "greater_than_or_equal",
            ComparisonOperator::LessThanOrEqual => "less_than_or_equal",
            ComparisonOperator::Contains => "contains",
            ComparisonOperator::NotContains => "not_contains",
        }
    }

    /// Label shown in the rule editor.
    pub fn label(self) -> &'static str {
        match self {
            ComparisonOperator::EqualTo => "Equal to (=)",
            ComparisonOperator::NotEqualTo => "Not equal to (≠)",
            ComparisonOperator::GreaterThan => "Greater than (>)",
            ComparisonOperator::LessThan => "Less than (<)",
            ComparisonOperator::GreaterThanOrEqual => "Greater than or equal (≥)",
            ComparisonOperator::LessThanOrEqual => "Less than or equal (≤)",
            ComparisonOperator::Contains => "Contains",
            ComparisonOperator::NotContains => "Does not contain",
        }
    }

    /// Short form used when rendering a rule inline.
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::EqualTo => "=",
            ComparisonOperator::NotEqualTo => "≠",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::GreaterThanOrEqual => "≥",
            ComparisonOperator::LessThanOrEqual => "≤",
            ComparisonOperator::Contains => "contains",
            ComparisonOperator::NotContains => "does not contain",
        }
    }

    /// Relational operators are only defined over numbers.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            ComparisonOperator::GreaterThan
                | ComparisonOperator::LessThan
                | ComparisonOperator::GreaterThanOrEqual
                | ComparisonOperator::LessThanOrEqual
        )
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown comparison operator '{s}'")))
    }
}

/// How a rule joins the next rule in the displayed chain.
///
/// Advisory only: rule outcomes are scored independently. See
/// [`RuleChain`](super::chain::RuleChain).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
    Not,
}

impl LogicalOperator {
    pub const ALL: [LogicalOperator; 3] =
        [LogicalOperator::And, LogicalOperator::Or, LogicalOperator::Not];

    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
            LogicalOperator::Not => "not",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
            LogicalOperator::Not => "NOT",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown logical operator '{s}'")))
    }
}
