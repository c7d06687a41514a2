//! Logical-operator chain between consecutive rules.
//!
//! Each rule carries an `and` / `or` / `not` joiner to the next rule. Today
//! the joiners are display metadata: rules are scored one by one and no
//! combined verdict is produced. [`RuleChain`] is the seam where a boolean
//! combinator can be plugged in later without touching [`Rule`] or
//! [`RuleSet`].

use serde::Serialize;

use super::evaluator::evaluate_rule;
use super::operators::LogicalOperator;
use super::rules::{Rule, RuleSet, ValidationMap, ValidationStatus};
use crate::extraction::ExtractedRecord;
use crate::fields::FieldKey;

/// One rule's outcome together with the joiner to the following rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainLink {
    pub field_key: FieldKey,
    pub status: ValidationStatus,
    pub joiner: LogicalOperator,
}

/// Combines per-rule outcomes along the logical-operator chain.
pub trait RuleChain {
    /// Combined verdict for the chain, or `None` when the policy produces none.
    fn combine(&self, links: &[ChainLink]) -> Option<ValidationStatus>;
}

/// The current policy: joiners are advisory and nothing is combined.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvisoryChain;

impl RuleChain for AdvisoryChain {
    fn combine(&self, _links: &[ChainLink]) -> Option<ValidationStatus> {
        None
    }
}

/// Per-field results plus whatever the chain policy made of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSetOutcome {
    pub results: ValidationMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined: Option<ValidationStatus>,
}

/// Evaluate a rule set and hand the ordered links to a chain policy.
///
/// Every enabled rule contributes a link, including rules whose per-field
/// result was later overwritten in `results`.
pub fn evaluate_chain(
    record: &ExtractedRecord,
    rule_set: &RuleSet,
    chain: &impl RuleChain,
) -> RuleSetOutcome {
    let mut results = ValidationMap::new();
    let mut links = Vec::with_capacity(rule_set.rules.len());

    for rule in rule_set.rules.iter().filter(|r| r.enabled) {
        let result = evaluate_rule(record, rule);
        links.push(ChainLink {
            field_key: rule.field_key,
            status: result.status,
            joiner: rule.logical_operator,
        });
        results.insert(result.field_key, result);
    }

    RuleSetOutcome {
        combined: chain.combine(&links),
        results,
    }
}

/// One row of the rendered chain, e.g. `GL - Coverage Limits ≥ 1000000` `AND`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainStep {
    pub field_key: FieldKey,
    pub description: String,
    /// Joiner to the next enabled rule; `None` on the last step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joiner: Option<LogicalOperator>,
}

/// Render the enabled rules of a set as a readable chain.
pub fn describe_chain(rule_set: &RuleSet) -> Vec<ChainStep> {
    let enabled: Vec<&Rule> = rule_set.rules.iter().filter(|r| r.enabled).collect();
    let last = enabled.len().saturating_sub(1);

    enabled
        .iter()
        .enumerate()
        .map(|(i, rule)| ChainStep {
            field_key: rule.field_key,
            description: format!(
                "{} {} {}",
                rule.field_key.label(),
                rule.operator.symbol(),
                rule.expected_value.trim()
            ),
            joiner: (i < last).then_some(rule.logical_operator),
        })
        .collect()
}
