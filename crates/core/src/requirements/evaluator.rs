//! Rule evaluator: pure logic, no database access.

use super::comparator::{compare, numeric_operands, present};
use super::operators::ComparisonOperator;
use super::rules::{Rule, RuleSet, ValidationMap, ValidationResult, ValidationStatus};
use crate::extraction::ExtractedRecord;
use crate::fields::lookup_value;

/// Evaluate every enabled rule of a set against one record.
///
/// Rules are scored independently in stored order. When two rules target the
/// same field the later one's result replaces the earlier one.
pub fn evaluate(record: &ExtractedRecord, rule_set: &RuleSet) -> ValidationMap {
    let mut results = ValidationMap::new();
    for rule in rule_set.rules.iter().filter(|r| r.enabled) {
        let result = evaluate_rule(record, rule);
        results.insert(result.field_key, result);
    }
    results
}

/// Evaluate a single rule against one record.
pub fn evaluate_rule(record: &ExtractedRecord, rule: &Rule) -> ValidationResult {
    let actual = lookup_value(record, rule.field_key);
    let status = compare(actual, &rule.expected_value, rule.operator);
    ValidationResult {
        field_key: rule.field_key,
        status,
        message: Some(describe(status, rule.operator, actual, &rule.expected_value)),
    }
}

fn describe(
    status: ValidationStatus,
    operator: ComparisonOperator,
    actual: Option<&str>,
    expected: &str,
) -> String {
    let Some(actual) = present(actual) else {
        return "Field is empty".to_string();
    };
    let passed = status == ValidationStatus::Pass;
    let expected = expected.trim();

    match operator {
        ComparisonOperator::EqualTo if passed => "Matches requirement".to_string(),
        ComparisonOperator::EqualTo => format!("Expected: {expected}"),
        ComparisonOperator::NotEqualTo if passed => "Does not match".to_string(),
        ComparisonOperator::NotEqualTo => format!("Should not equal: {expected}"),
        ComparisonOperator::Contains if passed => "Contains required text".to_string(),
        ComparisonOperator::Contains => format!("Must contain: {expected}"),
        ComparisonOperator::NotContains if passed => "Does not contain text".to_string(),
        ComparisonOperator::NotContains => format!("Must not contain: {expected}"),
        relational => match numeric_operands(actual, expected) {
            None => "Invalid number format".to_string(),
            Some((a, e)) if passed => {
                format!("{} {} {}", format_number(a), relational.symbol(), format_number(e))
            }
            Some((_, e)) => {
                let bound = match relational {
                    ComparisonOperator::GreaterThan => "Must be greater than",
                    ComparisonOperator::LessThan => "Must be less than",
                    ComparisonOperator::GreaterThanOrEqual => "Must be at least",
                    _ => "Must be at most",
                };
                format!("{bound} {}", format_number(e))
            }
        },
    }
}

/// Largest magnitude that still carries a fractional part worth rounding.
const ROUNDING_LIMIT: f64 = 1e15;

/// Render a number with thousands separators and at most three decimals.
fn format_number(value: f64) -> String {
    let rounded = if value.abs() < ROUNDING_LIMIT {
        (value * 1000.0).round() / 1000.0
    } else {
        value
    };
    let magnitude = rounded.abs();
    let whole = format!("{:.0}", magnitude.trunc());

    let mut out = String::with_capacity(whole.len() + whole.len() / 3 + 5);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }

    let fraction = format!("{:.3}", magnitude.fract());
    let fraction = fraction.trim_start_matches('0').trim_end_matches('0');
    if fraction.len() > 1 {
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKey;
    use crate::requirements::operators::ComparisonOperator::*;
    use crate::samples::sample_record;

    fn key(name: &str) -> FieldKey {
        name.parse().unwrap()
    }

    fn set_of(rules: Vec<Rule>) -> RuleSet {
        RuleSet {
            id: 1,
            name: "Standard Commercial Requirements".to_string(),
            description: None,
            rules,
        }
    }

    /// The sample certificate with the additional insured left blank.
    fn record() -> ExtractedRecord {
        let mut record = sample_record();
        record.additional_insured = Some("   ".to_string());
        record
    }

    #[test]
    fn coverage_limit_at_least_one_million_passes() {
        let rule = Rule::new(key("gl_coverage_limits"), GreaterThanOrEqual, "1000000");
        let result = evaluate_rule(&record(), &rule);
        assert_eq!(result.status, ValidationStatus::Pass);
        assert_eq!(result.message.as_deref(), Some("2,000,000 ≥ 1,000,000"));
    }

    #[test]
    fn deductible_currency_mismatch_fails() {
        let rule = Rule::new(key("gl_deductible_currency"), EqualTo, "USD");
        let result = evaluate_rule(&record(), &rule);
        assert_eq!(result.status, ValidationStatus::Fail);
        assert_eq!(result.message.as_deref(), Some("Expected: USD"));
    }

    #[test]
    fn blank_field_is_missing_for_any_operator() {
        for op in ComparisonOperator::ALL {
            let rule = Rule::new(key("additional_insured"), op, "EDM Trailer Rentals");
            let result = evaluate_rule(&record(), &rule);
            assert_eq!(result.status, ValidationStatus::Missing, "{op}");
            assert_eq!(result.message.as_deref(), Some("Field is empty"));
        }
    }

    #[test]
    fn relational_messages() {
        let r = record();
        let below = evaluate_rule(&r, &Rule::new(key("trailer_coverage_limits"), GreaterThan, "100,000"));
        assert_eq!(below.status, ValidationStatus::Fail);
        assert_eq!(below.message.as_deref(), Some("Must be greater than 100,000"));

        let at_most = evaluate_rule(&r, &Rule::new(key("trailer_deductible"), LessThanOrEqual, "2500.5"));
        assert_eq!(at_most.message.as_deref(), Some("Must be at most 2,500.5"));

        let text = evaluate_rule(&r, &Rule::new(key("gl_company_name"), LessThan, "5"));
        assert_eq!(text.status, ValidationStatus::Fail);
        assert_eq!(text.message.as_deref(), Some("Invalid number format"));
    }

    #[test]
    fn later_rule_on_same_field_wins() {
        let rules = vec![
            Rule::new(key("gl_coverage_limits"), GreaterThanOrEqual, "1000000"),
            Rule::new(key("named_insured"), Contains, "Hauling"),
            Rule::new(key("gl_coverage_limits"), GreaterThan, "5000000"),
        ];
        let results = evaluate(&record(), &set_of(rules));

        assert_eq!(results.len(), 2);
        let gl = &results[&key("gl_coverage_limits")];
        assert_eq!(gl.status, ValidationStatus::Fail);
        assert_eq!(gl.message.as_deref(), Some("Must be greater than 5,000,000"));
        assert_eq!(results[&key("named_insured")].status, ValidationStatus::Pass);
    }

    #[test]
    fn empty_rule_set_yields_empty_map() {
        assert!(evaluate(&record(), &set_of(Vec::new())).is_empty());
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let mut disabled = Rule::new(key("form_type"), Contains, "CSIO");
        disabled.enabled = false;
        let results = evaluate(&record(), &set_of(vec![disabled]));
        assert!(results.is_empty());
    }

    #[test]
    fn results_iterate_in_registry_order() {
        let rules = vec![
            Rule::new(key("trailer_expiry_date"), EqualTo, "2026-11-24"),
            Rule::new(key("named_insured"), Contains, "freight"),
            Rule::new(key("auto_policy_number"), EqualTo, "123456"),
        ];
        let results = evaluate(&record(), &set_of(rules));
        let order: Vec<_> = results.keys().map(|k| k.as_str()).collect();
        assert_eq!(order, ["named_insured", "auto_policy_number", "trailer_expiry_date"]);
        assert!(results.values().all(|r| r.status == ValidationStatus::Pass));
    }

    #[test]
    fn evaluation_does_not_depend_on_rule_order() {
        let a = Rule::new(key("gl_policy_number"), EqualTo, "654321");
        let b = Rule::new(key("cancellation_notice_period"), GreaterThanOrEqual, "30");
        let forward = evaluate(&record(), &set_of(vec![a.clone(), b.clone()]));
        let backward = evaluate(&record(), &set_of(vec![b, a]));
        assert_eq!(forward, backward);
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(2_000_000.0), "2,000,000");
        assert_eq!(format_number(-12_345.678), "-12,345.678");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(1.0004), "1");
        assert_eq!(format_number(1e15), "1,000,000,000,000,000");
    }

    #[test]
    fn huge_values_render_as_digits() {
        let mut r = record();
        r.coverages.general_liability.coverage_limit = Some("1e306".to_string());
        let result = evaluate_rule(&r, &Rule::new(key("gl_coverage_limits"), GreaterThan, "1"));
        assert_eq!(result.status, ValidationStatus::Pass);

        let message = result.message.unwrap();
        assert!(message.starts_with("1,000,"), "{message}");
        assert!(message.ends_with(" > 1"), "{message}");
        assert!(!message.contains("inf") && !message.contains("NaN"), "{message}");
    }
}
