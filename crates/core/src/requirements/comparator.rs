//! Value comparison for requirement rules.
//!
//! Both sides arrive as raw strings. A comparison runs in numeric mode when
//! both sides start with a number, otherwise lexically (trimmed, lowercased).
//! Relational operators have no lexical meaning and fail outside numeric mode.

use super::operators::ComparisonOperator;
use super::rules::ValidationStatus;

/// Characters dropped before numeric parsing (thousands separators and the
/// dollar sign).
const NUMERIC_NOISE: [char; 2] = [',', '$'];

/// Compare an extracted value with a rule's expected value.
///
/// An absent or blank `actual` is always [`ValidationStatus::Missing`],
/// whatever the operator.
pub fn compare(
    actual: Option<&str>,
    expected: &str,
    operator: ComparisonOperator,
) -> ValidationStatus {
    let Some(actual) = present(actual) else {
        return ValidationStatus::Missing;
    };

    let numbers = numeric_operands(actual, expected);

    let passed = match operator {
        ComparisonOperator::EqualTo => equal(actual, expected, numbers),
        ComparisonOperator::NotEqualTo => !equal(actual, expected, numbers),
        ComparisonOperator::GreaterThan => numbers.is_some_and(|(a, e)| a > e),
        ComparisonOperator::LessThan => numbers.is_some_and(|(a, e)| a < e),
        ComparisonOperator::GreaterThanOrEqual => numbers.is_some_and(|(a, e)| a >= e),
        ComparisonOperator::LessThanOrEqual => numbers.is_some_and(|(a, e)| a <= e),
        ComparisonOperator::Contains => contains(actual, expected),
        ComparisonOperator::NotContains => !contains(actual, expected),
    };

    ValidationStatus::from_bool(passed)
}

/// `Some(trimmed)` when the value carries any non-whitespace content.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Coerce a raw string to a number.
///
/// `,` and `$` are dropped, then the leading number is read and anything after
/// it is ignored, so `"30 days"` is 30 and `"2,000,000 CAD"` is 2000000. A
/// number followed by `-` or `/` and a digit is a date or a range, not a
/// number. Non-finite results (`"1e400"`, `"NaN"`) are not numbers either.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !NUMERIC_NOISE.contains(c)).collect();
    let cleaned = cleaned.trim_start();

    let end = leading_number_len(cleaned);
    if end == 0 || continues_as_date(&cleaned[end..]) {
        return None;
    }
    cleaned[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Byte length of the longest `[+-]digits[.digits][e[+-]digits]` prefix, or
/// 0 when the string does not start with a number.
fn leading_number_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = digits_from(end);
    end += whole;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole + fraction == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }
    end
}

fn continues_as_date(rest: &str) -> bool {
    let bytes = rest.as_bytes();
    matches!(bytes.first(), Some(b'-' | b'/')) && bytes.get(1).is_some_and(u8::is_ascii_digit)
}

/// Both sides as numbers, or `None` when either side is not numeric.
pub(crate) fn numeric_operands(actual: &str, expected: &str) -> Option<(f64, f64)> {
    Some((parse_numeric(actual)?, parse_numeric(expected)?))
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn equal(actual: &str, expected: &str, numbers: Option<(f64, f64)>) -> bool {
    match numbers {
        Some((a, e)) => a == e,
        None => normalize(actual) == normalize(expected),
    }
}

fn contains(actual: &str, expected: &str) -> bool {
    normalize(actual).contains(&normalize(expected))
}
