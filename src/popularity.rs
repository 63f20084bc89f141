//! Popularity weights derived from loosely typed view counts.
//!
//! Catalog files store view counts in whatever shape the scraper produced:
//! plain JSON numbers, locale-formatted strings such as `"1.234.567"` or
//! `"1,234,567"`, the literal string `"null"`, or nothing at all. Everything
//! funnels through [`weight_from_value`], which never fails: anything it
//! cannot read becomes `0.0`.

use serde_json::Value;

/// Anything that can be drawn by weight.
///
/// Implementations must return a finite, non-negative value. The sampler and
/// the partitioner treat `0.0` as "no popularity information".
pub trait Weighted {
    fn weight(&self) -> f64;
}

impl Weighted for f64 {
    fn weight(&self) -> f64 {
        sanitize(*self)
    }
}

impl<T: Weighted + ?Sized> Weighted for &T {
    fn weight(&self) -> f64 {
        (**self).weight()
    }
}

/// Weight of a raw popularity field.
///
/// # Examples
///
/// ```
/// use retrovision::popularity::weight_from_value;
/// use serde_json::json;
///
/// assert_eq!(weight_from_value(&json!("1.234.567")), 1_234_567.0);
/// assert_eq!(weight_from_value(&json!(42)), 42.0);
/// assert_eq!(weight_from_value(&json!("null")), 0.0);
/// assert_eq!(weight_from_value(&json!(null)), 0.0);
/// ```
#[must_use]
pub fn weight_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().map_or(0.0, sanitize),
        Value::String(text) => parse_view_count(text),
        _ => 0.0,
    }
}

/// Parse a view count written with `.` or `,` as grouping separators.
///
/// Separators are stripped before parsing, so `"12,5"` reads as `125`. Only the
/// leading numeric part counts: `"987 views"` is `987`, `"n/a"` is `0`.
#[must_use]
pub fn parse_view_count(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("null") {
        return 0.0;
    }

    let digits: String = trimmed.chars().filter(|c| !matches!(c, '.' | ',')).collect();
    numeric_prefix(&digits)
        .parse::<f64>()
        .map_or(0.0, sanitize)
}

/// Whether a raw field carries a usable value at all.
///
/// Empty strings, zero, `false` and null count as missing, which lets callers
/// fall through to an alternate field.
#[must_use]
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Longest prefix that reads as `[+-]digits[(e|E)[+-]digits]`.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return "";
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    &text[..end]
}

#[inline]
fn sanitize(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grouping_separators_are_stripped() {
        assert_eq!(parse_view_count("1.234.567"), 1_234_567.0);
        assert_eq!(parse_view_count("1,234,567"), 1_234_567.0);
        assert_eq!(parse_view_count("  98.765 "), 98_765.0);
    }

    #[test]
    fn test_null_and_garbage_weigh_nothing() {
        assert_eq!(parse_view_count("null"), 0.0);
        assert_eq!(parse_view_count("NULL"), 0.0);
        assert_eq!(parse_view_count(""), 0.0);
        assert_eq!(parse_view_count("n/a"), 0.0);
        assert_eq!(parse_view_count("-"), 0.0);
    }

    #[test]
    fn test_only_leading_number_counts() {
        assert_eq!(parse_view_count("987 views"), 987.0);
        assert_eq!(parse_view_count("12e3"), 12_000.0);
        assert_eq!(parse_view_count("12e"), 12.0);
        assert_eq!(parse_view_count("+5"), 5.0);
    }

    #[test]
    fn test_negative_counts_clamp_to_zero() {
        assert_eq!(parse_view_count("-1.000"), 0.0);
        assert_eq!(weight_from_value(&json!(-10)), 0.0);
    }

    #[test]
    fn test_value_shapes() {
        assert_eq!(weight_from_value(&json!(1500)), 1500.0);
        assert_eq!(weight_from_value(&json!(2.5)), 2.5);
        assert_eq!(weight_from_value(&json!("3.000")), 3000.0);
        assert_eq!(weight_from_value(&Value::Null), 0.0);
        assert_eq!(weight_from_value(&json!(true)), 0.0);
        assert_eq!(weight_from_value(&json!([1, 2])), 0.0);
    }

    #[test]
    fn test_numeric_values_keep_their_decimals() {
        // Only text carries grouping separators; a JSON number is already a count.
        assert_eq!(weight_from_value(&json!(1.5)), 1.5);
        assert_eq!(weight_from_value(&json!("1.5")), 15.0);
        assert_eq!(weight_from_value(&json!(1_234_567)), 1_234_567.0);
    }

    #[test]
    fn test_presence() {
        assert!(!is_present(&Value::Null));
        assert!(!is_present(&json!("")));
        assert!(!is_present(&json!(0)));
        assert!(is_present(&json!("null")));
        assert!(is_present(&json!(12)));
    }

    #[test]
    fn test_weighted_for_floats() {
        assert_eq!(4.0_f64.weight(), 4.0);
        assert_eq!(f64::NAN.weight(), 0.0);
        assert_eq!((-3.0_f64).weight(), 0.0);
        let by_ref = &7.0_f64;
        assert_eq!(Weighted::weight(&by_ref), 7.0);
    }
}
