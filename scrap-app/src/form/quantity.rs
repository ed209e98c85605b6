use regex_lite::Regex;
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .unwrap_or_else(|_| Regex::new(".^").unwrap())
});

/// Coerces raw quantity input to kilograms.
///
/// Parses the longest leading decimal number, so `"12.5kg"` is `12.5`.
/// Anything that yields no finite number becomes `0.0` instead of being
/// rejected, which keeps the input editable mid-keystroke.
pub fn parse_quantity(input: &str) -> f64 {
    LEADING_NUMBER
        .find(input.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value != 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_quantity("12.5"), 12.5);
        assert_eq!(parse_quantity("  7"), 7.0);
        assert_eq!(parse_quantity(".5"), 0.5);
        assert_eq!(parse_quantity("3."), 3.0);
        assert_eq!(parse_quantity("1e3"), 1000.0);
        assert_eq!(parse_quantity("-4"), -4.0);
    }

    #[test]
    fn test_trailing_garbage_is_ignored() {
        assert_eq!(parse_quantity("12.5kg"), 12.5);
        assert_eq!(parse_quantity("2e"), 2.0);
        assert_eq!(parse_quantity("1.2.3"), 1.2);
    }

    #[test]
    fn test_non_numeric_coerces_to_zero() {
        for input in ["", "   ", "abc", "kg12", "-", ".", "NaN", "Infinity", "e5"] {
            assert_eq!(parse_quantity(input), 0.0, "input {input:?}");
        }
    }

    #[test]
    fn test_overflow_coerces_to_zero() {
        assert_eq!(parse_quantity("1e999"), 0.0);
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        assert!(parse_quantity("-0").is_sign_positive());
    }
}
