//! Numeric text conventions.
//!
//! The engine and the renderer agree on one rule for "is this cell a number":
//! surrounding whitespace is ignored and anything `f64::from_str` accepts
//! counts (`42`, `-3.5`, `+.5`, `1e3`). That includes `inf` and `NaN`, which
//! is what [`format_number`] writes for results that overflow, so every
//! computed value reads back as a number.

/// Parse cell text as a number, if it is one.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Whether cell text reads as a number.
pub fn is_numeric(text: &str) -> bool {
    parse_number(text).is_some()
}

/// Format a computed value for storage back into the grid.
///
/// Always carries a fractional part (`5.0`, `-0.5`) so results are
/// distinguishable from integer literals typed by the user.
pub fn format_number(n: f64) -> String {
    format!("{:?}", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_accepts_decimal_forms() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-3.5"), Some(-3.5));
        assert_eq!(parse_number("  7 "), Some(7.0));
        assert_eq!(parse_number("+.5"), Some(0.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
    }

    #[test]
    fn test_parse_number_rejects_text() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("Total"), None);
        assert_eq!(parse_number("#hl"), None);
        assert_eq!(parse_number("1,000"), None);
        assert_eq!(parse_number("5.0.1"), None);
    }

    #[test]
    fn test_parse_number_accepts_non_finite() {
        assert_eq!(parse_number("inf"), Some(f64::INFINITY));
        assert_eq!(parse_number(" -inf "), Some(f64::NEG_INFINITY));
        assert!(parse_number("NaN").is_some_and(f64::is_nan));
    }

    #[test]
    fn test_format_number_keeps_fraction() {
        assert_eq!(format_number(5.0), "5.0");
        assert_eq!(format_number(-0.5), "-0.5");
        assert_eq!(format_number(12.25), "12.25");
    }

    #[test]
    fn test_formatted_numbers_read_back_as_numeric() {
        for n in [0.0, 1.0, -2.5, 1e20, 3.0e-7] {
            assert_eq!(parse_number(&format_number(n)), Some(n));
        }
        for n in [f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(format_number(n).trim_start_matches('-'), "inf");
            assert_eq!(parse_number(&format_number(n)), Some(n));
        }
        assert!(is_numeric(&format_number(f64::NAN)));
    }
}
