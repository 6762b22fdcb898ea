//! Hand-written matchers for the fixed text formats

use once_cell::sync::OnceCell;
use regex::Regex;

/// Invoice numbers look like `SA-12345`
pub const INVOICE_PREFIX: &str = "SA-";

/// Check for the `YYYY-MM-DD` shape without checking the calendar
pub fn is_iso_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Split `YYYY-MM-DD - YYYY-MM-DD` into its two date texts
///
/// Whitespace around the separating dash is optional. Anything before the
/// first date or after the second one is rejected.
pub fn split_date_range(text: &str) -> Option<(&str, &str)> {
    let start = text.get(..10)?;
    if !is_iso_date_shape(start) {
        return None;
    }

    let end = text[10..].trim_start().strip_prefix('-')?.trim_start();
    if !is_iso_date_shape(end) {
        return None;
    }

    Some((start, end))
}

/// `SA-` followed by at least one ASCII digit and nothing else
pub fn is_invoice_number(text: &str) -> bool {
    match text.strip_prefix(INVOICE_PREFIX) {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Parse the longest leading decimal literal of `text`
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"12abc"`
/// reads as 12. Returns `None` when no numeric prefix exists.
pub fn leading_float(text: &str) -> Option<f64> {
    static NUMERIC_PREFIX: OnceCell<Regex> = OnceCell::new();
    let prefix_regex = NUMERIC_PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)").unwrap()
    });

    let found = prefix_regex.find(text.trim_start())?;
    found.as_str().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date_shape() {
        assert!(is_iso_date_shape("2024-01-31"));
        assert!(is_iso_date_shape("2024-13-99"));
        assert!(!is_iso_date_shape("2024/01/31"));
        assert!(!is_iso_date_shape("24-01-31"));
        assert!(!is_iso_date_shape("2024-1-031"));
    }

    #[test]
    fn test_split_date_range_spacing() {
        assert_eq!(
            split_date_range("2024-01-01 - 2024-01-31"),
            Some(("2024-01-01", "2024-01-31"))
        );
        assert_eq!(
            split_date_range("2024-01-01-2024-01-31"),
            Some(("2024-01-01", "2024-01-31"))
        );
        assert_eq!(
            split_date_range("2024-01-01   -\t2024-01-31"),
            Some(("2024-01-01", "2024-01-31"))
        );
    }

    #[test]
    fn test_split_date_range_rejects_extra_text() {
        assert_eq!(split_date_range("2024-01-01 to 2024-01-31"), None);
        assert_eq!(split_date_range(" 2024-01-01 - 2024-01-31"), None);
        assert_eq!(split_date_range("2024-01-01 - 2024-01-31 "), None);
        assert_eq!(split_date_range("2024-01-01 - 2024-01-31x"), None);
        assert_eq!(split_date_range("2024-01-01"), None);
        assert_eq!(split_date_range("日期日期-01 - 2024-01-31"), None);
    }

    #[test]
    fn test_invoice_number_matcher() {
        assert!(is_invoice_number("SA-1"));
        assert!(is_invoice_number("SA-20240719"));
        assert!(!is_invoice_number("SA-"));
        assert!(!is_invoice_number("SA-12-3"));
        assert!(!is_invoice_number("sa-123"));
        assert!(!is_invoice_number("SA-١٢٣"));
    }

    #[test]
    fn test_leading_float() {
        assert_eq!(leading_float("42"), Some(42.0));
        assert_eq!(leading_float("  12.5abc"), Some(12.5));
        assert_eq!(leading_float("-3"), Some(-3.0));
        assert_eq!(leading_float(".5"), Some(0.5));
        assert_eq!(leading_float("1."), Some(1.0));
        assert_eq!(leading_float("1e3"), Some(1000.0));
        assert_eq!(leading_float("2e"), Some(2.0));
        assert_eq!(leading_float("Infinity"), Some(f64::INFINITY));
        assert_eq!(leading_float("abc"), None);
        assert_eq!(leading_float(""), None);
        assert_eq!(leading_float("-"), None);
        assert_eq!(leading_float("1,000"), Some(1.0));
    }
}
