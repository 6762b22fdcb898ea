//! Value types shared by the validators

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ValidationFailure;

/// Outcome of a single field validation
///
/// `error` is present exactly when the value was rejected. The fields are
/// private so that the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ValidationResult {
    /// A passing result
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    /// A failing result carrying the failure's message
    pub fn invalid(failure: ValidationFailure) -> Self {
        Self {
            is_valid: false,
            error: Some(failure.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// User-facing message, `None` when valid
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl From<Result<(), ValidationFailure>> for ValidationResult {
    fn from(outcome: Result<(), ValidationFailure>) -> Self {
        match outcome {
            Ok(()) => ValidationResult::valid(),
            Err(failure) => ValidationResult::invalid(failure),
        }
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error {
            None => write!(f, "valid"),
            Some(message) => write!(f, "invalid: {}", message),
        }
    }
}

/// Raw amount as typed into a form or handed over as a number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountInput<'a> {
    Text(&'a str),
    Number(f64),
}

impl<'a> From<&'a str> for AmountInput<'a> {
    fn from(text: &'a str) -> Self {
        AmountInput::Text(text)
    }
}

impl<'a> From<&'a String> for AmountInput<'a> {
    fn from(text: &'a String) -> Self {
        AmountInput::Text(text.as_str())
    }
}

impl From<f64> for AmountInput<'_> {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

impl From<i64> for AmountInput<'_> {
    fn from(value: i64) -> Self {
        AmountInput::Number(value as f64)
    }
}

/// Inclusive calendar range parsed from `YYYY-MM-DD - YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Check if a date falls inside the range, both ends included
    pub fn contains(&self, date: &NaiveDate) -> bool {
        *date >= self.start && *date <= self.end
    }

    /// Number of calendar days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_invariant() {
        let ok = ValidationResult::valid();
        assert!(ok.is_valid());
        assert!(ok.error().is_none());

        let bad = ValidationResult::invalid(ValidationFailure::InvalidStatus);
        assert!(!bad.is_valid());
        assert_eq!(bad.error(), Some("Invalid status selected"));
    }

    #[test]
    fn test_result_serialization() {
        let ok = serde_json::to_value(ValidationResult::valid()).unwrap();
        assert_eq!(ok, serde_json::json!({ "isValid": true }));

        let bad = serde_json::to_value(ValidationResult::invalid(ValidationFailure::VendorRequired)).unwrap();
        assert_eq!(
            bad,
            serde_json::json!({ "isValid": false, "error": "Vendor name is required" })
        );
    }

    #[test]
    fn test_invoice_format_message_braces() {
        assert_eq!(
            ValidationFailure::InvoiceFormat.to_string(),
            "Invoice number must follow the format SA-{numbers} (e.g., SA-12345)"
        );
    }

    #[test]
    fn test_date_range_contains() {
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };
        assert!(range.contains(&NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(range.contains(&NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
        assert!(!range.contains(&NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
        assert_eq!(range.days(), 31);
        assert_eq!(range.to_string(), "2024-01-01 - 2024-01-31");
    }
}
