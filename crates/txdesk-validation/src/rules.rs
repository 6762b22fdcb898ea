//! The field rules
//!
//! Each `check_*` function returns the typed failure, each `validate_*`
//! wraps it into a [`ValidationResult`] for display. Nothing here logs,
//! allocates beyond the result, or keeps state between calls.

use chrono::{NaiveDate, Utc};

use crate::error::ValidationFailure;
use crate::patterns::{is_invoice_number, leading_float, split_date_range};
use crate::types::{AmountInput, DateRange, ValidationResult};

/// Longest accepted search query, counted in Unicode scalar values (`char`s),
/// as are the other length limits here
pub const SEARCH_MAX_CHARS: usize = 100;
pub const INVOICE_MAX_CHARS: usize = 50;
pub const VENDOR_MIN_CHARS: usize = 2;
pub const VENDOR_MAX_CHARS: usize = 100;
pub const AMOUNT_MAX: f64 = 1_000_000.0;

/// Statuses a filter or form may carry; empty means "any"
pub const STATUS_OPTIONS: [&str; 3] = ["", "pending", "approved"];

fn char_len(text: &str) -> usize {
    text.chars().count()
}

// ==================== Search ====================

pub fn check_search_query(query: &str) -> Result<(), ValidationFailure> {
    if char_len(query) > SEARCH_MAX_CHARS {
        return Err(ValidationFailure::SearchTooLong);
    }
    if query.contains('<') || query.contains('>') {
        return Err(ValidationFailure::SearchInvalidCharacters);
    }
    Ok(())
}

/// Validate a free-text search box value
pub fn validate_search_query(query: &str) -> ValidationResult {
    check_search_query(query).into()
}

// ==================== Date range ====================

/// Parse a date range relative to `today`
///
/// `Ok(None)` means the field was empty and no range applies.
pub fn parse_date_range_at(range: &str, today: NaiveDate) -> Result<Option<DateRange>, ValidationFailure> {
    if range.is_empty() {
        return Ok(None);
    }

    let (start_text, end_text) = split_date_range(range).ok_or(ValidationFailure::DateRangeFormat)?;

    let start = NaiveDate::parse_from_str(start_text, "%Y-%m-%d");
    let end = NaiveDate::parse_from_str(end_text, "%Y-%m-%d");
    let (start, end) = match (start, end) {
        (Ok(start), Ok(end)) => (start, end),
        _ => return Err(ValidationFailure::InvalidDates),
    };

    // Equal endpoints are a one-day range
    if start > end {
        return Err(ValidationFailure::StartAfterEnd);
    }
    if end > today {
        return Err(ValidationFailure::EndInFuture);
    }

    Ok(Some(DateRange { start, end }))
}

/// Validate a date range against an explicit "today"
pub fn validate_date_range_at(range: &str, today: NaiveDate) -> ValidationResult {
    parse_date_range_at(range, today).map(|_| ()).into()
}

/// Parse a date range relative to the current UTC date
pub fn parse_date_range(range: &str) -> Result<Option<DateRange>, ValidationFailure> {
    parse_date_range_at(range, Utc::now().date_naive())
}

/// Validate a date range against the current UTC date
pub fn validate_date_range(range: &str) -> ValidationResult {
    validate_date_range_at(range, Utc::now().date_naive())
}

// ==================== Status ====================

pub fn check_status(status: &str) -> Result<(), ValidationFailure> {
    let lowered = status.to_lowercase();
    if STATUS_OPTIONS.contains(&lowered.as_str()) {
        Ok(())
    } else {
        Err(ValidationFailure::InvalidStatus)
    }
}

/// Validate a status selection, case-insensitive
pub fn validate_status(status: &str) -> ValidationResult {
    check_status(status).into()
}

// ==================== Amount ====================

/// Read an amount and check its bounds, returning the numeric value
pub fn parse_amount<'a>(amount: impl Into<AmountInput<'a>>) -> Result<f64, ValidationFailure> {
    let value = match amount.into() {
        AmountInput::Text(text) => leading_float(text).ok_or(ValidationFailure::AmountNotNumber)?,
        AmountInput::Number(value) => value,
    };

    if value.is_nan() {
        return Err(ValidationFailure::AmountNotNumber);
    }
    if value < 0.0 {
        return Err(ValidationFailure::AmountNegative);
    }
    if value > AMOUNT_MAX {
        return Err(ValidationFailure::AmountTooLarge);
    }
    Ok(value)
}

/// Validate an amount given as text or as a number
pub fn validate_amount<'a>(amount: impl Into<AmountInput<'a>>) -> ValidationResult {
    parse_amount(amount).map(|_| ()).into()
}

// ==================== Invoice number ====================

pub fn check_invoice_number(invoice_number: &str) -> Result<(), ValidationFailure> {
    if invoice_number.trim().is_empty() {
        return Err(ValidationFailure::InvoiceRequired);
    }
    if char_len(invoice_number) > INVOICE_MAX_CHARS {
        return Err(ValidationFailure::InvoiceTooLong);
    }
    if !is_invoice_number(invoice_number) {
        return Err(ValidationFailure::InvoiceFormat);
    }
    Ok(())
}

/// Validate an invoice number of the form `SA-{digits}`
pub fn validate_invoice_number(invoice_number: &str) -> ValidationResult {
    check_invoice_number(invoice_number).into()
}

// ==================== Vendor ====================

pub fn check_vendor_name(vendor: &str) -> Result<(), ValidationFailure> {
    let trimmed = vendor.trim();
    if trimmed.is_empty() {
        return Err(ValidationFailure::VendorRequired);
    }
    let len = char_len(trimmed);
    if len < VENDOR_MIN_CHARS {
        return Err(ValidationFailure::VendorTooShort);
    }
    if len > VENDOR_MAX_CHARS {
        return Err(ValidationFailure::VendorTooLong);
    }
    Ok(())
}

/// Validate a vendor name
pub fn validate_vendor_name(vendor: &str) -> ValidationResult {
    check_vendor_name(vendor).into()
}

// ==================== Tests ====================
