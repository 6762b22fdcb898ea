//! Failure classes for txdesk-validation
//!
//! Every variant renders to the exact sentence shown to the user.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationFailure {
    #[error("Search query is too long (max 100 characters)")]
    SearchTooLong,

    #[error("Search query contains invalid characters")]
    SearchInvalidCharacters,

    #[error("Invalid date format. Use: YYYY-MM-DD - YYYY-MM-DD")]
    DateRangeFormat,

    #[error("Invalid dates provided")]
    InvalidDates,

    #[error("Start date must be before end date")]
    StartAfterEnd,

    #[error("End date cannot be in the future")]
    EndInFuture,

    #[error("Invalid status selected")]
    InvalidStatus,

    #[error("Amount must be a valid number")]
    AmountNotNumber,

    #[error("Amount cannot be negative")]
    AmountNegative,

    #[error("Amount exceeds maximum limit (1,000,000)")]
    AmountTooLarge,

    #[error("Invoice number is required")]
    InvoiceRequired,

    #[error("Invoice number is too long (max 50 characters)")]
    InvoiceTooLong,

    #[error("Invoice number must follow the format SA-{{numbers}} (e.g., SA-12345)")]
    InvoiceFormat,

    #[error("Vendor name is required")]
    VendorRequired,

    #[error("Vendor name is too short (min 2 characters)")]
    VendorTooShort,

    #[error("Vendor name is too long (max 100 characters)")]
    VendorTooLong,
}

impl ValidationFailure {
    /// Name of the field this failure belongs to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationFailure::SearchTooLong | ValidationFailure::SearchInvalidCharacters => "search",
            ValidationFailure::DateRangeFormat
            | ValidationFailure::InvalidDates
            | ValidationFailure::StartAfterEnd
            | ValidationFailure::EndInFuture => "date_range",
            ValidationFailure::InvalidStatus => "status",
            ValidationFailure::AmountNotNumber
            | ValidationFailure::AmountNegative
            | ValidationFailure::AmountTooLarge => "amount",
            ValidationFailure::InvoiceRequired
            | ValidationFailure::InvoiceTooLong
            | ValidationFailure::InvoiceFormat => "invoice_number",
            ValidationFailure::VendorRequired
            | ValidationFailure::VendorTooShort
            | ValidationFailure::VendorTooLong => "vendor",
        }
    }
}
