//! Field validators for transaction forms and filters
//!
//! Six independent rules, one per input field. Every rule is a pure
//! function from a raw value to a [`ValidationResult`]; none of them panics,
//! logs, or reads global state other than `validate_date_range`, which reads
//! the clock once to learn today's date.
//!
//! ```
//! use txdesk_validation::{validate_invoice_number, validate_amount};
//!
//! assert!(validate_invoice_number("SA-12345").is_valid());
//! assert_eq!(
//!     validate_amount("-3").error(),
//!     Some("Amount cannot be negative"),
//! );
//! ```

pub mod error;
pub mod patterns;
pub mod rules;
pub mod types;

pub use error::ValidationFailure;
pub use types::{AmountInput, DateRange, ValidationResult};
pub use rules::{
    check_invoice_number, check_search_query, check_status, check_vendor_name,
    parse_amount, parse_date_range, parse_date_range_at,
    validate_amount, validate_date_range, validate_date_range_at, validate_invoice_number,
    validate_search_query, validate_status, validate_vendor_name,
    AMOUNT_MAX, INVOICE_MAX_CHARS, SEARCH_MAX_CHARS, STATUS_OPTIONS, VENDOR_MAX_CHARS,
    VENDOR_MIN_CHARS,
};
