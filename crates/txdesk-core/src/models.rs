//! Core data models: transactions and the create/edit form

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use txdesk_config::CurrencyConfig;
use txdesk_validation::{
    check_invoice_number, check_status, check_vendor_name, parse_amount, ValidationFailure,
};

use crate::error::{CoreError, CoreResult};
use crate::types::TransactionStatus;

/// A vendor invoice tracked by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Invoice number (`SA-{digits}`)
    pub invoice_number: String,
    /// Vendor name
    pub vendor: String,
    /// Invoice amount
    pub amount: Decimal,
    /// Invoice date
    pub date: NaiveDate,
    /// Approval state
    pub status: TransactionStatus,
    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    /// Check a lowercased search term against invoice, vendor and note
    pub fn matches_query(&self, query_lower: &str) -> bool {
        self.invoice_number.to_lowercase().contains(query_lower)
            || self.vendor.to_lowercase().contains(query_lower)
            || self
                .description
                .as_ref()
                .map_or(false, |d| d.to_lowercase().contains(query_lower))
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        format!("{} {} - {}", self.date, self.invoice_number, self.vendor)
    }

    /// Amount formatted with the configured currency
    pub fn display_amount(&self, currency: &CurrencyConfig) -> String {
        txdesk_utils::format_currency(self.amount, currency)
    }
}

/// Fields of the transaction form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    InvoiceNumber,
    Vendor,
    Amount,
    Date,
    Status,
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormField::InvoiceNumber => write!(f, "invoice_number"),
            FormField::Vendor => write!(f, "vendor"),
            FormField::Amount => write!(f, "amount"),
            FormField::Date => write!(f, "date"),
            FormField::Status => write!(f, "status"),
        }
    }
}

/// A failed form field with its display message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, failure: ValidationFailure) -> Self {
        Self {
            field,
            message: failure.to_string(),
        }
    }
}

pub const DATE_REQUIRED: &str = "Date is required";
pub const DATE_INVALID: &str = "Date must be a valid date (YYYY-MM-DD)";

/// Raw values of the create/edit form, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionForm {
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: String,
    #[serde(default)]
    pub date: String,
    /// Empty means pending
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Accept both `amount: 12.5` and `amount: "12.5"` in YAML rows
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Integer(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

impl TransactionForm {
    /// Run every field rule and collect the failures in field order
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if let Err(failure) = check_invoice_number(&self.invoice_number) {
            errors.push(FieldError::new(FormField::InvoiceNumber, failure));
        }
        if let Err(failure) = check_vendor_name(&self.vendor) {
            errors.push(FieldError::new(FormField::Vendor, failure));
        }
        if let Err(failure) = parse_amount(&self.amount) {
            errors.push(FieldError::new(FormField::Amount, failure));
        }
        if let Err(message) = self.parse_date() {
            errors.push(FieldError {
                field: FormField::Date,
                message: message.to_string(),
            });
        }
        if let Err(failure) = check_status(&self.status) {
            errors.push(FieldError::new(FormField::Status, failure));
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    fn parse_date(&self) -> Result<NaiveDate, &'static str> {
        let text = self.date.trim();
        if text.is_empty() {
            return Err(DATE_REQUIRED);
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| DATE_INVALID)
    }

    /// Build a transaction from a form that passes validation
    pub fn into_transaction(self, id: String) -> CoreResult<Transaction> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(CoreError::InvalidForm { errors });
        }

        let invalid = |message: String| CoreError::InvalidForm {
            errors: vec![FieldError { field: FormField::Amount, message }],
        };

        let value = parse_amount(&self.amount).map_err(|f| invalid(f.to_string()))?;
        let amount = Decimal::from_f64(value)
            .ok_or_else(|| invalid(ValidationFailure::AmountNotNumber.to_string()))?
            .normalize();

        let date = self.parse_date().map_err(|message| CoreError::InvalidForm {
            errors: vec![FieldError { field: FormField::Date, message: message.to_string() }],
        })?;

        let status = if self.status.is_empty() {
            TransactionStatus::Pending
        } else {
            self.status.parse::<TransactionStatus>().map_err(|message| CoreError::ValidationError {
                field: FormField::Status.to_string(),
                message,
            })?
        };

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Transaction {
            id,
            invoice_number: self.invoice_number,
            vendor: self.vendor.trim().to_string(),
            amount,
            date,
            status,
            description,
        })
    }
}

impl From<&Transaction> for TransactionForm {
    fn from(tx: &Transaction) -> Self {
        Self {
            invoice_number: tx.invoice_number.clone(),
            vendor: tx.vendor.clone(),
            amount: tx.amount.to_string(),
            date: tx.date.format("%Y-%m-%d").to_string(),
            status: tx.status.to_string(),
            description: tx.description.clone(),
        }
    }
}
