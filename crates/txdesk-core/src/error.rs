//! Error types for txdesk-core
//!
//! Every error carries a stable code, a severity, and can be expanded into
//! an [`ErrorDetails`] record with resolution hints for display.

use thiserror::Error;
use serde::{Deserialize, Serialize};
use std::io;

use crate::models::FieldError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Transaction not found
    TransactionNotFound,
    /// A single field failed validation
    ValidationError,
    /// A form failed validation on one or more fields
    InvalidForm,
    /// Duplicate entry
    DuplicateEntry,
    /// IO error
    IoError,
    /// File not found
    FileNotFound,
    /// Invalid data format
    InvalidFormat,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::InvalidForm => write!(f, "INVALID_FORM"),
            ErrorCode::DuplicateEntry => write!(f, "DUPLICATE_ENTRY"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            ErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
        }
    }
}

/// Detailed error information for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for txdesk-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: String },

    #[error("{field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Invalid form ({} field errors)", .errors.len())]
    InvalidForm { errors: Vec<FieldError> },

    #[error("Duplicate entry: {entry}")]
    DuplicateEntry { entry: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::TransactionNotFound { .. } => ErrorCode::TransactionNotFound,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::InvalidForm { .. } => ErrorCode::InvalidForm,
            CoreError::DuplicateEntry { .. } => ErrorCode::DuplicateEntry,
            CoreError::IoError { .. } => ErrorCode::IoError,
            CoreError::FileNotFound { .. } => ErrorCode::FileNotFound,
            CoreError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::TransactionNotFound { .. } => ErrorSeverity::Info,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::InvalidForm { .. } => ErrorSeverity::Warning,
            CoreError::DuplicateEntry { .. } => ErrorSeverity::Warning,
            CoreError::IoError { .. } => ErrorSeverity::Error,
            CoreError::FileNotFound { .. } => ErrorSeverity::Error,
            CoreError::InvalidFormat { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(
            self.code(),
            self.to_string(),
        );

        match self {
            CoreError::TransactionNotFound { .. } => {
                details = details.with_suggestion(
                    "Check if the transaction ID is correct.".to_string()
                );
                details = details.with_suggestion(
                    "Run `txdesk list` to see all transactions.".to_string()
                );
            }
            CoreError::ValidationError { field, message } => {
                details = details.with_detail(serde_json::json!({ "field": field, "message": message }));
            }
            CoreError::InvalidForm { errors } => {
                let fields: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| serde_json::json!({ "field": e.field.to_string(), "message": e.message }))
                    .collect();
                details = details.with_detail(serde_json::Value::Array(fields));
                details = details.with_suggestion(
                    "Correct the listed fields and submit again.".to_string()
                );
            }
            CoreError::DuplicateEntry { entry } => {
                details = details.with_suggestion(format!(
                    "Invoice '{}' is already recorded; edit the existing transaction instead.", entry
                ));
            }
            CoreError::FileNotFound { .. } => {
                details = details.with_suggestion(
                    "Check data.seed_file in your configuration.".to_string()
                );
            }
            CoreError::InvalidFormat { message } => {
                details = details.with_detail(serde_json::json!({ "parse_message": message }));
                details = details.with_suggestion(
                    "The seed file must be a YAML list of transaction rows.".to_string()
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<io::Error> for CoreError {
    fn from(error: io::Error) -> Self {
        CoreError::IoError { message: error.to_string() }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log a warning
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Error => log::error!(
                target: "txdesk::error",
                "[{}] {} - Operation: {} - Context: {}",
                error.code(),
                error,
                context.operation,
                context.data
            ),
            _ => log::warn!(
                target: "txdesk::error",
                "[{}] {} - Operation: {} - Context: {}",
                error.code(),
                error,
                context.operation,
                context.data
            ),
        }
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "txdesk::error",
            "{} - Operation: {} - Context: {}",
            message,
            context.operation,
            context.data
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FormField;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::TransactionNotFound.to_string(), "TRANSACTION_NOT_FOUND");
        assert_eq!(ErrorCode::InvalidForm.to_string(), "INVALID_FORM");
        assert_eq!(ErrorCode::DuplicateEntry.to_string(), "DUPLICATE_ENTRY");
    }

    #[test]
    fn test_error_code_serde() {
        let json = serde_json::to_string(&ErrorCode::TransactionNotFound).unwrap();
        assert_eq!(json, "\"TRANSACTION_NOT_FOUND\"");
    }

    #[test]
    fn test_core_error_severity() {
        assert_eq!(
            CoreError::DuplicateEntry { entry: "SA-1".to_string() }.severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(
            CoreError::FileNotFound { path: "x".to_string() }.severity(),
            ErrorSeverity::Error
        );
        assert_eq!(
            CoreError::TransactionNotFound { id: "tx-1".to_string() }.severity(),
            ErrorSeverity::Info
        );
    }

    #[test]
    fn test_validation_error_message() {
        let error = CoreError::ValidationError {
            field: "status".to_string(),
            message: "Invalid status selected".to_string(),
        };
        assert_eq!(error.to_string(), "status: Invalid status selected");
        assert!(error.to_details().details.is_some());
    }

    #[test]
    fn test_invalid_form_details() {
        let error = CoreError::InvalidForm {
            errors: vec![
                FieldError { field: FormField::Vendor, message: "Vendor name is required".to_string() },
                FieldError { field: FormField::Amount, message: "Amount cannot be negative".to_string() },
            ],
        };
        assert_eq!(error.to_string(), "Invalid form (2 field errors)");

        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::InvalidForm);
        let listed = details.details.unwrap();
        assert_eq!(listed[0]["field"], "vendor");
        assert_eq!(listed[1]["message"], "Amount cannot be negative");
    }

    #[test]
    fn test_io_error_conversion() {
        let error: CoreError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(error.code(), ErrorCode::IoError);
        assert!(error.to_string().contains("denied"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("create_transaction")
            .with_data("invoice_number", serde_json::json!("SA-1"));

        assert_eq!(context.operation, "create_transaction");
        assert_eq!(context.data["invoice_number"], "SA-1");
    }
}
