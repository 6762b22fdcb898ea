//! Transaction model, filters and in-memory book
//!
//! Sits between the field validators and whatever front end drives the
//! dashboard:
//! - models: transactions and the create/edit form
//! - filter: search, status and date-range filtering
//! - book: the in-memory transaction store
//! - source: sample data and YAML seed files

pub mod book;
pub mod error;
pub mod filter;
pub mod models;
pub mod source;
pub mod types;

use chrono::{NaiveDate, Utc};

pub use book::{BookSummary, TransactionBook, TransactionPage};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use filter::{CompiledFilter, TransactionFilter};
pub use models::{FieldError, FormField, Transaction, TransactionForm};
pub use source::{
    source_from_config, MockTransactionSource, SourceRef, TransactionSource, YamlTransactionSource,
};
pub use types::TransactionStatus;

/// Today's date as the date-range rule sees it
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
