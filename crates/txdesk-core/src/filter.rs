//! Filter header: search box, status select and date range
//!
//! The raw filter values are validated with the same rules the UI applies
//! on input, then compiled into a predicate over transactions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use txdesk_validation::{
    check_search_query, check_status, parse_date_range_at, validate_date_range_at,
    validate_search_query, validate_status, DateRange, ValidationFailure, ValidationResult,
};

use crate::error::{CoreError, CoreResult};
use crate::models::Transaction;
use crate::types::TransactionStatus;

/// Raw filter values; empty fields apply no filtering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub date_range: String,
}

fn field_error(failure: ValidationFailure) -> CoreError {
    CoreError::ValidationError {
        field: failure.field().to_string(),
        message: failure.to_string(),
    }
}

impl TransactionFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.status.is_empty() && self.date_range.is_empty()
    }

    /// Per-field results for inline display next to each input
    pub fn field_results(&self, today: NaiveDate) -> [(&'static str, ValidationResult); 3] {
        [
            ("search", validate_search_query(&self.search)),
            ("status", validate_status(&self.status)),
            ("date_range", validate_date_range_at(&self.date_range, today)),
        ]
    }

    /// Check every field, reporting the first failure
    pub fn validate(&self, today: NaiveDate) -> CoreResult<()> {
        self.compile(today).map(|_| ())
    }

    /// Validate and compile; the first failing field is reported
    pub fn compile(&self, today: NaiveDate) -> CoreResult<CompiledFilter> {
        check_search_query(&self.search).map_err(field_error)?;
        check_status(&self.status).map_err(field_error)?;
        let range = parse_date_range_at(&self.date_range, today).map_err(field_error)?;

        let query = if self.search.is_empty() {
            None
        } else {
            Some(self.search.to_lowercase())
        };

        let status = if self.status.is_empty() {
            None
        } else {
            Some(self.status.parse::<TransactionStatus>().map_err(|message| {
                CoreError::ValidationError {
                    field: "status".to_string(),
                    message,
                }
            })?)
        };

        Ok(CompiledFilter { query, status, range })
    }
}

/// A validated filter ready to test transactions against
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    /// Lowercased search term
    pub query: Option<String>,
    pub status: Option<TransactionStatus>,
    pub range: Option<DateRange>,
}

impl CompiledFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(ref query) = self.query {
            if !tx.matches_query(query) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if tx.status != status {
                return false;
            }
        }
        if let Some(ref range) = self.range {
            if !range.contains(&tx.date) {
                return false;
            }
        }
        true
    }

    /// Date range with its length in days, e.g. `2024-01-01 - 2024-01-31 (31 days)`
    pub fn range_label(&self) -> Option<String> {
        self.range.map(|range| match range.days() {
            1 => format!("{} (1 day)", range),
            days => format!("{} ({} days)", range, days),
        })
    }
}
