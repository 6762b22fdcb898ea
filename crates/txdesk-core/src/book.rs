//! In-memory transaction book
//!
//! Holds the dashboard's transactions for the lifetime of the process.
//! Nothing is written back anywhere.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::filter::{CompiledFilter, TransactionFilter};
use crate::models::{Transaction, TransactionForm};
use crate::source::TransactionSource;
use crate::types::TransactionStatus;

/// One page of a transaction listing
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

impl TransactionPage {
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        (self.total_count + self.page_size - 1) / self.page_size
    }
}

/// Counts and totals per status
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub total_count: usize,
    pub pending_count: usize,
    pub approved_count: usize,
    pub pending_total: Decimal,
    pub approved_total: Decimal,
}

impl BookSummary {
    pub fn grand_total(&self) -> Decimal {
        self.pending_total + self.approved_total
    }
}

/// Main transaction store
#[derive(Debug)]
pub struct TransactionBook {
    transactions: Vec<Transaction>,
    next_seq: usize,
}

impl Default for TransactionBook {
    fn default() -> Self {
        Self::from_transactions(Vec::new())
    }
}

impl TransactionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book from already built transactions
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let next_seq = transactions.len() + 1;
        Self { transactions, next_seq }
    }

    /// Load all transactions from a source
    pub async fn load(source: &dyn TransactionSource) -> CoreResult<Self> {
        log::info!("Loading transactions from {}", source.describe());
        let transactions = source.load().await?;
        log::info!("Loaded {} transactions", transactions.len());
        Ok(Self::from_transactions(transactions))
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    fn position(&self, id: &str) -> CoreResult<usize> {
        self.transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TransactionNotFound { id: id.to_string() })
    }

    fn next_id(&mut self) -> String {
        loop {
            let id = format!("tx-{:04}", self.next_seq);
            self.next_seq += 1;
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn ensure_unique_invoice(&self, invoice_number: &str, except_id: Option<&str>) -> CoreResult<()> {
        let taken = self
            .transactions
            .iter()
            .any(|t| t.invoice_number == invoice_number && Some(t.id.as_str()) != except_id);
        if taken {
            return Err(CoreError::DuplicateEntry { entry: invoice_number.to_string() });
        }
        Ok(())
    }

    fn paginate(mut matched: Vec<Transaction>, limit: usize, offset: usize) -> TransactionPage {
        // Newest first, invoice number breaks ties
        matched.sort_by(|a, b| match b.date.cmp(&a.date) {
            std::cmp::Ordering::Equal => b.invoice_number.cmp(&a.invoice_number),
            other => other,
        });

        let page_size = limit.max(1);
        let total_count = matched.len();
        let transactions = matched.into_iter().skip(offset).take(page_size).collect();

        TransactionPage {
            transactions,
            total_count,
            page: offset / page_size + 1,
            page_size,
        }
    }

    /// Unfiltered listing, newest first
    pub fn page(&self, limit: usize, offset: usize) -> TransactionPage {
        Self::paginate(self.transactions.clone(), limit, offset)
    }

    /// Filtered listing; the filter is validated first
    pub fn query(
        &self,
        filter: &TransactionFilter,
        today: NaiveDate,
        limit: usize,
        offset: usize,
    ) -> CoreResult<TransactionPage> {
        let compiled = filter.compile(today)?;
        Ok(self.query_compiled(&compiled, limit, offset))
    }

    pub fn query_compiled(&self, filter: &CompiledFilter, limit: usize, offset: usize) -> TransactionPage {
        let matched: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        log::debug!("Filter matched {} of {} transactions", matched.len(), self.transactions.len());
        Self::paginate(matched, limit, offset)
    }

    /// Add a transaction from a submitted form
    pub fn create(&mut self, form: TransactionForm) -> CoreResult<&Transaction> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(CoreError::InvalidForm { errors });
        }
        self.ensure_unique_invoice(&form.invoice_number, None)?;

        let id = self.next_id();
        let tx = form.into_transaction(id)?;
        log::info!("Created transaction {} ({})", tx.id, tx.summary());

        self.transactions.push(tx);
        let index = self.transactions.len() - 1;
        Ok(&self.transactions[index])
    }

    /// Replace a transaction's fields from an edit form
    pub fn update(&mut self, id: &str, form: TransactionForm) -> CoreResult<&Transaction> {
        let index = self.position(id)?;
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(CoreError::InvalidForm { errors });
        }
        self.ensure_unique_invoice(&form.invoice_number, Some(id))?;

        let tx = form.into_transaction(id.to_string())?;
        log::info!("Updated transaction {} ({})", tx.id, tx.summary());

        self.transactions[index] = tx;
        Ok(&self.transactions[index])
    }

    /// Mark a transaction approved
    pub fn approve(&mut self, id: &str) -> CoreResult<&Transaction> {
        let index = self.position(id)?;
        let tx = &mut self.transactions[index];
        if tx.status != TransactionStatus::Approved {
            tx.status = TransactionStatus::Approved;
            log::info!("Approved transaction {}", tx.id);
        }
        Ok(&self.transactions[index])
    }

    /// Get per-status counts and totals
    pub fn summary(&self) -> BookSummary {
        self.transactions.iter().fold(BookSummary::default(), |mut acc, tx| {
            acc.total_count += 1;
            match tx.status {
                TransactionStatus::Pending => {
                    acc.pending_count += 1;
                    acc.pending_total += tx.amount;
                }
                TransactionStatus::Approved => {
                    acc.approved_count += 1;
                    acc.approved_total += tx.amount;
                }
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockTransactionSource;
    use std::str::FromStr;
    use std::time::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    fn sample_book() -> TransactionBook {
        let rows = MockTransactionSource::sample_rows();
        TransactionBook::from_transactions(crate::source::forms_into_transactions(rows, "test"))
    }

    fn form(invoice: &str, vendor: &str, amount: &str) -> TransactionForm {
        TransactionForm {
            invoice_number: invoice.to_string(),
            vendor: vendor.to_string(),
            amount: amount.to_string(),
            date: "2024-06-01".to_string(),
            status: String::new(),
            description: None,
        }
    }

    #[test]
    fn test_page_sorted_newest_first() {
        let book = sample_book();
        let page = book.page(3, 0);
        assert_eq!(page.total_count, 10);
        assert_eq!(page.transactions.len(), 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages(), 4);
        assert_eq!(page.transactions[0].invoice_number, "SA-20240517");
        assert!(page.transactions[0].date >= page.transactions[1].date);
    }

    #[test]
    fn test_page_offset() {
        let book = sample_book();
        let page = book.page(4, 8);
        assert_eq!(page.page, 3);
        assert_eq!(page.transactions.len(), 2);
        assert_eq!(page.transactions[1].invoice_number, "SA-20240105");
    }

    #[test]
    fn test_query_by_status_and_range() {
        let book = sample_book();
        let filter = TransactionFilter {
            search: String::new(),
            status: "pending".to_string(),
            date_range: "2024-02-01 - 2024-03-31".to_string(),
        };
        let page = book.query(&filter, today(), 20, 0).unwrap();
        let invoices: Vec<&str> = page.transactions.iter().map(|t| t.invoice_number.as_str()).collect();
        assert_eq!(invoices, vec!["SA-20240322", "SA-20240307", "SA-20240203"]);
    }

    #[test]
    fn test_query_search() {
        let book = sample_book();
        let filter = TransactionFilter {
            search: "droplets".to_string(),
            ..Default::default()
        };
        let page = book.query(&filter, today(), 20, 0).unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.transactions[0].vendor, "DigitalOcean");
    }

    #[test]
    fn test_query_invalid_filter() {
        let book = sample_book();
        let filter = TransactionFilter {
            status: "rejected".to_string(),
            ..Default::default()
        };
        let err = book.query(&filter, today(), 20, 0).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError { .. }));
    }

    #[test]
    fn test_create_assigns_next_id() {
        let mut book = sample_book();
        let tx = book.create(form("SA-99", "Linear", "80")).unwrap();
        assert_eq!(tx.id, "tx-0011");
        assert_eq!(book.len(), 11);
        assert!(book.get("tx-0011").is_some());
    }

    #[test]
    fn test_empty_book_ids_start_at_one() {
        let mut book = TransactionBook::new();
        assert_eq!(book.create(form("SA-1", "Figma", "10")).unwrap().id, "tx-0001");
        assert_eq!(book.create(form("SA-2", "Slack", "20")).unwrap().id, "tx-0002");
    }

    #[test]
    fn test_create_rejects_duplicate_invoice() {
        let mut book = sample_book();
        let err = book.create(form("SA-20240105", "Adobe Inc.", "10")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateEntry { .. }));
        assert_eq!(book.len(), 10);
    }

    #[test]
    fn test_create_rejects_invalid_form() {
        let mut book = TransactionBook::new();
        let err = book.create(form("SA-1", "", "10")).unwrap_err();
        match err {
            CoreError::InvalidForm { errors } => {
                assert_eq!(errors[0].message, "Vendor name is required");
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(book.is_empty());
    }

    #[test]
    fn test_update_keeps_id() {
        let mut book = sample_book();
        let mut edit = TransactionForm::from(book.get("tx-0003").unwrap());
        edit.amount = "600".to_string();
        edit.status = "approved".to_string();

        let tx = book.update("tx-0003", edit).unwrap();
        assert_eq!(tx.id, "tx-0003");
        assert_eq!(tx.amount, Decimal::from(600));
        assert_eq!(tx.status, TransactionStatus::Approved);
    }

    #[test]
    fn test_update_duplicate_invoice() {
        let mut book = sample_book();
        let mut edit = TransactionForm::from(book.get("tx-0003").unwrap());
        edit.invoice_number = "SA-20240105".to_string();
        assert!(matches!(
            book.update("tx-0003", edit),
            Err(CoreError::DuplicateEntry { .. })
        ));
    }

    #[test]
    fn test_update_missing() {
        let mut book = sample_book();
        let err = book.update("tx-9999", form("SA-5", "Vendor", "1")).unwrap_err();
        assert!(matches!(err, CoreError::TransactionNotFound { .. }));
    }

    #[test]
    fn test_approve() {
        let mut book = sample_book();
        assert!(book.get("tx-0005").unwrap().is_pending());
        book.approve("tx-0005").unwrap();
        assert!(!book.get("tx-0005").unwrap().is_pending());
        assert!(book.approve("tx-0000").is_err());
    }

    #[test]
    fn test_summary() {
        let mut book = TransactionBook::new();
        book.create(form("SA-1", "Figma", "100.25")).unwrap();
        book.create(form("SA-2", "Slack", "50")).unwrap();
        book.approve("tx-0002").unwrap();

        let summary = book.summary();
        assert_eq!(summary.total_count, 2);
        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.approved_count, 1);
        assert_eq!(summary.pending_total, Decimal::from_str("100.25").unwrap());
        assert_eq!(summary.grand_total(), Decimal::from_str("150.25").unwrap());
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let source = MockTransactionSource::new(Duration::ZERO);
        let book = TransactionBook::load(&source).await.unwrap();
        assert_eq!(book.len(), 10);
    }
}
