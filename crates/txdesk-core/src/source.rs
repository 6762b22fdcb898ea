//! Where transactions come from
//!
//! There is no backend: the dashboard either shows a built-in sample set
//! or rows read from a YAML seed file. Both simulate load latency.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use txdesk_config::Config;

use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::models::{Transaction, TransactionForm};

/// Source reference type
pub type SourceRef = Arc<dyn TransactionSource>;

/// Trait for transaction sources
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch every transaction the source knows about
    async fn load(&self) -> CoreResult<Vec<Transaction>>;

    /// Short description for log lines
    fn describe(&self) -> String;
}

/// Turn raw rows into transactions, dropping rows that fail validation
pub fn forms_into_transactions(rows: Vec<TransactionForm>, origin: &str) -> Vec<Transaction> {
    forms_into_transactions_logged(rows, origin, &DefaultErrorLogger)
}

/// Same as [`forms_into_transactions`], reporting skipped rows to `logger`
pub fn forms_into_transactions_logged(
    rows: Vec<TransactionForm>,
    origin: &str,
    logger: &dyn ErrorLogger,
) -> Vec<Transaction> {
    let mut transactions = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let id = format!("tx-{:04}", index + 1);
        let context = ErrorContext::new("load")
            .with_data("origin", serde_json::json!(origin))
            .with_data("row", serde_json::json!(index + 1));

        match row.into_transaction(id) {
            Ok(tx) => transactions.push(tx),
            Err(CoreError::InvalidForm { errors }) => {
                for error in errors {
                    logger.log_warning(
                        &format!("Skipping row {}: {} - {}", index + 1, error.field, error.message),
                        &context,
                    );
                }
            }
            Err(e) => logger.log_error(&e, &context),
        }
    }
    transactions
}

// ==================== Mock source ====================

/// Built-in sample transactions
#[derive(Debug, Default)]
pub struct MockTransactionSource {
    delay: Duration,
}

fn row(invoice: &str, vendor: &str, amount: &str, date: &str, status: &str, note: Option<&str>) -> TransactionForm {
    TransactionForm {
        invoice_number: invoice.to_string(),
        vendor: vendor.to_string(),
        amount: amount.to_string(),
        date: date.to_string(),
        status: status.to_string(),
        description: note.map(|n| n.to_string()),
    }
}

impl MockTransactionSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The sample dataset as form rows
    pub fn sample_rows() -> Vec<TransactionForm> {
        vec![
            row("SA-20240105", "Adobe Inc.", "1299.88", "2024-01-05", "approved", Some("Creative Cloud annual seats")),
            row("SA-20240112", "Amazon Web Services", "8432.17", "2024-01-12", "approved", None),
            row("SA-20240203", "Figma", "540", "2024-02-03", "pending", Some("Design team plan")),
            row("SA-20240219", "Slack Technologies", "1125.5", "2024-02-19", "approved", None),
            row("SA-20240307", "Notion Labs", "384", "2024-03-07", "pending", None),
            row("SA-20240322", "DigitalOcean", "219.35", "2024-03-22", "pending", Some("Staging droplets")),
            row("SA-20240410", "Atlassian", "2760", "2024-04-10", "approved", Some("Jira and Confluence")),
            row("SA-20240428", "Zoom Video Communications", "149.9", "2024-04-28", "pending", None),
            row("SA-20240509", "GitHub, Inc.", "1680", "2024-05-09", "approved", None),
            row("SA-20240517", "Dropbox", "95.99", "2024-05-17", "pending", None),
        ]
    }
}

#[async_trait]
impl TransactionSource for MockTransactionSource {
    async fn load(&self) -> CoreResult<Vec<Transaction>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(forms_into_transactions(Self::sample_rows(), "sample data"))
    }

    fn describe(&self) -> String {
        "built-in sample data".to_string()
    }
}

// ==================== YAML seed file ====================

/// Rows read from a YAML list of transaction forms
#[derive(Debug)]
pub struct YamlTransactionSource {
    path: PathBuf,
    delay: Duration,
}

impl YamlTransactionSource {
    pub fn new(path: PathBuf, delay: Duration) -> Self {
        Self { path, delay }
    }
}

#[async_trait]
impl TransactionSource for YamlTransactionSource {
    async fn load(&self) -> CoreResult<Vec<Transaction>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::FileNotFound {
                path: self.path.to_string_lossy().to_string(),
            },
            _ => CoreError::from(e),
        })?;

        let rows: Vec<TransactionForm> = if content.trim().is_empty() {
            Vec::new()
        } else {
            serde_yaml::from_str(&content).map_err(|e| CoreError::InvalidFormat {
                message: e.to_string(),
            })?
        };

        let origin = self.path.to_string_lossy();
        Ok(forms_into_transactions(rows, &origin))
    }

    fn describe(&self) -> String {
        format!("seed file {}", self.path.display())
    }
}

/// Pick the source named by the configuration
pub fn source_from_config(config: &Config) -> SourceRef {
    match config.data.seed_file {
        Some(ref path) => Arc::new(YamlTransactionSource::new(path.clone(), config.load_delay())),
        None => Arc::new(MockTransactionSource::new(config.load_delay())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("txdesk-{}-{}.yaml", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_sample_rows_are_valid() {
        for row in MockTransactionSource::sample_rows() {
            assert!(row.is_valid(), "{:?} -> {:?}", row, row.validate());
        }
    }

    #[tokio::test]
    async fn test_mock_source_loads_samples() {
        let source = MockTransactionSource::new(Duration::ZERO);
        let transactions = source.load().await.unwrap();
        assert_eq!(transactions.len(), MockTransactionSource::sample_rows().len());
        assert_eq!(transactions[0].id, "tx-0001");
    }

    #[tokio::test]
    async fn test_yaml_source_skips_invalid_rows() {
        let path = temp_file(
            "skip",
            "- invoice_number: SA-1\n  vendor: Figma\n  amount: 45\n  date: 2024-01-02\n\
             - invoice_number: BAD\n  vendor: Slack\n  amount: 10\n  date: 2024-01-03\n\
             - invoice_number: SA-3\n  vendor: Notion\n  amount: \"12.5\"\n  date: 2024-01-04\n  status: approved\n",
        );
        let source = YamlTransactionSource::new(path.clone(), Duration::ZERO);
        let transactions = source.load().await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].invoice_number, "SA-1");
        assert_eq!(transactions[1].id, "tx-0003");
    }

    #[derive(Default)]
    struct RecordingLogger {
        warnings: std::cell::RefCell<Vec<(String, serde_json::Value)>>,
    }

    impl ErrorLogger for RecordingLogger {
        fn log_error(&self, error: &CoreError, context: &ErrorContext) {
            self.warnings.borrow_mut().push((error.to_string(), context.data.clone()));
        }

        fn log_warning(&self, message: &str, context: &ErrorContext) {
            self.warnings.borrow_mut().push((message.to_string(), context.data.clone()));
        }
    }

    #[test]
    fn test_skipped_rows_reported_to_logger() {
        let mut rows = MockTransactionSource::sample_rows();
        rows.truncate(2);
        rows[1].invoice_number = "BAD".to_string();

        let logger = RecordingLogger::default();
        let transactions = forms_into_transactions_logged(rows, "test", &logger);
        assert_eq!(transactions.len(), 1);

        let warnings = logger.warnings.borrow();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].0.starts_with("Skipping row 2: invoice_number"));
        assert_eq!(warnings[0].1["row"], 2);
        assert_eq!(warnings[0].1["origin"], "test");
    }

    #[tokio::test]
    async fn test_yaml_source_missing_file() {
        let source = YamlTransactionSource::new(PathBuf::from("/nonexistent/seed.yaml"), Duration::ZERO);
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, CoreError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_yaml_source_bad_format() {
        let path = temp_file("bad", "invoice_number: SA-1\n");
        let source = YamlTransactionSource::new(path.clone(), Duration::ZERO);
        let err = source.load().await.unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, CoreError::InvalidFormat { .. }));
    }

    #[test]
    fn test_source_from_config() {
        let mut config = Config::default();
        assert_eq!(source_from_config(&config).describe(), "built-in sample data");

        config.data.seed_file = Some(PathBuf::from("seed.yaml"));
        assert_eq!(source_from_config(&config).describe(), "seed file seed.yaml");
    }
}
