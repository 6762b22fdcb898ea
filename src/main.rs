//! txdesk main entry point

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use txdesk_config::Config;
use txdesk_core::{
    source_from_config, DefaultErrorLogger, ErrorContext, ErrorLogger, TransactionBook,
    TransactionFilter, TransactionForm, TransactionPage,
};
use txdesk_utils::format_currency;
use txdesk_validation::{
    validate_amount, validate_date_range, validate_invoice_number, validate_search_query,
    validate_status, validate_vendor_name, ValidationResult,
};

#[derive(Parser, Debug)]
#[command(name = "txdesk")]
#[command(version = "0.1.0")]
#[command(about = "Validate and browse dashboard transactions", long_about = None)]
struct Args {
    /// Configuration file path (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a single field value and print the result as JSON
    Validate {
        field: Field,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// List transactions, optionally filtered
    List {
        /// Search invoice number, vendor and description
        #[arg(long, default_value = "")]
        search: String,
        /// pending or approved
        #[arg(long, default_value = "")]
        status: String,
        /// YYYY-MM-DD - YYYY-MM-DD
        #[arg(long, default_value = "")]
        range: String,
        /// Page size (defaults to pagination.records_per_page)
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Validate a transaction form stored as YAML
    CheckForm { path: PathBuf },
    /// Show per-status counts and totals
    Summary,
    /// Print the default configuration file
    DefaultConfig,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Field {
    Search,
    DateRange,
    Status,
    Amount,
    Invoice,
    Vendor,
}

fn validate_field(field: Field, value: &str) -> ValidationResult {
    match field {
        Field::Search => validate_search_query(value),
        Field::DateRange => validate_date_range(value),
        Field::Status => validate_status(value),
        Field::Amount => validate_amount(value),
        Field::Invoice => validate_invoice_number(value),
        Field::Vendor => validate_vendor_name(value),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!("{}", e.to_details())),
        None => Ok(Config::default()),
    }
}

fn load_book(config: &Config) -> anyhow::Result<TransactionBook> {
    let rt = Runtime::new()?;
    let source = source_from_config(config);
    rt.block_on(TransactionBook::load(source.as_ref()))
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))
}

fn print_page(page: &TransactionPage, config: &Config) {
    if page.transactions.is_empty() {
        println!("No transactions found");
        return;
    }

    println!(
        "{:<8}  {:<10}  {:<14}  {:<28}  {:<8}  {:>16}",
        "ID", "DATE", "INVOICE", "VENDOR", "STATUS", "AMOUNT"
    );
    for tx in &page.transactions {
        let vendor: String = tx.vendor.chars().take(28).collect();
        println!(
            "{:<8}  {:<10}  {:<14}  {:<28}  {:<8}  {:>16}",
            tx.id,
            tx.date.to_string(),
            tx.invoice_number,
            vendor,
            tx.status.to_string(),
            tx.display_amount(&config.currency)
        );
    }
    println!(
        "Page {}/{} ({} transactions)",
        page.page,
        page.total_pages(),
        page.total_count
    );
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    match args.config {
        Some(ref path) => log::debug!("Config loaded from {}", path.display()),
        None => log::debug!("No config file given, using defaults"),
    }

    match args.command {
        Command::Validate { field, value } => {
            let result = validate_field(field, &value);
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.is_valid() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::List { search, status, range, limit, offset } => {
            let filter = TransactionFilter { search, status, date_range: range };
            let limit = limit.unwrap_or(config.pagination.records_per_page);
            let book = load_book(&config)?;

            let compiled = match filter.compile(txdesk_core::today()) {
                Ok(compiled) => compiled,
                Err(e) => {
                    let context = ErrorContext::new("list")
                        .with_data("filter", serde_json::to_value(&filter)?);
                    DefaultErrorLogger.log_error(&e, &context);
                    eprintln!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
            };
            if let Some(label) = compiled.range_label() {
                println!("Range: {}", label);
            }
            print_page(&book.query_compiled(&compiled, limit, offset), &config);
        }
        Command::CheckForm { path } => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read form file {}", path.display()))?;
            let form: TransactionForm = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse form file {}", path.display()))?;

            let errors = form.validate();
            if errors.is_empty() {
                println!("Form is valid");
            } else {
                for error in &errors {
                    println!("{}: {}", error.field, error.message);
                }
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Summary => {
            let book = load_book(&config)?;
            let summary = book.summary();
            println!(
                "Pending:  {:>4}  {:>16}",
                summary.pending_count,
                format_currency(summary.pending_total, &config.currency)
            );
            println!(
                "Approved: {:>4}  {:>16}",
                summary.approved_count,
                format_currency(summary.approved_total, &config.currency)
            );
            println!(
                "Total:    {:>4}  {:>16}",
                summary.total_count,
                format_currency(summary.grand_total(), &config.currency)
            );
        }
        Command::DefaultConfig => {
            print!("{}", Config::generate_default());
        }
    }

    Ok(ExitCode::SUCCESS)
}
