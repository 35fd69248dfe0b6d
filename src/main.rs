use clap::{Parser, Subcommand};
use coursepay::application::coordinator::{SubmissionCoordinator, SubmissionOutcome};
use coursepay::application::manual_gateway::ManualGateway;
use coursepay::application::orders::OrderService;
use coursepay::config::Config;
use coursepay::domain::ports::OrderStoreBox;
use coursepay::infrastructure::in_memory::{InMemoryEventLog, InMemoryOrderStore, RecordingForm};
use coursepay::interfaces::csv::order_reader::OrderCommandReader;
use coursepay::interfaces::csv::order_writer::OrderWriter;
use coursepay::interfaces::script::read_checks;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a CSV batch of order commands and print the resulting orders
    Orders {
        /// Input order commands CSV file
        input: PathBuf,

        /// Path to persistent database (optional). If provided, uses RocksDB.
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
    /// Run one checkout submission against scripted before-submit checks
    Checkout {
        /// JSON file describing the checks
        checks: PathBuf,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

#[cfg(feature = "storage-rocksdb")]
fn order_store(db_path: Option<PathBuf>) -> Result<OrderStoreBox> {
    use coursepay::infrastructure::rocksdb::RocksDBStore;

    match db_path {
        Some(path) => Ok(Box::new(RocksDBStore::open(path).into_diagnostic()?)),
        None => Ok(Box::new(InMemoryOrderStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn order_store(db_path: Option<PathBuf>) -> Result<OrderStoreBox> {
    if db_path.is_some() {
        tracing::warn!(
            "persistent storage requested via --db-path, but the 'storage-rocksdb' feature is not enabled; falling back to in-memory storage"
        );
    }
    Ok(Box::new(InMemoryOrderStore::new()))
}

async fn run_orders(config: Config, input: PathBuf, db_path: Option<PathBuf>) -> Result<()> {
    let service = OrderService::new(order_store(db_path)?, Box::new(InMemoryEventLog::new()))
        .with_gateway(Arc::new(ManualGateway::new(config.manual)));

    let file = File::open(input).into_diagnostic()?;
    let reader = OrderCommandReader::new(file);
    for command in reader.commands() {
        match command {
            Ok(command) => {
                let order = command.order;
                if let Err(e) = service.process_command(command).await {
                    tracing::warn!(order, "error processing order command: {e}");
                }
            }
            Err(e) => {
                tracing::warn!("error reading order command: {e}");
            }
        }
    }

    let orders = service.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = OrderWriter::new(stdout.lock());
    writer.write_orders(orders).into_diagnostic()?;

    Ok(())
}

#[derive(Serialize)]
struct CheckoutReport {
    #[serde(flatten)]
    outcome: SubmissionOutcome,
    submitted: bool,
    displayed_errors: Vec<String>,
}

async fn run_checkout(config: Config, checks: PathBuf) -> Result<()> {
    let file = File::open(checks).into_diagnostic()?;
    let checks = read_checks(file).into_diagnostic()?;

    let form = RecordingForm::new();
    let mut coordinator = SubmissionCoordinator::new(
        config.checkout,
        Box::new(form.clone()),
        Box::new(InMemoryEventLog::new()),
    );
    for check in checks {
        coordinator.add_before_submit_event(check.into_entry());
    }

    coordinator.init().await.into_diagnostic()?;
    let outcome = coordinator.submit().await.into_diagnostic()?;

    let report = CheckoutReport {
        outcome,
        submitted: form.submissions().await > 0,
        displayed_errors: form.errors().await,
    };
    println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = match &cli.config {
        Some(path) => Config::load(path).into_diagnostic()?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Orders { input, db_path } => run_orders(config, input, db_path).await,
        Commands::Checkout { checks } => run_checkout(config, checks).await,
    }
}
