use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use salesledger_core::{pipelines, report, validation};
use salesledger_parser::parse_order_ledger;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sales ledger batch report", long_about = None)]
struct Cli {
    /// Path to the order line-item CSV export
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let path = match cli.input {
        Some(path) => path,
        None => std::env::var("SALESLEDGER_DATASET")
            .map(PathBuf::from)
            .context("pass the dataset path or set SALESLEDGER_DATASET")?,
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    let frame = parse_order_ledger(&contents)?;
    info!(rows = frame.height(), path = %path.display(), "dataset loaded");

    let output = pipelines::run_ledger_pipeline(&frame, &validation::REFERENCE_ORDER_TOTALS)?;
    debug!(
        validation = %serde_json::to_string(&output.validation)?,
        "order total checks"
    );

    let stdout = std::io::stdout();
    report::render_report(&mut stdout.lock(), &output)?;

    Ok(())
}
