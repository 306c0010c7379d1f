use polars::prelude::DataFrame;
use tracing::info;

use crate::derivation;
use crate::error::{PipelineError, Result};
use crate::exploration::{self, ExplorationReport};
use crate::summary::{self, ClientSpend};
use crate::validation::{self, ReferenceTotal, ValidationReport};

/// Base columns every stage reads from; checked before any stage runs so a
/// malformed export fails up front.
const BASE_COLUMNS: [&str; 8] = [
    "order_id",
    "client_id",
    "category",
    "subcategory",
    "qty",
    "unit_price",
    "unit_cost",
    "unit_weight",
];

#[derive(Debug)]
pub struct LedgerReport {
    pub exploration: ExplorationReport,
    pub enriched: DataFrame,
    pub validation: ValidationReport,
    pub top_client_spending: Vec<ClientSpend>,
    pub client_summary: DataFrame,
}

/// Runs the full batch: exploration, column derivation, reference-order
/// validation, and the top-client summary, in that order. Each stage
/// consumes the previous stage's output; nothing is retried and a failed
/// stage aborts the run.
pub fn run_ledger_pipeline(
    base: &DataFrame,
    references: &[ReferenceTotal],
) -> Result<LedgerReport> {
    for column in BASE_COLUMNS {
        if !base
            .get_column_names()
            .iter()
            .any(|name| name.as_str() == column)
        {
            return Err(PipelineError::MissingColumn { column });
        }
    }

    let exploration = exploration::explore(base)?;
    info!(rows = base.height(), "exploration complete");

    let enriched = derivation::apply_derived_columns(base)?;
    info!(columns = enriched.width(), "derived columns appended");

    let validation = validation::validate_order_totals(&enriched, references)?;
    let mismatches = validation
        .order_checks
        .iter()
        .filter(|check| !check.matches)
        .count();
    info!(
        reference_orders = references.len(),
        mismatches, "order totals checked"
    );

    let top_ids: Vec<i64> = exploration
        .top_clients
        .iter()
        .map(|entry| entry.value)
        .collect();
    let top_client_spending = summary::client_spending(&enriched, &top_ids)?;
    let summaries = summary::summarize_clients(&enriched, &top_ids)?;
    let client_summary = summary::presentation_frame(&summaries)?;
    info!(clients = top_ids.len(), "client summary built");

    Ok(LedgerReport {
        exploration,
        enriched,
        validation,
        top_client_spending,
        client_summary,
    })
}
