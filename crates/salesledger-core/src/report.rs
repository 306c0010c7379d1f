use std::io::Write;

use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use polars::prelude::*;

use crate::error::Result;
use crate::exploration::{ColumnStats, ExplorationReport};
use crate::pipelines::LedgerReport;
use crate::summary::ClientSpend;
use crate::validation::ValidationReport;

/// Writes the full human-readable report: exploration findings, reference
/// order checks, grand totals, top-client spending, and the sorted client
/// summary table.
pub fn render_report<W: Write>(out: &mut W, report: &LedgerReport) -> Result<()> {
    render_exploration(out, &report.exploration)?;
    render_validation(out, &report.validation)?;
    render_spending(out, &report.top_client_spending)?;
    render_summary(out, &report.client_summary)?;
    Ok(())
}

fn render_exploration<W: Write>(out: &mut W, exploration: &ExplorationReport) -> Result<()> {
    writeln!(out, "Column Names:")?;
    writeln!(out, "{}", exploration.columns.join(", "))?;
    writeln!(out)?;

    writeln!(out, "Basic Statistics:")?;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "column", "count", "mean", "std", "min", "max", "unique", "top", "freq",
    ]);
    for summary in &exploration.column_summaries {
        let row = match &summary.stats {
            ColumnStats::Numeric {
                count,
                mean,
                std,
                min,
                max,
            } => vec![
                summary.name.clone(),
                count.to_string(),
                fmt_float(*mean),
                fmt_float(*std),
                fmt_float(*min),
                fmt_float(*max),
                String::new(),
                String::new(),
                String::new(),
            ],
            ColumnStats::Categorical {
                count,
                unique,
                top,
                freq,
            } => vec![
                summary.name.clone(),
                count.to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                unique.to_string(),
                top.clone().unwrap_or_default(),
                freq.to_string(),
            ],
        };
        table.add_row(row);
    }
    writeln!(out, "{table}")?;
    writeln!(out)?;

    writeln!(
        out,
        "Top {} Item Categories with the Most Entries:",
        exploration.top_categories.len()
    )?;
    for entry in &exploration.top_categories {
        writeln!(out, "{:<24} {}", entry.value, entry.count)?;
    }
    writeln!(out)?;

    if let (Some(top_category), Some(top_subcategory)) = (
        exploration.top_categories.first(),
        exploration.top_category_subcategory.as_ref(),
    ) {
        writeln!(
            out,
            "The subcategory with the most entries in the most common category ({}): {} ({} entries)",
            top_category.value, top_subcategory.value, top_subcategory.count
        )?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "Top {} Clients with the Most Entries:",
        exploration.top_clients.len()
    )?;
    for entry in &exploration.top_clients {
        writeln!(out, "{:<12} {}", entry.value, entry.count)?;
    }
    writeln!(out)?;

    if let Some(top_client) = exploration.top_clients.first() {
        writeln!(
            out,
            "Total units ordered by the client with the most entries ({}): {}",
            top_client.value, exploration.top_client_units
        )?;
        writeln!(out)?;
    }

    Ok(())
}

fn render_validation<W: Write>(out: &mut W, validation: &ValidationReport) -> Result<()> {
    writeln!(out, "Validation Results for Order Totals:")?;
    for check in &validation.order_checks {
        writeln!(out, "Order ID {}:", check.order_id)?;
        writeln!(
            out,
            "  Calculated Total: {}",
            format_currency(check.computed_total)
        )?;
        writeln!(
            out,
            "  Expected Total:   {}",
            format_currency(check.expected_total)
        )?;
        writeln!(
            out,
            "  Match:            {}",
            if check.matches { "Yes" } else { "No" }
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Grand Totals:")?;
    writeln!(
        out,
        "Total revenue: {}",
        format_currency(validation.total_revenue)
    )?;
    writeln!(
        out,
        "Total cost:    {}",
        format_currency(validation.total_cost)
    )?;
    writeln!(
        out,
        "Total profit:  {}",
        format_currency(validation.total_profit)
    )?;
    writeln!(out)?;

    Ok(())
}

fn render_spending<W: Write>(out: &mut W, spending: &[ClientSpend]) -> Result<()> {
    writeln!(out, "Top {} Clients by Total Spending:", spending.len())?;
    for entry in spending {
        writeln!(
            out,
            "{:<12} {}",
            entry.client_id,
            format_currency(entry.total_spent)
        )?;
    }
    writeln!(out)?;

    Ok(())
}

fn render_summary<W: Write>(out: &mut W, frame: &DataFrame) -> Result<()> {
    writeln!(out, "Sorted Summary (Top Clients):")?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(
        frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>(),
    );

    for idx in 0..frame.height() {
        let mut cells = Vec::with_capacity(frame.width());
        for column in frame.get_columns() {
            let cell = match column.dtype() {
                DataType::Int64 => column
                    .i64()?
                    .get(idx)
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
                DataType::Float64 => column
                    .f64()?
                    .get(idx)
                    .map(|value| format!("{value:.2}"))
                    .unwrap_or_default(),
                _ => String::new(),
            };
            cells.push(cell);
        }
        table.add_row(cells);
    }

    writeln!(out, "{table}")?;

    Ok(())
}

fn fmt_float(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

/// Dollar amount with thousands separators, e.g. `$152,811.89`.
fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}
