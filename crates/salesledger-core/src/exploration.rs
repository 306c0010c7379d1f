use std::collections::HashMap;
use std::hash::Hash;

use polars::prelude::*;
use serde::Serialize;

pub const TOP_CATEGORY_COUNT: usize = 3;
pub const TOP_CLIENT_COUNT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct ValueCount<T> {
    pub value: T,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnStats {
    Numeric {
        count: usize,
        mean: Option<f64>,
        std: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    },
    Categorical {
        count: usize,
        unique: usize,
        top: Option<String>,
        freq: usize,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub stats: ColumnStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplorationReport {
    pub columns: Vec<String>,
    pub column_summaries: Vec<ColumnSummary>,
    pub top_categories: Vec<ValueCount<String>>,
    pub top_category_subcategory: Option<ValueCount<String>>,
    pub top_clients: Vec<ValueCount<i64>>,
    pub top_client_units: i64,
}

/// Stage A: column listing, per-column descriptive statistics, and the
/// entry-count rankings the later stages reuse. Clients and categories rank
/// by number of line-item entries, not by value.
pub fn explore(df: &DataFrame) -> PolarsResult<ExplorationReport> {
    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let column_summaries = describe(df)?;

    let category = df.column("category")?.str()?;
    let subcategory = df.column("subcategory")?.str()?;
    let client = df.column("client_id")?.i64()?;
    let qty = df.column("qty")?.i64()?;

    let category_counts = value_counts(category.into_iter().flatten());
    let top_categories: Vec<ValueCount<String>> = category_counts
        .iter()
        .take(TOP_CATEGORY_COUNT)
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count: *count,
        })
        .collect();

    // Subcategory ranking is scoped to the single most frequent category.
    let top_category_subcategory = category_counts.first().and_then(|(top, _)| {
        let scoped = category
            .into_iter()
            .zip(subcategory)
            .filter(|(cat, _)| cat.as_deref() == Some(*top))
            .filter_map(|(_, sub)| sub);
        value_counts(scoped)
            .first()
            .map(|(value, count)| ValueCount {
                value: value.to_string(),
                count: *count,
            })
    });

    let client_counts = value_counts(client.into_iter().flatten());
    let top_clients: Vec<ValueCount<i64>> = client_counts
        .iter()
        .take(TOP_CLIENT_COUNT)
        .map(|(value, count)| ValueCount {
            value: *value,
            count: *count,
        })
        .collect();

    let top_client_units = match client_counts.first() {
        Some((top_client, _)) => client
            .into_iter()
            .zip(qty)
            .filter(|(id, _)| *id == Some(*top_client))
            .filter_map(|(_, units)| units)
            .sum(),
        None => 0,
    };

    Ok(ExplorationReport {
        columns,
        column_summaries,
        top_categories,
        top_category_subcategory,
        top_clients,
        top_client_units,
    })
}

/// Occurrence counts sorted descending; the sort is stable, so values with
/// equal counts keep their first-encounter order.
fn value_counts<T: Eq + Hash + Clone>(values: impl Iterator<Item = T>) -> Vec<(T, usize)> {
    let mut encounter_order: Vec<T> = Vec::new();
    let mut counts: HashMap<T, usize> = HashMap::new();

    for value in values {
        if !counts.contains_key(&value) {
            encounter_order.push(value.clone());
        }
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut ranked: Vec<(T, usize)> = encounter_order
        .into_iter()
        .map(|value| {
            let count = counts[&value];
            (value, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

fn describe(df: &DataFrame) -> PolarsResult<Vec<ColumnSummary>> {
    let mut summaries = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let name = column.name().to_string();
        let stats = match column.dtype() {
            DataType::Float64 => numeric_stats(column.f64()?),
            DataType::Int64 => {
                let cast = column.cast(&DataType::Float64)?;
                numeric_stats(cast.f64()?)
            }
            DataType::String => categorical_stats(column.str()?),
            _ => continue,
        };
        summaries.push(ColumnSummary { name, stats });
    }

    Ok(summaries)
}

fn numeric_stats(ca: &Float64Chunked) -> ColumnStats {
    let count = ca.len() - ca.null_count();
    let mean = ca.mean();
    let std = mean.and_then(|mean| sample_std(ca, mean));

    ColumnStats::Numeric {
        count,
        mean,
        std,
        min: ca.min(),
        max: ca.max(),
    }
}

fn categorical_stats(ca: &StringChunked) -> ColumnStats {
    let count = ca.len() - ca.null_count();
    let counts = value_counts(ca.into_iter().flatten());
    let unique = counts.len();
    let (top, freq) = match counts.first() {
        Some((value, freq)) => (Some(value.to_string()), *freq),
        None => (None, 0),
    };

    ColumnStats::Categorical {
        count,
        unique,
        top,
        freq,
    }
}

// Sample standard deviation (ddof 1), undefined for fewer than two values.
fn sample_std(ca: &Float64Chunked, mean: f64) -> Option<f64> {
    let mut n = 0u64;
    let mut acc = 0.0;
    for value in ca.into_iter().flatten() {
        acc += (value - mean).powi(2);
        n += 1;
    }
    if n > 1 {
        Some((acc / (n - 1) as f64).sqrt())
    } else {
        None
    }
}
