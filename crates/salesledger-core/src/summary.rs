use std::collections::{HashMap, HashSet};

use polars::prelude::*;
use serde::Serialize;

const MILLIONS_DIVISOR: f64 = 1_000_000.0;

#[derive(Debug, Clone, Serialize)]
pub struct ClientSpend {
    pub client_id: i64,
    pub total_spent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientSummary {
    pub client_id: i64,
    pub total_units: i64,
    pub total_shipping_price: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
}

/// Sum of `total_price` per client, reported in the order the client ids
/// were given (the entry-count ranking). A client with no rows spends 0.
pub fn client_spending(df: &DataFrame, client_ids: &[i64]) -> PolarsResult<Vec<ClientSpend>> {
    let clients = df.column("client_id")?.i64()?;
    let total_prices = df.column("total_price")?.f64()?;
    let wanted: HashSet<i64> = client_ids.iter().copied().collect();

    let mut spent: HashMap<i64, f64> = HashMap::new();
    for (client, total) in clients.into_iter().zip(total_prices) {
        if let (Some(client), Some(total)) = (client, total) {
            if wanted.contains(&client) {
                *spent.entry(client).or_insert(0.0) += total;
            }
        }
    }

    Ok(client_ids
        .iter()
        .map(|client_id| ClientSpend {
            client_id: *client_id,
            total_spent: spent.get(client_id).copied().unwrap_or(0.0),
        })
        .collect())
}

/// Group-and-sum of units, shipping, revenue, and profit, restricted to the
/// given clients, in the given order.
pub fn summarize_clients(
    df: &DataFrame,
    client_ids: &[i64],
) -> PolarsResult<Vec<ClientSummary>> {
    let clients = df.column("client_id")?.i64()?;
    let qty = df.column("qty")?.i64()?;
    let shipping = df.column("shipping_price")?.f64()?;
    let total_prices = df.column("total_price")?.f64()?;
    let profits = df.column("line_profit")?.f64()?;
    let wanted: HashSet<i64> = client_ids.iter().copied().collect();

    let mut by_client: HashMap<i64, ClientSummary> = HashMap::new();
    for idx in 0..df.height() {
        let Some(client) = clients.get(idx) else {
            continue;
        };
        if !wanted.contains(&client) {
            continue;
        }

        let entry = by_client.entry(client).or_insert(ClientSummary {
            client_id: client,
            total_units: 0,
            total_shipping_price: 0.0,
            total_revenue: 0.0,
            total_profit: 0.0,
        });
        entry.total_units += qty.get(idx).unwrap_or(0);
        entry.total_shipping_price += shipping.get(idx).unwrap_or(0.0);
        entry.total_revenue += total_prices.get(idx).unwrap_or(0.0);
        entry.total_profit += profits.get(idx).unwrap_or(0.0);
    }

    Ok(client_ids
        .iter()
        .filter_map(|client_id| by_client.remove(client_id))
        .collect())
}

/// Dollar amount in millions, rounded to 2 decimal places.
pub fn to_millions(value: f64) -> f64 {
    round2(value / MILLIONS_DIVISOR)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The presentation table: renamed columns, monetary fields rescaled to
/// millions, rows sorted by rounded profit descending. The sort is stable,
/// so ties keep the incoming ranking order.
pub fn presentation_frame(summaries: &[ClientSummary]) -> PolarsResult<DataFrame> {
    let mut rows: Vec<(i64, i64, f64, f64, f64)> = summaries
        .iter()
        .map(|summary| {
            (
                summary.client_id,
                summary.total_units,
                to_millions(summary.total_shipping_price),
                to_millions(summary.total_revenue),
                to_millions(summary.total_profit),
            )
        })
        .collect();
    rows.sort_by(|a, b| b.4.total_cmp(&a.4));

    let client_ids: Vec<i64> = rows.iter().map(|row| row.0).collect();
    let units: Vec<i64> = rows.iter().map(|row| row.1).collect();
    let shipping: Vec<f64> = rows.iter().map(|row| row.2).collect();
    let revenue: Vec<f64> = rows.iter().map(|row| row.3).collect();
    let profit: Vec<f64> = rows.iter().map(|row| row.4).collect();

    DataFrame::new(vec![
        Series::new("Client ID".into(), client_ids).into(),
        Series::new("Total Units Purchased".into(), units).into(),
        Series::new("Total Shipping Price (millions)".into(), shipping).into(),
        Series::new("Total Revenue (millions)".into(), revenue).into(),
        Series::new("Total Profit (millions)".into(), profit).into(),
    ])
}
