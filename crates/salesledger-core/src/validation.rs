use std::collections::HashMap;

use once_cell::sync::Lazy;
use polars::prelude::*;
use serde::Serialize;

/// Absolute tolerance when comparing a computed order total to its
/// reference value.
pub const ORDER_TOTAL_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceTotal {
    pub order_id: i64,
    pub expected_total: f64,
}

/// Orders with known-correct post-tax totals, kept as a regression check on
/// the derived columns.
pub static REFERENCE_ORDER_TOTALS: Lazy<Vec<ReferenceTotal>> = Lazy::new(|| {
    vec![
        ReferenceTotal {
            order_id: 2742071,
            expected_total: 152_811.89,
        },
        ReferenceTotal {
            order_id: 2173913,
            expected_total: 162_388.71,
        },
        ReferenceTotal {
            order_id: 6128929,
            expected_total: 923_441.25,
        },
    ]
});

#[derive(Debug, Clone, Serialize)]
pub struct OrderTotalCheck {
    pub order_id: i64,
    pub computed_total: f64,
    pub expected_total: f64,
    pub matches: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub order_checks: Vec<OrderTotalCheck>,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
}

/// Stage C: sums `total_price` per order and compares the reference orders
/// against their expected totals. A reference order with no rows computes to
/// 0 and fails its check. Diagnostic only; the frame is not modified and
/// mismatches do not halt the pipeline.
pub fn validate_order_totals(
    df: &DataFrame,
    references: &[ReferenceTotal],
) -> PolarsResult<ValidationReport> {
    let order_ids = df.column("order_id")?.i64()?;
    let total_prices = df.column("total_price")?.f64()?;

    let mut totals_by_order: HashMap<i64, f64> = HashMap::new();
    for (order_id, total) in order_ids.into_iter().zip(total_prices) {
        if let (Some(order_id), Some(total)) = (order_id, total) {
            *totals_by_order.entry(order_id).or_insert(0.0) += total;
        }
    }

    let order_checks = references
        .iter()
        .map(|reference| {
            let computed_total = totals_by_order
                .get(&reference.order_id)
                .copied()
                .unwrap_or(0.0);
            OrderTotalCheck {
                order_id: reference.order_id,
                computed_total,
                expected_total: reference.expected_total,
                matches: (computed_total - reference.expected_total).abs()
                    < ORDER_TOTAL_TOLERANCE,
            }
        })
        .collect();

    Ok(ValidationReport {
        order_checks,
        total_revenue: total_prices.sum().unwrap_or(0.0),
        total_cost: df.column("line_cost")?.f64()?.sum().unwrap_or(0.0),
        total_profit: df.column("line_profit")?.f64()?.sum().unwrap_or(0.0),
    })
}
