use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Columns every ledger export must carry. Files may contain more (contact
/// details, order dates, item ids); those are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "order_id",
    "client_id",
    "category",
    "subcategory",
    "qty",
    "unit_price",
    "unit_cost",
    "unit_weight",
];

/// One line item of an order: one product/quantity entry. An order spans one
/// or more line items sharing `order_id`; a client places many orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRecord {
    pub order_id: i64,
    pub client_id: i64,
    pub category: String,
    pub subcategory: String,
    pub qty: i64,
    pub unit_price: f64,
    pub unit_cost: f64,
    pub unit_weight: f64,
}

/// Builds the canonical ledger frame, one row per record, columns in
/// `REQUIRED_COLUMNS` order.
pub fn frame_from_records(records: &[OrderLineRecord]) -> PolarsResult<DataFrame> {
    let order_id: Vec<i64> = records.iter().map(|r| r.order_id).collect();
    let client_id: Vec<i64> = records.iter().map(|r| r.client_id).collect();
    let category: Vec<&str> = records.iter().map(|r| r.category.as_str()).collect();
    let subcategory: Vec<&str> = records.iter().map(|r| r.subcategory.as_str()).collect();
    let qty: Vec<i64> = records.iter().map(|r| r.qty).collect();
    let unit_price: Vec<f64> = records.iter().map(|r| r.unit_price).collect();
    let unit_cost: Vec<f64> = records.iter().map(|r| r.unit_cost).collect();
    let unit_weight: Vec<f64> = records.iter().map(|r| r.unit_weight).collect();

    DataFrame::new(vec![
        Series::new("order_id".into(), order_id).into(),
        Series::new("client_id".into(), client_id).into(),
        Series::new("category".into(), category).into(),
        Series::new("subcategory".into(), subcategory).into(),
        Series::new("qty".into(), qty).into(),
        Series::new("unit_price".into(), unit_price).into(),
        Series::new("unit_cost".into(), unit_cost).into(),
        Series::new("unit_weight".into(), unit_weight).into(),
    ])
}
