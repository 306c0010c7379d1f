use polars::prelude::*;

/// Sales tax rate of 9.25%, charged on the shipping-inclusive subtotal.
pub const SALES_TAX_MULTIPLIER: f64 = 1.0925;

/// Shipping is billed at $7 per pound for items over 50 pounds and $10 per
/// pound for items at or under 50 pounds, as a flat multiplier on total
/// weight. Not a marginal rate.
pub const HEAVY_RATE_PER_LB: f64 = 7.0;
pub const STANDARD_RATE_PER_LB: f64 = 10.0;
pub const HEAVY_WEIGHT_THRESHOLD_LB: f64 = 50.0;

pub fn subtotal(unit_price: f64, qty: i64) -> f64 {
    unit_price * qty as f64
}

pub fn shipping_price(unit_weight: f64) -> f64 {
    if unit_weight > HEAVY_WEIGHT_THRESHOLD_LB {
        HEAVY_RATE_PER_LB * unit_weight
    } else {
        STANDARD_RATE_PER_LB * unit_weight
    }
}

pub fn total_price(subtotal: f64, shipping_price: f64) -> f64 {
    (subtotal + shipping_price) * SALES_TAX_MULTIPLIER
}

/// Shipping costs the seller exactly what the client is billed for it.
pub fn line_cost(unit_cost: f64, qty: i64, shipping_price: f64) -> f64 {
    unit_cost * qty as f64 + shipping_price
}

pub fn line_profit(total_price: f64, line_cost: f64) -> f64 {
    total_price - line_cost
}

/// Appends the five derived financial columns, each computed row-wise from
/// the base fields alone. Existing columns of the same names are replaced,
/// so re-running the stage always recomputes from scratch. Rows with a null
/// base field get null derived fields.
pub fn apply_derived_columns(df: &DataFrame) -> PolarsResult<DataFrame> {
    let len = df.height();

    let qty = df.column("qty")?.i64()?;
    let unit_price = df.column("unit_price")?.f64()?;
    let unit_cost = df.column("unit_cost")?.f64()?;
    let unit_weight = df.column("unit_weight")?.f64()?;

    let mut subtotals: Vec<Option<f64>> = Vec::with_capacity(len);
    let mut shipping_prices: Vec<Option<f64>> = Vec::with_capacity(len);
    let mut total_prices: Vec<Option<f64>> = Vec::with_capacity(len);
    let mut line_costs: Vec<Option<f64>> = Vec::with_capacity(len);
    let mut line_profits: Vec<Option<f64>> = Vec::with_capacity(len);

    for idx in 0..len {
        match (
            qty.get(idx),
            unit_price.get(idx),
            unit_cost.get(idx),
            unit_weight.get(idx),
        ) {
            (Some(qty_val), Some(price_val), Some(cost_val), Some(weight_val)) => {
                let sub = subtotal(price_val, qty_val);
                let ship = shipping_price(weight_val);
                let total = total_price(sub, ship);
                let cost = line_cost(cost_val, qty_val, ship);

                subtotals.push(Some(sub));
                shipping_prices.push(Some(ship));
                total_prices.push(Some(total));
                line_costs.push(Some(cost));
                line_profits.push(Some(line_profit(total, cost)));
            }
            _ => {
                subtotals.push(None);
                shipping_prices.push(None);
                total_prices.push(None);
                line_costs.push(None);
                line_profits.push(None);
            }
        }
    }

    let mut output = df.clone();
    output.with_column(Series::new("subtotal".into(), subtotals))?;
    output.with_column(Series::new("shipping_price".into(), shipping_prices))?;
    output.with_column(Series::new("total_price".into(), total_prices))?;
    output.with_column(Series::new("line_cost".into(), line_costs))?;
    output.with_column(Series::new("line_profit".into(), line_profits))?;

    Ok(output)
}
