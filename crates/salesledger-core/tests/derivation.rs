use polars::prelude::*;
use salesledger_core::derivation::{
    apply_derived_columns, shipping_price, SALES_TAX_MULTIPLIER,
};

fn single_record_frame() -> DataFrame {
    df!(
        "order_id" => &[1i64],
        "client_id" => &[100i64],
        "category" => &["consumables"],
        "subcategory" => &["pens"],
        "qty" => &[2i64],
        "unit_price" => &[10.0f64],
        "unit_cost" => &[4.0f64],
        "unit_weight" => &[5.0f64],
    )
    .unwrap()
}

fn mixed_frame() -> DataFrame {
    df!(
        "order_id" => &[1i64, 1, 2, 3],
        "client_id" => &[100i64, 100, 200, 300],
        "category" => &["consumables", "decor", "software", "hardware"],
        "subcategory" => &["pens", "wall art", "office suites", "cables"],
        "qty" => &[2i64, 7, 1, 12],
        "unit_price" => &[10.0f64, 1096.8, 37.62, 24.95],
        "unit_cost" => &[4.0f64, 762.71, 14.29, 10.31],
        "unit_weight" => &[5.0f64, 100.0, 50.0, 0.48],
    )
    .unwrap()
}

#[test]
fn light_record_derives_expected_fields() {
    let df = apply_derived_columns(&single_record_frame()).expect("derivation succeeded");

    let subtotal = df.column("subtotal").unwrap().f64().unwrap();
    let shipping = df.column("shipping_price").unwrap().f64().unwrap();
    let total = df.column("total_price").unwrap().f64().unwrap();
    let cost = df.column("line_cost").unwrap().f64().unwrap();
    let profit = df.column("line_profit").unwrap().f64().unwrap();

    assert!((subtotal.get(0).unwrap() - 20.0).abs() < 1e-9);
    assert!((shipping.get(0).unwrap() - 50.0).abs() < 1e-9);
    assert!((total.get(0).unwrap() - 76.475).abs() < 1e-9);
    assert!((cost.get(0).unwrap() - 58.0).abs() < 1e-9);
    assert!((profit.get(0).unwrap() - 18.475).abs() < 1e-9);
}

#[test]
fn heavy_items_ship_at_seven_per_pound() {
    let mut base = single_record_frame();
    let df = base
        .with_column(Series::new("unit_weight".into(), vec![100.0f64]))
        .unwrap();

    let derived = apply_derived_columns(df).expect("derivation succeeded");
    let shipping = derived.column("shipping_price").unwrap().f64().unwrap();
    assert!((shipping.get(0).unwrap() - 700.0).abs() < 1e-9);
}

#[test]
fn fifty_pounds_is_still_the_standard_rate() {
    assert!((shipping_price(50.0) - 500.0).abs() < 1e-9);
    assert!((shipping_price(50.5) - 353.5).abs() < 1e-9);
    assert!((shipping_price(0.0)).abs() < 1e-9);
}

#[test]
fn profit_equals_total_minus_cost_for_every_row() {
    let df = apply_derived_columns(&mixed_frame()).expect("derivation succeeded");

    let total = df.column("total_price").unwrap().f64().unwrap();
    let cost = df.column("line_cost").unwrap().f64().unwrap();
    let profit = df.column("line_profit").unwrap().f64().unwrap();

    for idx in 0..df.height() {
        let expected = total.get(idx).unwrap() - cost.get(idx).unwrap();
        assert!((profit.get(idx).unwrap() - expected).abs() < 1e-9);
    }
}

#[test]
fn tax_applies_to_the_shipping_inclusive_subtotal() {
    let df = apply_derived_columns(&mixed_frame()).expect("derivation succeeded");

    let qty = df.column("qty").unwrap().i64().unwrap();
    let unit_price = df.column("unit_price").unwrap().f64().unwrap();
    let shipping = df.column("shipping_price").unwrap().f64().unwrap();
    let total = df.column("total_price").unwrap().f64().unwrap();

    for idx in 0..df.height() {
        let expected = (unit_price.get(idx).unwrap() * qty.get(idx).unwrap() as f64
            + shipping.get(idx).unwrap())
            * SALES_TAX_MULTIPLIER;
        assert!((total.get(idx).unwrap() - expected).abs() < 1e-6);
    }
}

#[test]
fn rederiving_an_enriched_frame_recomputes_from_base_fields() {
    let once = apply_derived_columns(&mixed_frame()).expect("first derivation");
    let twice = apply_derived_columns(&once).expect("second derivation");

    assert!(once.equals(&twice));
    assert_eq!(once.width(), twice.width());
}

#[test]
fn null_base_fields_yield_null_derived_fields() {
    let df = df!(
        "order_id" => &[1i64, 2],
        "client_id" => &[100i64, 200],
        "category" => &["consumables", "decor"],
        "subcategory" => &["pens", "wall art"],
        "qty" => &[Some(2i64), None],
        "unit_price" => &[10.0f64, 20.0],
        "unit_cost" => &[4.0f64, 8.0],
        "unit_weight" => &[5.0f64, 2.0],
    )
    .unwrap();

    let derived = apply_derived_columns(&df).expect("derivation succeeded");
    let total = derived.column("total_price").unwrap().f64().unwrap();
    assert!(total.get(0).is_some());
    assert!(total.get(1).is_none());
}
