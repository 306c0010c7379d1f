use crate::errors::ParserError;
use crate::model::{frame_from_records, OrderLineRecord};
use crate::reader::{parse_order_ledger, parse_order_records};

const LEDGER_CSV: &str = "\
first,last,client_id,order_id,category,subcategory,unit_price,unit_cost,unit_weight,qty
Donald,Harding,58515,8953482,decor,wall art,1096.8,762.71,7.5,105
Tiffany,Myers,37609,8069089,consumables,pens,24.95,10.31,1.49,21
Shannon,Watson,57664,8953482,software,project management,37.62,14.29,0.48,39
";

#[test]
fn parses_records_with_extra_and_reordered_columns() {
    let records = parse_order_records(LEDGER_CSV).expect("ledger parses");

    assert_eq!(records.len(), 3);
    assert_eq!(
        records[0],
        OrderLineRecord {
            order_id: 8953482,
            client_id: 58515,
            category: "decor".to_string(),
            subcategory: "wall art".to_string(),
            qty: 105,
            unit_price: 1096.8,
            unit_cost: 762.71,
            unit_weight: 7.5,
        }
    );
    assert_eq!(records[2].order_id, 8953482);
}

#[test]
fn frame_carries_canonical_schema() {
    let frame = parse_order_ledger(LEDGER_CSV).expect("ledger parses");

    assert_eq!(frame.height(), 3);
    let names: Vec<String> = frame
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "order_id",
            "client_id",
            "category",
            "subcategory",
            "qty",
            "unit_price",
            "unit_cost",
            "unit_weight",
        ]
    );

    let qty = frame.column("qty").unwrap().i64().unwrap();
    assert_eq!(qty.get(1), Some(21));
    let price = frame.column("unit_price").unwrap().f64().unwrap();
    assert_eq!(price.get(0), Some(1096.8));
}

#[test]
fn missing_required_column_is_fatal() {
    let content = "\
order_id,client_id,category,subcategory,qty,unit_price,unit_cost
1,100,consumables,pens,2,10.0,4.0
";
    let err = parse_order_records(content).expect_err("unit_weight is required");
    match err {
        ParserError::MissingColumn { column } => assert_eq!(column, "unit_weight"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn invalid_data_row_reports_physical_line() {
    let content = "\
order_id,client_id,category,subcategory,qty,unit_price,unit_cost,unit_weight
1,100,consumables,pens,2,10.0,4.0,5.0
2,101,decor,wall art,not-a-number,10.0,4.0,5.0
";
    let err = parse_order_records(content).expect_err("qty must be an integer");
    match err {
        ParserError::DataRow { line_index, .. } => assert_eq!(line_index, 3),
        other => panic!("expected DataRow, got {other:?}"),
    }
}

#[test]
fn header_only_file_is_empty_data() {
    let content =
        "order_id,client_id,category,subcategory,qty,unit_price,unit_cost,unit_weight\n";
    let err = parse_order_records(content).expect_err("no data rows");
    assert!(matches!(err, ParserError::EmptyData));
}

#[test]
fn records_round_trip_into_frame() {
    let records = vec![OrderLineRecord {
        order_id: 1,
        client_id: 100,
        category: "consumables".to_string(),
        subcategory: "pens".to_string(),
        qty: 2,
        unit_price: 10.0,
        unit_cost: 4.0,
        unit_weight: 5.0,
    }];

    let frame = frame_from_records(&records).expect("frame builds");
    assert_eq!(frame.height(), 1);
    assert_eq!(
        frame.column("category").unwrap().str().unwrap().get(0),
        Some("consumables")
    );
}
