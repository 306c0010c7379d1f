use polars::prelude::DataFrame;

use crate::errors::ParserError;
use crate::model::{frame_from_records, OrderLineRecord, REQUIRED_COLUMNS};

/// Parses a delimited ledger export into typed records. The header row must
/// name every required column; column order is free and extra columns are
/// ignored. Row indices in errors are 1-based physical lines (header is
/// line 1).
pub fn parse_order_records(content: &str) -> Result<Vec<OrderLineRecord>, ParserError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(ParserError::MissingColumn { column });
        }
    }

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<OrderLineRecord>().enumerate() {
        let record = row.map_err(|err| ParserError::DataRow {
            line_index: idx + 2,
            message: err.to_string(),
        })?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(ParserError::EmptyData);
    }

    Ok(records)
}

/// Parses a ledger export straight into the canonical DataFrame.
pub fn parse_order_ledger(content: &str) -> Result<DataFrame, ParserError> {
    let records = parse_order_records(content)?;
    Ok(frame_from_records(&records)?)
}
