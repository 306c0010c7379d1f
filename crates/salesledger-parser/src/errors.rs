use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("data row at line {line_index} invalid: {message}")]
    DataRow { line_index: usize, message: String },

    #[error("dataset did not contain any data rows")]
    EmptyData,

    #[error("failed to build ledger dataframe: {0}")]
    Frame(#[from] polars::error::PolarsError),
}
