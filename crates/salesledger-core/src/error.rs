use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("ledger is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
