use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{path}: missing required column {name:?}")]
    MissingColumn { path: PathBuf, name: String },
    #[error("{path}: header has no parseable date columns")]
    NoDateColumns { path: PathBuf },
    #[error("{path} row {row}: bad value {value:?} in column {column:?}")]
    BadValue {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
