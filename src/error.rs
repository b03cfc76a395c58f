use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a load or an export.
///
/// Empty filter results and missing weather columns are not errors; they are
/// handled where the aggregates are rendered.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column `{0}` is missing from the dataset")]
    MissingColumn(String),

    #[error("row {row}: cannot parse Order_Date `{value}`")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: cannot parse {column} `{value}`")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("cannot write {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
