use thiserror::Error;

/// Failures while reading a transaction file.
///
/// Row numbers are 1-based data rows (the header is not counted).
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    #[error("Column {column} has unsupported type {data_type}")]
    UnsupportedColumnType {
        column: &'static str,
        data_type: String,
    },

    #[error("Row {row}: '{value}' is not a date")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row}: '{value}' is not a valid age")]
    InvalidAge { row: usize, value: String },

    #[error("Row {row}: '{value}' is not a valid amount")]
    InvalidAmount { row: usize, value: String },

    #[error("Row {row}: empty value in column {column}")]
    EmptyValue { row: usize, column: &'static str },
}

pub type Result<T> = std::result::Result<T, LoadError>;
