//! Error types for Equidad

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("column '{name}' is not numeric")]
    NotNumeric { name: String },

    #[error("column '{column}' contains non-binary value {value} at row {row}")]
    NonBinaryValue {
        column: String,
        value: f64,
        row: usize,
    },

    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("column length mismatch: expected {expected} rows, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("empty data provided")]
    EmptyInput,

    #[error("insufficient data: {rows} rows (minimum {min} required)")]
    InsufficientRows { rows: usize, min: usize },

    #[error("one or more groups have no samples (group 0: {group_0}, group 1: {group_1})")]
    EmptyGroup { group_0: usize, group_1: usize },

    #[error("unable to calculate {0}")]
    Indeterminate(String),

    #[error("documentation is empty or placeholder text")]
    EmptyDocumentation,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
