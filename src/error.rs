use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading data, fitting or predicting
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Column '{column}' not found in dataset")]
    MissingColumn { column: String },

    #[error("Invalid number in column '{column}' at row {row}: '{value}'")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Invalid binary label at row {row}: '{value}'")]
    InvalidLabel { row: usize, value: String },

    #[error("Dataset has no rows")]
    EmptyDataset,

    #[error("Column '{column}' has no observed values to fit on")]
    EmptyColumn { column: String },

    #[error("Training labels contain a single class ({0}); need both 0 and 1")]
    SingleClass(u8),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Solver failed: {0}")]
    Solver(String),

    #[error("Estimator has not been fitted yet")]
    NotFitted,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
