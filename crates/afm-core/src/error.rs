use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AfmError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{}: missing column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid block size: {0} (must be at least 1)")]
    InvalidBlockSize(usize),

    #[error(
        "{}: {reason} (rows_to_drop = {rows_to_drop}, shape = {rows}x{cols})",
        path.display()
    )]
    Dimension {
        path: PathBuf,
        rows_to_drop: usize,
        rows: usize,
        cols: usize,
        reason: String,
    },

    #[error("{}: no data rows", path.display())]
    EmptyInput { path: PathBuf },

    #[error("Series along {axis} has zero variance; autocorrelation is undefined")]
    DegenerateSeries { axis: String },

    #[error("Series along {axis} contains NaN or infinite values; autocorrelation is undefined")]
    NonFiniteSeries { axis: String },

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

pub type Result<T> = std::result::Result<T, AfmError>;
