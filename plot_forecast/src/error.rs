use std::path::PathBuf;

use layout::LayoutError;
use thiserror::Error;

/// Problems with the input CSV file
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Cannot open data file '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[source] csv::Error),

    #[error("Data file has no header line")]
    MissingHeader,

    #[error("Date column '{0}' not found in header")]
    UnknownDateColumn(String),

    #[error("Line {line}: cannot parse date '{value}'")]
    BadDate { line: usize, value: String },

    #[error("Line {line}: timestamp is not after the previous row")]
    NotIncreasing { line: usize },

    #[error("No data rows found")]
    NoRows,
}

/// Error types for the plot_forecast tool
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Cannot read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
