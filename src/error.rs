//! Error type shared by the grid core, page sources and exporters.

use thiserror::Error;

/// Table extraction errors
///
/// A page that yields no table is not an error; it surfaces as an empty
/// result and is logged by the orchestrator.
#[derive(Error, Debug)]
pub enum TableError {
    /// Caller contract violation: malformed token, bad tolerance, unreadable dump.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;
