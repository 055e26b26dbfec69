//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Sample size is below the statistical minimum for an analysis
    #[error("Insufficient data for {analysis}: need at least {required} debit transactions, found {found}")]
    InsufficientData {
        analysis: &'static str,
        required: usize,
        found: usize,
    },

    /// A zero denominator made the comparison meaningless
    #[error("Insufficient data: {0}")]
    DivisionGuard(String),
}

impl Error {
    /// True for errors that only mean "skip this analysis", never fatal
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. } | Self::DivisionGuard(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
