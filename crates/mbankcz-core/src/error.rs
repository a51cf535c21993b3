//! Error types for mbankcz

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing column in header row: {0}")]
    MissingColumn(&'static str),

    #[error("Unable to parse amount: {0}")]
    InvalidAmount(String),

    #[error("Unable to parse date: {0}")]
    InvalidDate(String),

    #[error("Malformed account number (expected ACCOUNT/BANK): {0}")]
    InvalidAccountNumber(String),

    #[error("Unknown charset: {0}")]
    UnknownCharset(String),

    #[error("Input is not valid {charset}")]
    Decode { charset: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach a 1-based row number to a per-row failure
    pub fn at_row(self, row: usize) -> Self {
        match self {
            Self::Row { .. } => self,
            other => Self::Row {
                row,
                source: Box::new(other),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
