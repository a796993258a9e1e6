//! Error types for spendlog

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Not found: expense {0}")]
    NotFound(i64),

    #[error("Invalid budget: {0} (budget must be greater than zero)")]
    InvalidBudget(Decimal),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// True when the storage collaborator could not complete a read or write
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Pool(_) | Self::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
