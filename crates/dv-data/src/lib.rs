//! Data loading for the parallel-coordinates visualizer
//!
//! Reads a delimited file with a header row into raw rows, then coerces the
//! configured dimension columns into an immutable [`dv_core::Dataset`].

pub mod config;
pub mod sources;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use config::{NullConfig, SourceConfig};
pub use sources::{CsvSource, CsvTable};

/// Errors that can occur while loading data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}
