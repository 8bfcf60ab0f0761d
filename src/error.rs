//! Error types for the reconciliation run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for reconciliation operations
pub type Result<T> = std::result::Result<T, ReconcileError>;

/// Errors that can occur while loading records or configuring a run.
///
/// Every variant is fatal: a run either produces complete totals or none.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Failed to open or read an input file
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Delimited-text parsing error (bad quoting, missing columns)
    #[error("TSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A field could not be converted to its typed value
    #[error("Invalid {field} {value:?} in {table} table at line {line}: {reason}")]
    Parse {
        table: &'static str,
        line: u64,
        field: &'static str,
        value: String,
        reason: String,
    },

    /// Fields parsed but the row as a whole is inconsistent
    #[error("Invalid {table} row at line {line}: {message}")]
    InvalidRecord {
        table: &'static str,
        line: u64,
        message: String,
    },

    /// A rental references an inventory id missing from the film-info table
    #[error("Rental {rental_id} at line {line} references unknown inventory id {inventory_id}")]
    UnknownInventory {
        line: u64,
        rental_id: u32,
        inventory_id: u32,
    },

    /// A running total no longer fits the decimal range
    #[error("Arithmetic overflow while summing {0}")]
    Overflow(&'static str),

    /// Rejected command-line configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ReconcileError {
    /// Wraps an I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReconcileError::Io {
            path: path.into(),
            source,
        }
    }
}
