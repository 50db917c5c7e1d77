//! Error types for the calculator's I/O shell.
//!
//! Ledger and settlement operations never fail; only reading scripts,
//! writing output and argument handling do.

use thiserror::Error;

/// Result type alias for calculator operations
pub type Result<T> = std::result::Result<T, CalculatorError>;

/// Errors that can occur while running the calculator.
#[derive(Error, Debug)]
pub enum CalculatorError {
    /// Failed to open, read or write a file or stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing edit script argument
    #[error("Missing edit script argument. Usage: settlement-calculator <edits.csv> [--summary]")]
    MissingArgument,

    /// Unrecognised command-line flag
    #[error("Unknown option '{0}'. Usage: settlement-calculator <edits.csv> [--summary]")]
    UnknownOption(String),
}
