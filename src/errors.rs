//! Error types for the calculation engine.
//!
//! The engine raises synchronously and never retries; callers map these
//! errors to their own response types. Insufficient data is not an error
//! and is handled by the zero/fallback policies of each calculator.

use chrono::NaiveDate;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the calculation engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Calculation failed: {0}")]
    Calculation(#[from] CalculatorError),
}

/// Errors that occur inside a calculation. These indicate a logic bug or
/// numerically impossible input rather than ordinary missing data.
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Negative portfolio value {value} for account {account_id} on {date}")]
    NegativeValue {
        account_id: String,
        date: NaiveDate,
        value: String,
    },
}

/// Validation errors for malformed input records.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{field}' is missing on {record}")]
    MissingField { record: String, field: String },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}
