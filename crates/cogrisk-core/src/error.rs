//! Input error types.
//!
//! Scoring itself never fails. These errors come from preparing raw records
//! (task results, speech analyses, participant details) into scorer inputs.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while turning raw records into scorer inputs.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    /// A risk level string that is not low, moderate, or high.
    #[error("unknown risk level: {0}")]
    UnknownRiskLevel(String),

    /// The birth date lies after the assessment date.
    #[error("birth date {birth_date} is after assessment date {assessed_on}")]
    BirthDateInFuture {
        birth_date: NaiveDate,
        assessed_on: NaiveDate,
    },

    /// A recorded measurement is NaN or infinite.
    #[error("measurement '{field}' is not a finite number")]
    NonFiniteMeasurement { field: &'static str },
}
