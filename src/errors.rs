//! Unified application error type.
//! Every layer (utils, models, core, storage, cli) returns AppError so that
//! the binary has a single place where failures are rendered.

use chrono::{NaiveDate, NaiveTime};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Storage error: {0}")]
    Storage(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Unknown day state: {0}")]
    UnknownState(String),

    // ---------------------------
    // Domain errors
    // ---------------------------
    #[error("End time {end} is before start time {start}")]
    EndBeforeStart { start: NaiveTime, end: NaiveTime },

    #[error("No vacation days left")]
    NoVacationDaysLeft,

    #[error("{0} is not a working day")]
    NotAWorkday(NaiveDate),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// True for errors caused by unparseable user input.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidFormat(_)
                | AppError::InvalidDate(_)
                | AppError::InvalidTime(_)
                | AppError::UnknownState(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
