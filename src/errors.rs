//! Error types for the daybook application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur while opening, editing and persisting journals.

use std::{io, path::PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the daybook application.
#[derive(Error, Debug)]
pub enum JournalError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Entries were requested for a date the journal has no key for.
    #[error("No entries recorded for date: {date}")]
    DateNotFound { date: NaiveDate },

    /// Journal name is blank or cannot be used as a file name.
    #[error("Invalid journal name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Journal was not found when performing an operation.
    #[error("Journal not found: {name}")]
    JournalNotFound { name: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("{message}")]
    EditorError { message: String },

    /// Generic application error with a custom message.
    #[error("{message}")]
    ApplicationError { message: String },
}
