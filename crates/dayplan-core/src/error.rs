//! Core error types for dayplan-core.
//!
//! Placement outcomes such as "no capacity" or "confirmation denied" are not
//! errors; they are returned as [`crate::Rejection`] values. The types here
//! cover malformed input, configuration and the confirmation boundary.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Core error type for dayplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed caller input. Reported immediately, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Zero-length or inverted interval
    #[error("Invalid interval: end ({end}) must be after start ({start})")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// Unparseable time of day
    #[error("Invalid time '{0}': expected 'H', 'HH', 'HHMM' or 'HH:MM'")]
    InvalidTime(String),

    /// Day window with start not before end
    #[error("Invalid day bounds: end ({end}) must be after start ({start})")]
    InvalidDayBounds { start: String, end: String },

    /// Candidate does not fall on the schedule's day
    #[error("Event {interval} does not fall on {date}")]
    OutsideDay { date: NaiveDate, interval: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be created
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a confirmation gate could not produce a decision.
///
/// The engine treats every variant as an abort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("no answer within {}s", .0.as_secs())]
    TimedOut(Duration),

    #[error("confirmation input closed")]
    Disconnected,

    #[error("failed to write confirmation prompt: {0}")]
    Prompt(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
