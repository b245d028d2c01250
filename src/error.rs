//! Acquisition error types

use std::io;
use thiserror::Error;

/// Result type for acquisition operations
pub type AcqResult<T> = Result<T, AcqError>;

/// Errors that can occur while acquiring satellites
#[derive(Error, Debug)]
pub enum AcqError {
    /// PRN outside of the GPS L1 C/A range
    #[error("invalid PRN {prn}: expected 1..=32")]
    InvalidArgument { prn: usize },

    /// Raw signal shorter than one code period
    #[error("insufficient data: need {needed} samples, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Settings that cannot drive a search
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Search interrupted between two PRNs
    #[error("acquisition cancelled")]
    Cancelled,

    /// Failed to read a capture file
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Failed to serialize results
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
