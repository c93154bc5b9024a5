//! Error types for Vicinity
//!
//! Recoverable conditions (a malformed record, a bad calibration file) are
//! handled where they occur and never surface as errors; this module covers
//! the remainder.

use thiserror::Error;

/// Result type alias for Vicinity operations
pub type Result<T> = std::result::Result<T, VicinityError>;

/// Main error type for Vicinity operations
#[derive(Error, Debug)]
pub enum VicinityError {
    /// Calibration file present but unusable
    #[error("Invalid calibration: {0}")]
    InvalidCalibration(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
