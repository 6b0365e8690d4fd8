//! I/O error types
//!
//! Provides a unified error type for image I/O. File-system failures and
//! malformed PPM data are kept apart so callers can tell "cannot open"
//! from "opened, but not a valid image".

use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image data is structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// An error from the core library (e.g. dimensions out of range)
    #[error("core error: {0}")]
    Core(#[from] quadpix_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
