//! Error types for quadpix-region

use thiserror::Error;

/// Errors that can occur while building or (de)serializing a quadtree
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] quadpix_core::Error),

    /// Image encoding/decoding error
    #[error("image error: {0}")]
    Image(#[from] quadpix_io::IoError),

    /// File could not be opened, read, or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Malformed preorder text
    #[error("malformed preorder data at line {line}: {message}")]
    Format { line: usize, message: String },
}

impl RegionError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        RegionError::Format {
            line,
            message: message.into(),
        }
    }
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
