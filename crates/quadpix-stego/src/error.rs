//! Error types for quadpix-stego

use thiserror::Error;

/// Errors that can occur while hiding or revealing a payload
#[derive(Debug, Error)]
pub enum StegoError {
    /// The carrier image has too few pixels for the payload
    #[error("carrier too small: need {required} pixels, have {available}")]
    Capacity { required: usize, available: usize },

    /// Secret images are limited to 255x255 by the 8-bit header
    #[error("secret image {width}x{height} too large: both sides must be below 256")]
    SecretTooLarge { width: u32, height: u32 },

    /// The message contains a NUL byte, which is reserved as terminator
    #[error("message contains a NUL byte")]
    InvalidMessage,

    /// The embedded header describes an empty image
    #[error("invalid embedded header: {width}x{height}")]
    InvalidHeader { width: u8, height: u8 },

    /// Image encoding/decoding error
    #[error("image error: {0}")]
    Image(#[from] quadpix_io::IoError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] quadpix_core::Error),
}

/// Result type for steganography operations
pub type StegoResult<T> = Result<T, StegoError>;
