//! quadpix-stego - LSB steganography for quadpix
//!
//! Hides data one bit per pixel in the least significant bit of a
//! grayscale carrier image:
//!
//! - **Text messages** - NUL-terminated, truncated to the carrier's capacity
//! - **Secret images** - up to 255x255, prefixed with an 8-bit width and
//!   height
//!
//! # Examples
//!
//! ```
//! use quadpix_core::RasterImage;
//! use quadpix_stego::{hide_message, reveal_message};
//!
//! let cover = RasterImage::new_filled(10, 10, 128).unwrap();
//! let (stego, hidden) = hide_message(&cover, "AB").unwrap();
//! assert_eq!(hidden, 2);
//! assert_eq!(reveal_message(&stego), "AB");
//! ```

mod bits;
pub mod error;
pub mod message;
pub mod secret;

// Re-export core types
pub use quadpix_core;

// Re-export error types
pub use error::{StegoError, StegoResult};

pub use message::{
    hide_message, hide_message_file, message_capacity, reveal_message, reveal_message_file,
};
pub use secret::{hide_image, hide_image_file, required_pixels, reveal_image, reveal_image_file};
