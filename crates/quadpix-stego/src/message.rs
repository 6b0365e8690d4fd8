//! Hiding NUL-terminated text messages
//!
//! Message bytes are written one bit per pixel into the least significant
//! bit, most significant bit first, starting at pixel 0 in row-major
//! order. A NUL byte follows the message. Pixels past the terminator are
//! left untouched.

use crate::bits::{BITS_PER_BYTE, embed_bytes, extract_bytes};
use crate::error::{StegoError, StegoResult};
use quadpix_core::RasterImage;
use std::path::Path;

/// Number of message bytes `image` can carry, leaving room for the NUL
/// terminator.
pub fn message_capacity(image: &RasterImage) -> usize {
    (image.pixel_count() / BITS_PER_BYTE).saturating_sub(1)
}

/// Hide `message` in a copy of `cover`.
///
/// Messages longer than [`message_capacity`] are cut back to the last
/// complete UTF-8 character that fits.
///
/// # Returns
///
/// The stego image and the number of message bytes hidden.
///
/// # Errors
///
/// - [`StegoError::InvalidMessage`] if `message` contains a NUL byte
/// - [`StegoError::Capacity`] if `cover` has fewer than 8 pixels
pub fn hide_message(cover: &RasterImage, message: &str) -> StegoResult<(RasterImage, usize)> {
    if message.as_bytes().contains(&0) {
        return Err(StegoError::InvalidMessage);
    }
    if cover.pixel_count() < BITS_PER_BYTE {
        return Err(StegoError::Capacity {
            required: BITS_PER_BYTE,
            available: cover.pixel_count(),
        });
    }

    let mut hidden = message.len().min(message_capacity(cover));
    while !message.is_char_boundary(hidden) {
        hidden -= 1;
    }
    if hidden < message.len() {
        log::debug!(
            "message truncated from {} to {} bytes to fit {}x{} cover",
            message.len(),
            hidden,
            cover.width(),
            cover.height()
        );
    }

    let mut payload = Vec::with_capacity(hidden + 1);
    payload.extend_from_slice(&message.as_bytes()[..hidden]);
    payload.push(0);

    let mut stego = cover.to_mut();
    embed_bytes(stego.data_mut(), &payload);
    Ok((stego.into(), hidden))
}

/// Recover a message hidden by [`hide_message`].
///
/// Reading stops at the first NUL byte or when fewer than eight pixels
/// remain. Invalid UTF-8 is replaced with U+FFFD.
pub fn reveal_message(image: &RasterImage) -> String {
    let bytes: Vec<u8> = extract_bytes(image.data())
        .take_while(|&b| b != 0)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Hide `message` in the PPM at `input` and write the result to `output`.
///
/// Returns the number of message bytes hidden.
pub fn hide_message_file<P: AsRef<Path>, Q: AsRef<Path>>(
    message: &str,
    input: P,
    output: Q,
) -> StegoResult<usize> {
    let cover = quadpix_io::read_image(input.as_ref())?;
    let (stego, hidden) = hide_message(&cover, message)?;
    quadpix_io::write_image(&stego, output.as_ref())?;
    log::info!(
        "hid {} of {} message bytes in {}",
        hidden,
        message.len(),
        output.as_ref().display()
    );
    Ok(hidden)
}

/// Read the message hidden in the PPM at `input`.
pub fn reveal_message_file<P: AsRef<Path>>(input: P) -> StegoResult<String> {
    let image = quadpix_io::read_image(input)?;
    Ok(reveal_message(&image))
}
