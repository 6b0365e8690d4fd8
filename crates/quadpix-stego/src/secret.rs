//! Hiding a small grayscale image inside a larger one
//!
//! Layout of the embedded bits, one per cover pixel LSB, MSB first:
//!
//! | pixels          | content             |
//! |-----------------|---------------------|
//! | `0..8`          | secret width        |
//! | `8..16`         | secret height       |
//! | `16..16 + 8*w*h`| secret pixels, row-major |

use crate::bits::{BITS_PER_BYTE, embed_bytes, extract_byte, extract_bytes};
use crate::error::{StegoError, StegoResult};
use quadpix_core::RasterImage;
use std::path::Path;

/// Pixels used by the width/height header
const HEADER_PIXELS: usize = 2 * BITS_PER_BYTE;

/// Largest side length the 8-bit header can describe
const MAX_SECRET_SIDE: u32 = 255;

/// Cover pixels needed to hide a `width x height` secret.
pub fn required_pixels(width: u32, height: u32) -> usize {
    HEADER_PIXELS + BITS_PER_BYTE * width as usize * height as usize
}

/// Hide `secret` in a copy of `cover`.
///
/// # Errors
///
/// - [`StegoError::SecretTooLarge`] if either side of `secret` exceeds 255
/// - [`StegoError::Capacity`] if `cover` has fewer than
///   [`required_pixels`] pixels
pub fn hide_image(cover: &RasterImage, secret: &RasterImage) -> StegoResult<RasterImage> {
    let (width, height) = (secret.width(), secret.height());
    if width > MAX_SECRET_SIDE || height > MAX_SECRET_SIDE {
        return Err(StegoError::SecretTooLarge { width, height });
    }

    let required = required_pixels(width, height);
    if cover.pixel_count() < required {
        return Err(StegoError::Capacity {
            required,
            available: cover.pixel_count(),
        });
    }

    let mut payload = Vec::with_capacity(2 + secret.pixel_count());
    payload.push(width as u8);
    payload.push(height as u8);
    payload.extend_from_slice(secret.data());

    let mut stego = cover.to_mut();
    embed_bytes(stego.data_mut(), &payload);
    log::debug!(
        "hid {}x{} secret in {}x{} cover ({} of {} pixels)",
        width,
        height,
        cover.width(),
        cover.height(),
        required,
        cover.pixel_count()
    );
    Ok(stego.into())
}

/// Recover a secret image hidden by [`hide_image`].
///
/// # Errors
///
/// - [`StegoError::Capacity`] if `image` is too small for the header or
///   for the payload the header announces
/// - [`StegoError::InvalidHeader`] if the header has a zero side
pub fn reveal_image(image: &RasterImage) -> StegoResult<RasterImage> {
    let data = image.data();
    if data.len() < HEADER_PIXELS {
        return Err(StegoError::Capacity {
            required: HEADER_PIXELS,
            available: data.len(),
        });
    }

    let width = extract_byte(&data[..BITS_PER_BYTE]);
    let height = extract_byte(&data[BITS_PER_BYTE..HEADER_PIXELS]);
    if width == 0 || height == 0 {
        return Err(StegoError::InvalidHeader { width, height });
    }

    let required = required_pixels(width.into(), height.into());
    if data.len() < required {
        return Err(StegoError::Capacity {
            required,
            available: data.len(),
        });
    }

    let pixels: Vec<u8> = extract_bytes(&data[HEADER_PIXELS..required]).collect();
    Ok(RasterImage::from_data(width.into(), height.into(), pixels)?)
}

/// Hide the PPM at `secret` inside the PPM at `input`, writing the result
/// to `output`.
pub fn hide_image_file<S, P, Q>(secret: S, input: P, output: Q) -> StegoResult<()>
where
    S: AsRef<Path>,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let secret = quadpix_io::read_image(secret)?;
    let cover = quadpix_io::read_image(input)?;
    let stego = hide_image(&cover, &secret)?;
    quadpix_io::write_image(&stego, output.as_ref())?;
    log::info!("wrote stego image to {}", output.as_ref().display());
    Ok(())
}

/// Extract the secret image hidden in the PPM at `input` and write it to
/// `output`.
pub fn reveal_image_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> StegoResult<()> {
    let image = quadpix_io::read_image(input)?;
    let secret = reveal_image(&image)?;
    quadpix_io::write_image(&secret, output.as_ref())?;
    log::info!(
        "recovered {}x{} secret into {}",
        secret.width(),
        secret.height(),
        output.as_ref().display()
    );
    Ok(())
}
