//! Bit-level helpers: one payload bit per pixel, in the pixel's LSB

/// Pixels needed to carry one byte
pub(crate) const BITS_PER_BYTE: usize = 8;

/// Write `value` into the LSBs of `pixels[..8]`, most significant bit first.
pub(crate) fn embed_byte(pixels: &mut [u8], value: u8) {
    for (i, pixel) in pixels.iter_mut().take(BITS_PER_BYTE).enumerate() {
        let bit = (value >> (7 - i)) & 1;
        *pixel = (*pixel & 0xFE) | bit;
    }
}

/// Read a byte from the LSBs of `pixels[..8]`, most significant bit first.
pub(crate) fn extract_byte(pixels: &[u8]) -> u8 {
    pixels
        .iter()
        .take(BITS_PER_BYTE)
        .fold(0u8, |acc, &pixel| (acc << 1) | (pixel & 1))
}

/// Embed `bytes` back to back starting at pixel 0.
///
/// The caller guarantees `pixels.len() >= 8 * bytes.len()`.
pub(crate) fn embed_bytes(pixels: &mut [u8], bytes: &[u8]) {
    for (chunk, &byte) in pixels.chunks_exact_mut(BITS_PER_BYTE).zip(bytes) {
        embed_byte(chunk, byte);
    }
}

/// Bytes carried by `pixels`, one per complete group of eight.
pub(crate) fn extract_bytes(pixels: &[u8]) -> impl Iterator<Item = u8> + '_ {
    pixels.chunks_exact(BITS_PER_BYTE).map(extract_byte)
}
