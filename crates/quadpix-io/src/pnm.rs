//! PPM (Portable Pixmap) ASCII format support
//!
//! Reads and writes the plain `P3` variant only. Images are grayscale, so
//! the reader keeps the red channel of each triple and the writer repeats
//! the intensity into all three channels.
//!
//! # Layout
//!
//! ```text
//! P3
//! # optional comments
//! <width> <height>
//! 255
//! r g b r g b ...
//! ```
//!
//! `#` starts a comment that runs to the end of the line; comments may
//! appear between any two tokens. The maximum sample value must be 255.

use crate::{IoError, IoResult};
use std::fmt::Write as _;
use quadpix_core::{MAX_DIMENSION, RasterImage};
use std::io::{Read, Write};

/// Required maximum sample value
const PPM_MAXVAL: u32 = 255;

/// Maximum input size in bytes: a full-size image with 3-digit samples
/// and generous whitespace fits comfortably.
const MAX_INPUT_SIZE: u64 = (MAX_DIMENSION as u64) * (MAX_DIMENSION as u64) * 16 + 65_536;

/// Whitespace/comment-aware token scanner over the raw file bytes.
struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn skip_separators(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_separators();
        let start = self.pos;
        while let Some(&b) = self.data.get(self.pos) {
            if b.is_ascii_whitespace() || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.data[start..self.pos])
    }

    /// Read the next token as an unsigned integer.
    ///
    /// Only bare decimal digits are accepted, so signs are rejected.
    fn next_u32(&mut self, what: &str) -> IoResult<u32> {
        let token = self
            .next_token()
            .ok_or_else(|| IoError::InvalidData(format!("unexpected end of data reading {what}")))?;
        let invalid = || {
            IoError::InvalidData(format!(
                "invalid {what}: '{}'",
                String::from_utf8_lossy(token)
            ))
        };
        if !token.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(invalid)
    }

    /// Read the next token as a sample in `0..=255`.
    fn next_sample(&mut self, index: usize) -> IoResult<u8> {
        let value = self.next_u32("pixel sample")?;
        u8::try_from(value).map_err(|_| {
            IoError::InvalidData(format!(
                "sample {value} at pixel {index} is outside 0..={PPM_MAXVAL}"
            ))
        })
    }
}

/// Read a `P3` image from a reader.
///
/// # Errors
///
/// - [`IoError::Io`] if the reader fails.
/// - [`IoError::InvalidData`] for a wrong magic number, a maximum value
///   other than 255, out-of-range dimensions, malformed or out-of-range
///   samples, or fewer than `width * height` triples.
pub fn read_pnm<R: Read>(reader: R) -> IoResult<RasterImage> {
    let mut buf = Vec::new();
    reader.take(MAX_INPUT_SIZE).read_to_end(&mut buf)?;
    decode_pnm(&buf)
}

/// Decode a `P3` image held in memory.
pub fn decode_pnm(data: &[u8]) -> IoResult<RasterImage> {
    let mut tokens = Tokens::new(data);

    match tokens.next_token() {
        Some(magic) if magic == b"P3" => {}
        Some(other) => {
            return Err(IoError::InvalidData(format!(
                "bad magic number '{}', expected P3",
                String::from_utf8_lossy(other)
            )));
        }
        None => return Err(IoError::InvalidData("empty PPM data".to_string())),
    }

    let width = tokens.next_u32("width")?;
    let height = tokens.next_u32("height")?;
    let maxval = tokens.next_u32("maximum value")?;
    if maxval != PPM_MAXVAL {
        return Err(IoError::InvalidData(format!(
            "maximum value {maxval} not supported, expected {PPM_MAXVAL}"
        )));
    }
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(IoError::InvalidData(format!(
            "dimensions {width}x{height} outside 1..={MAX_DIMENSION}"
        )));
    }

    let npixels = width as usize * height as usize;
    let mut pixels = Vec::with_capacity(npixels);
    for index in 0..npixels {
        let red = tokens.next_sample(index)?;
        // Green and blue are validated but dropped.
        tokens.next_sample(index)?;
        tokens.next_sample(index)?;
        pixels.push(red);
    }

    Ok(RasterImage::from_data(width, height, pixels)?)
}

/// Write an image as `P3` to a writer.
///
/// One image row per output line; each pixel is written as `v v v`.
pub fn write_pnm<W: Write>(image: &RasterImage, mut writer: W) -> IoResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "{PPM_MAXVAL}")?;

    let mut line = String::with_capacity(image.width() as usize * 12);
    for row in 0..image.height() {
        line.clear();
        if let Some(values) = image.row_data(row) {
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    line.push(' ');
                }
                let _ = write!(line, "{v} {v} {v}");
            }
        }
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}
