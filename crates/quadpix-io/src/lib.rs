//! quadpix-io - Image I/O for quadpix
//!
//! Grayscale images travel as plain ASCII PPM (`P3`). This crate provides
//! file and in-memory entry points on top of the [`pnm`] codec.
//!
//! # Examples
//!
//! ```
//! use quadpix_core::RasterImage;
//! use quadpix_io::{read_image_mem, write_image_mem};
//!
//! let image = RasterImage::new_filled(4, 3, 42).unwrap();
//! let bytes = write_image_mem(&image).unwrap();
//! assert!(bytes.starts_with(b"P3\n4 3\n255\n"));
//! assert_eq!(read_image_mem(&bytes).unwrap(), image);
//! ```

mod error;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use pnm::{decode_pnm, read_pnm, write_pnm};

use quadpix_core::RasterImage;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read an image from a file path.
///
/// # Errors
///
/// [`IoError::Io`] if the file cannot be opened or read,
/// [`IoError::InvalidData`] if its contents are not a valid `P3` image.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<RasterImage> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let image = read_pnm(BufReader::new(file))?;
    log::debug!(
        "read {}x{} image from {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(image)
}

/// Read an image from memory.
pub fn read_image_mem(data: &[u8]) -> IoResult<RasterImage> {
    decode_pnm(data)
}

/// Write an image to a file path.
///
/// The image is encoded in memory first, so the file is only created once
/// the full contents are ready.
pub fn write_image<P: AsRef<Path>>(image: &RasterImage, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let data = write_image_mem(image)?;
    std::fs::write(path, data)?;
    log::debug!(
        "wrote {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// Write an image to memory.
pub fn write_image_mem(image: &RasterImage) -> IoResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(image.pixel_count() * 12 + 32);
    write_pnm(image, &mut buf)?;
    Ok(buf)
}
