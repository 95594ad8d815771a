//! grassfire-io - Image I/O for grassfire
//!
//! Reads and writes the 8-bit grayscale [`Pix`] images the rest of the
//! toolkit operates on:
//!
//! - BMP (feature `bmp`): 1/4/8-bit palettized and 24/32-bit input, 8-bit palettized output
//! - PNM (feature `pnm`): P1/P2/P4/P5 input, P5 output
//! - PNG (feature `png-format`): any color type as input, 8-bit gray output
//!
//! Color input is reduced to luminance on read.
//!
//! # Examples
//!
//! ```
//! use grassfire_core::{ImageFormat, Pix};
//!
//! let pix = Pix::new_with_value(3, 2, 90).unwrap();
//! let bytes = grassfire_io::write_image_mem(&pix, ImageFormat::Pnm).unwrap();
//! let back = grassfire_io::read_image_mem(&bytes).unwrap();
//! assert!(back.equals(&pix));
//! ```

#[cfg(feature = "bmp")]
pub mod bmp;
mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use grassfire_core::ImageFormat;

use grassfire_core::Pix;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Luminance of an RGB triple with integer weights 77/150/29 (sum 256).
///
/// Gray triples map to themselves.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32 + 128) >> 8) as u8
}

/// Read an image from a file, detecting the format from its contents.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let pix = read_image_mem(&data)?;
    log::debug!(
        "read {} ({}x{}, {:?})",
        path.display(),
        pix.width(),
        pix.height(),
        pix.informat()
    );
    Ok(pix)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(data, format)
}

fn read_image_format(data: &[u8], format: ImageFormat) -> IoResult<Pix> {
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(data),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(data),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(std::io::Cursor::new(data)),
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support is not enabled",
            other
        ))),
    }
}

/// Resolve the output format for `path`.
///
/// [`ImageFormat::Unknown`] is replaced by the format implied by the file
/// extension, falling back to BMP.
pub fn output_format<P: AsRef<Path>>(path: P, format: ImageFormat) -> ImageFormat {
    if format != ImageFormat::Unknown {
        return format;
    }
    match path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(ImageFormat::from_extension)
    {
        Some(ImageFormat::Unknown) | None => ImageFormat::Bmp,
        Some(f) => f,
    }
}

/// Write an image to a file.
///
/// Pass [`ImageFormat::Unknown`] to pick the format from the extension.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let format = output_format(path, format);
    // Encode first so a failed encode leaves no partial file behind
    let bytes = write_image_mem(pix, format)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    log::debug!(
        "wrote {} ({}x{}, {:?})",
        path.display(),
        pix.width(),
        pix.height(),
        format
    );
    Ok(())
}

/// Encode an image into a byte buffer.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::write_bmp(pix, &mut buf)?,
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, &mut buf)?,
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, &mut buf)?,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {:?}",
                other
            )));
        }
    }
    Ok(buf)
}
