//! Grassfire Core - Basic data structures for grayscale image processing
//!
//! This crate provides the fundamental data structures used throughout
//! the grassfire toolkit:
//!
//! - [`Pix`] / [`PixMut`] - The 8-bit grayscale image container (immutable / mutable)
//! - [`Histogram`] - 256-bin gray-level histogram with threshold selection
//! - [`ImageFormat`] - File formats understood by the I/O layer
//!
//! Point operations (inversion, brightness, contrast) live on the image
//! types themselves, see [`pix::arith`].
//!
//! # Examples
//!
//! ```
//! use grassfire_core::Pix;
//!
//! let pix = Pix::new_with_value(4, 3, 200).unwrap();
//! let inverted = pix.invert();
//! assert_eq!(inverted.get_pixel(0, 0), Some(55));
//! ```

pub mod error;
pub mod histogram;
pub mod pix;

pub use error::{Error, Result};
pub use histogram::Histogram;
pub use pix::{ImageFormat, Pix, PixMut};

/// Conventional pixel values for binary images.
///
/// Binary images are ordinary 8-bit images restricted to two levels.
pub mod binary {
    /// Fully set pixel (white; the foreground for labeling and morphology)
    pub const SET: u8 = 255;
    /// Fully cleared pixel (black)
    pub const CLEAR: u8 = 0;

    /// Check whether every pixel in `data` is either [`SET`] or [`CLEAR`].
    pub fn is_binary(data: &[u8]) -> bool {
        data.iter().all(|&v| v == SET || v == CLEAR)
    }
}
