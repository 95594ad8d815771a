//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//! Checked accessors validate `(x, y)` against the image bounds and never
//! wrap an out-of-range coordinate onto a neighbouring row.

use super::{Pix, PixMut};
use crate::error::{Error, Result};

#[inline]
fn offset(width: u32, height: u32, x: u32, y: u32) -> Option<usize> {
    (x < width && y < height).then(|| y as usize * width as usize + x as usize)
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        offset(self.width(), self.height(), x, y).map(|i| self.data()[i])
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset is past the end of the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[y as usize * self.width() as usize + x as usize]
    }

    /// Get a pixel using signed coordinates, clamping them to the image.
    ///
    /// Used by neighborhood operations that replicate the border.
    #[inline]
    pub fn get_pixel_clamped(&self, x: i64, y: i64) -> u8 {
        let cx = x.clamp(0, self.width() as i64 - 1) as u32;
        let cy = y.clamp(0, self.height() as i64 - 1) as u32;
        self.get_pixel_unchecked(cx, cy)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        offset(self.width(), self.height(), x, y).map(|i| self.data()[i])
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[y as usize * self.width() as usize + x as usize]
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        let (width, height) = (self.width(), self.height());
        let i = offset(width, height, x, y).ok_or(Error::PixelOutOfBounds {
            x,
            y,
            width,
            height,
        })?;
        self.data_mut()[i] = val;
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset is past the end of the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let i = y as usize * self.width() as usize + x as usize;
        self.data_mut()[i] = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_pixel() {
        let pix = Pix::new(4, 3).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_pixel(3, 2, 9).unwrap();
        assert_eq!(pm.get_pixel(3, 2), Some(9));
        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(3, 2), Some(9));
        assert_eq!(pix.get_pixel_unchecked(3, 2), 9);
        assert_eq!(pix.data()[11], 9);
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let pix = Pix::new(4, 3).unwrap();
        assert_eq!(pix.get_pixel(4, 0), None);
        assert_eq!(pix.get_pixel(0, 3), None);

        let mut pm = pix.to_mut();
        let err = pm.set_pixel(4, 0, 1).unwrap_err();
        assert!(matches!(err, Error::PixelOutOfBounds { x: 4, y: 0, .. }));
        // x past the end must not wrap onto the next row
        assert_eq!(pm.get_pixel(0, 1), Some(0));
    }

    #[test]
    fn test_clamped_access() {
        let pix = Pix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(pix.get_pixel_clamped(-5, -5), 1);
        assert_eq!(pix.get_pixel_clamped(9, 0), 2);
        assert_eq!(pix.get_pixel_clamped(0, 9), 3);
        assert_eq!(pix.get_pixel_clamped(1, 1), 4);
    }
}
