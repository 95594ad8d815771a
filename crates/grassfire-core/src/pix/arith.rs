//! Point operations on gray values
//!
//! - Inversion (`invert`)
//! - Brightness shift (`add_constant`)
//! - Contrast gain (`multiply_constant`)
//!
//! Each has an in-place variant on [`PixMut`].

use super::{Pix, PixMut};
use crate::error::{Error, Result};

impl Pix {
    /// Invert every pixel: `v -> 255 - v`.
    ///
    /// # Example
    ///
    /// ```
    /// use grassfire_core::Pix;
    ///
    /// let pix = Pix::new(10, 10).unwrap();
    /// assert_eq!(pix.invert().get_pixel(0, 0), Some(255));
    /// ```
    pub fn invert(&self) -> Pix {
        let mut result = self.to_mut();
        result.invert_inplace();
        result.into()
    }

    /// Add a constant value to all pixels.
    ///
    /// Values are clipped to `[0, 255]`.
    ///
    /// # Arguments
    ///
    /// * `val` - Value to add (can be negative for darkening)
    pub fn add_constant(&self, val: i32) -> Pix {
        let mut result = self.to_mut();
        result.add_constant_inplace(val);
        result.into()
    }

    /// Multiply all pixels by a constant factor.
    ///
    /// Products above 255 are clipped; fractional results are truncated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `factor` is negative or not finite.
    pub fn multiply_constant(&self, factor: f32) -> Result<Pix> {
        let mut result = self.to_mut();
        result.multiply_constant_inplace(factor)?;
        Ok(result.into())
    }
}

impl PixMut {
    /// Invert every pixel in place.
    pub fn invert_inplace(&mut self) {
        for v in self.data_mut() {
            *v = 255 - *v;
        }
    }

    /// Add a constant value to all pixels in place, clipping to `[0, 255]`.
    pub fn add_constant_inplace(&mut self, val: i32) {
        for v in self.data_mut() {
            *v = (*v as i32).saturating_add(val).clamp(0, 255) as u8;
        }
    }

    /// Multiply all pixels by a constant factor in place.
    pub fn multiply_constant_inplace(&mut self, factor: f32) -> Result<()> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "contrast factor must be finite and >= 0, got {factor}"
            )));
        }
        for v in self.data_mut() {
            *v = (*v as f32 * factor).min(255.0) as u8;
        }
        Ok(())
    }
}
