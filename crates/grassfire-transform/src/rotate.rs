//! Rotation and flip operations
//!
//! This module provides:
//! - Orthogonal rotations (90/180/270 degrees)
//! - Arbitrary angle rotation about a center point
//! - Horizontal and vertical flips

use crate::{TransformError, TransformResult};
use grassfire_core::Pix;

/// Options for arbitrary-angle rotation
#[derive(Debug, Clone, Default)]
pub struct RotateOptions {
    /// Rotation center (None = image center)
    pub center: Option<(f32, f32)>,
    /// Value for output pixels that map outside the source
    pub fill: u8,
}

impl RotateOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rotation center
    pub fn with_center(mut self, x: f32, y: f32) -> Self {
        self.center = Some((x, y));
        self
    }

    /// Set the background fill value
    pub fn with_fill(mut self, fill: u8) -> Self {
        self.fill = fill;
        self
    }
}

/// Rotate an image by 90-degree increments
///
/// # Arguments
/// * `pix` - Input image
/// * `quads` - Number of 90-degree clockwise rotations (taken modulo 4)
pub fn rotate_orth(pix: &Pix, quads: u32) -> TransformResult<Pix> {
    match quads % 4 {
        0 => Ok(pix.deep_clone()),
        1 => rotate_90(pix, true),
        2 => rotate_180(pix),
        _ => rotate_90(pix, false),
    }
}

/// Rotate an image 90 degrees
///
/// # Arguments
/// * `pix` - Input image
/// * `clockwise` - If true, rotate clockwise; otherwise counterclockwise
pub fn rotate_90(pix: &Pix, clockwise: bool) -> TransformResult<Pix> {
    let w = pix.width();
    let h = pix.height();

    // Output dimensions are swapped
    let mut out_mut = Pix::new(h, w)?.to_mut();

    for y in 0..h {
        for x in 0..w {
            let val = pix.get_pixel_unchecked(x, y);
            let (nx, ny) = if clockwise {
                (h - 1 - y, x)
            } else {
                (y, w - 1 - x)
            };
            out_mut.set_pixel_unchecked(nx, ny, val);
        }
    }

    Ok(out_mut.into())
}

/// Rotate an image 180 degrees
pub fn rotate_180(pix: &Pix) -> TransformResult<Pix> {
    let mut data = pix.data().to_vec();
    data.reverse();
    Ok(Pix::from_vec(pix.width(), pix.height(), data)?)
}

/// Flip an image left-right (horizontal mirror)
pub fn flip_lr(pix: &Pix) -> TransformResult<Pix> {
    let mut out_mut = pix.to_mut();
    for y in 0..pix.height() {
        out_mut.row_data_mut(y).reverse();
    }
    Ok(out_mut.into())
}

/// Flip an image top-bottom (vertical mirror)
pub fn flip_tb(pix: &Pix) -> TransformResult<Pix> {
    let h = pix.height();
    let mut out_mut = pix.create_template().to_mut();
    for y in 0..h {
        out_mut
            .row_data_mut(h - 1 - y)
            .copy_from_slice(pix.row_data(y));
    }
    Ok(out_mut.into())
}

/// Rotate an image by an arbitrary angle
///
/// Positive angles turn the picture counterclockwise as displayed. The
/// canvas keeps its size; each output pixel is inverse-mapped into the
/// source and takes the nearest source pixel, or `options.fill` when it
/// lands outside.
///
/// # Arguments
/// * `pix` - Input image
/// * `degrees` - Rotation angle in degrees
/// * `options` - Center and fill
pub fn rotate(pix: &Pix, degrees: f32, options: &RotateOptions) -> TransformResult<Pix> {
    if !degrees.is_finite() {
        return Err(TransformError::InvalidParameters(format!(
            "rotation angle must be finite, got {degrees}"
        )));
    }

    let w = pix.width();
    let h = pix.height();
    let (cx, cy) = options
        .center
        .unwrap_or(((w as f32 - 1.0) / 2.0, (h as f32 - 1.0) / 2.0));
    let (sin, cos) = degrees.to_radians().sin_cos();
    log::debug!("rotate: {degrees} degrees about ({cx}, {cy})");

    let mut out_mut = Pix::new_with_value(w, h, options.fill)?.to_mut();
    for y in 0..h {
        let dy = y as f32 - cy;
        for x in 0..w {
            let dx = x as f32 - cx;
            let sx = (cx + dx * cos - dy * sin).round();
            let sy = (cy + dx * sin + dy * cos).round();
            if sx >= 0.0 && sy >= 0.0 && sx < w as f32 && sy < h as f32 {
                let val = pix.get_pixel_unchecked(sx as u32, sy as u32);
                out_mut.set_pixel_unchecked(x, y, val);
            }
        }
    }

    Ok(out_mut.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Pix {
        // 3x2: [1 2 3; 4 5 6]
        Pix::from_vec(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn test_flips() {
        assert_eq!(flip_lr(&sample()).unwrap().data(), &[3, 2, 1, 6, 5, 4]);
        assert_eq!(flip_tb(&sample()).unwrap().data(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_orth() {
        let cw = rotate_orth(&sample(), 1).unwrap();
        assert_eq!((cw.width(), cw.height()), (2, 3));
        assert_eq!(cw.data(), &[4, 1, 5, 2, 6, 3]);
        let ccw = rotate_orth(&sample(), 3).unwrap();
        assert_eq!(ccw.data(), &[3, 6, 2, 5, 1, 4]);
        assert_eq!(rotate_orth(&sample(), 2).unwrap().data(), &[6, 5, 4, 3, 2, 1]);
        assert!(rotate_orth(&sample(), 4).unwrap().equals(&sample()));
    }

    #[test]
    fn test_rotate_quarter_turn_matches_orth() {
        let data: Vec<u8> = (0..25).collect();
        let pix = Pix::from_vec(5, 5, data).unwrap();
        let rotated = rotate(&pix, 90.0, &RotateOptions::default()).unwrap();
        // counterclockwise as displayed
        assert!(rotated.equals(&rotate_orth(&pix, 3).unwrap()));
    }

    #[test]
    fn test_rotate_fill_and_center() {
        let pix = Pix::new_with_value(4, 4, 200).unwrap();
        let opts = RotateOptions::new().with_center(0.0, 0.0).with_fill(7);
        let out = rotate(&pix, 180.0, &opts).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(200));
        assert_eq!(out.get_pixel(3, 3), Some(7));
        assert!(rotate(&pix, f32::NAN, &opts).is_err());
    }
}
