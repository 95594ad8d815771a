//! Synthetic test images
//!
//! Builders for the small deterministic images the regression tests run on.
//! Binary images use 255 for foreground and 0 for background.

use grassfire_core::{Pix, Result};
use rand::{RngExt, SeedableRng, rngs::StdRng};

/// Build a binary image from rows of text.
///
/// `#` (or any character other than `.` and space) becomes 255, `.` and
/// space become 0. All rows must have the same length.
///
/// ```
/// let pix = grassfire_test::synth::from_ascii(&[
///     "#.",
///     ".#",
/// ]).unwrap();
/// assert_eq!(pix.data(), &[255, 0, 0, 255]);
/// ```
pub fn from_ascii(rows: &[&str]) -> Result<Pix> {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
    let data: Vec<u8> = rows
        .iter()
        .flat_map(|r| r.chars())
        .map(|c| if c == '.' || c == ' ' { 0 } else { 255 })
        .collect();
    Pix::from_vec(width, height, data)
}

/// Uniform image.
pub fn blank(width: u32, height: u32, value: u8) -> Result<Pix> {
    Pix::new_with_value(width, height, value)
}

/// Fill the rectangle with top-left `(x, y)` and size `w x h` with `value`.
///
/// The rectangle is clipped to the image.
pub fn fill_rect(pix: &Pix, x: u32, y: u32, w: u32, h: u32, value: u8) -> Pix {
    let mut pm = pix.to_mut();
    let x_end = x.saturating_add(w).min(pm.width());
    let y_end = y.saturating_add(h).min(pm.height());
    for yy in y..y_end {
        for xx in x..x_end {
            pm.set_pixel_unchecked(xx, yy, value);
        }
    }
    pm.into()
}

/// Checkerboard of `cell x cell` squares, the top-left square set to 255.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> Result<Pix> {
    let cell = cell.max(1);
    let mut pm = Pix::new(width, height)?.to_mut();
    for y in 0..height {
        for x in 0..width {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                pm.set_pixel_unchecked(x, y, 255);
            }
        }
    }
    Ok(pm.into())
}

/// Horizontal ramp from 0 at the left edge to 255 at the right edge.
pub fn gradient(width: u32, height: u32) -> Result<Pix> {
    let mut pm = Pix::new(width, height)?.to_mut();
    let span = width.saturating_sub(1).max(1);
    for y in 0..height {
        let row = pm.row_data_mut(y);
        for (x, v) in row.iter_mut().enumerate() {
            *v = (x as u32 * 255 / span) as u8;
        }
    }
    Ok(pm.into())
}

/// Random binary image where each pixel is foreground with probability `density`.
pub fn random_binary(width: u32, height: u32, density: f64, seed: u64) -> Result<Pix> {
    let mut rng = StdRng::seed_from_u64(seed);
    let p = density.clamp(0.0, 1.0);
    let mut pm = Pix::new(width, height)?.to_mut();
    for v in pm.data_mut() {
        *v = if rng.random_bool(p) { 255 } else { 0 };
    }
    Ok(pm.into())
}

/// Random gray image with values uniformly drawn from `0..=255`.
pub fn random_gray(width: u32, height: u32, seed: u64) -> Result<Pix> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pm = Pix::new(width, height)?.to_mut();
    for v in pm.data_mut() {
        *v = rng.random_range(0..=255u8);
    }
    Ok(pm.into())
}
