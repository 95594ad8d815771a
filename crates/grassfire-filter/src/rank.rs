//! Rank filtering operations
//!
//! Provides rank (order-statistic) filters including median, min, and max
//! filters over odd square windows. Border pixels are replicated.

use crate::{FilterError, FilterResult};
use grassfire_core::Pix;

fn check_size(size: u32) -> FilterResult<()> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "window size must be odd and positive, got {size}"
        )));
    }
    Ok(())
}

/// Apply a rank filter.
///
/// # Arguments
/// * `pix` - Input 8-bit image
/// * `size` - Odd window side length
/// * `rank` - Rank value in [0.0, 1.0] (0.0=min, 0.5=median, 1.0=max)
///
/// The output pixel is the element at index `round(rank * (n - 1))` of the
/// sorted window values, where `n = size * size`.
pub fn rank_filter(pix: &Pix, size: u32, rank: f32) -> FilterResult<Pix> {
    check_size(size)?;
    if !(0.0..=1.0).contains(&rank) {
        return Err(FilterError::InvalidParameters(format!(
            "rank must be in [0, 1], got {rank}"
        )));
    }
    if size == 1 {
        return Ok(pix.deep_clone());
    }

    let half = (size / 2) as i64;
    let n = (size * size) as usize;
    let index = (rank * (n - 1) as f32).round() as usize;
    let mut window: Vec<u8> = Vec::with_capacity(n);
    let mut out_mut = pix.create_template().to_mut();

    for y in 0..pix.height() {
        for x in 0..pix.width() {
            window.clear();
            for dy in -half..=half {
                for dx in -half..=half {
                    window.push(pix.get_pixel_clamped(x as i64 + dx, y as i64 + dy));
                }
            }
            let (_, &mut value, _) = window.select_nth_unstable(index);
            out_mut.set_pixel_unchecked(x, y, value);
        }
    }

    Ok(out_mut.into())
}

/// Apply median filter (rank = 0.5).
pub fn median_filter(pix: &Pix, size: u32) -> FilterResult<Pix> {
    rank_filter(pix, size, 0.5)
}

/// Apply minimum filter (rank = 0.0).
pub fn min_filter(pix: &Pix, size: u32) -> FilterResult<Pix> {
    rank_filter(pix, size, 0.0)
}

/// Apply maximum filter (rank = 1.0).
pub fn max_filter(pix: &Pix, size: u32) -> FilterResult<Pix> {
    rank_filter(pix, size, 1.0)
}
