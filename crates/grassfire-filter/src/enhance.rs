//! Histogram-based contrast enhancement
//!
//! Both operations build a 256-entry lookup table from the image histogram
//! and map every pixel through it.

use crate::FilterResult;
use grassfire_core::{Histogram, Pix};

fn apply_lut(pix: &Pix, lut: &[u8; 256]) -> Pix {
    let mut out = pix.to_mut();
    for v in out.data_mut() {
        *v = lut[*v as usize];
    }
    out.into()
}

/// Linear contrast stretch between the image minimum and maximum.
///
/// Values at or below the minimum become 0; the rest map to
/// `trunc((v - low) / (high - low) * 255)`. A flat image maps to 0.
pub fn stretch_contrast(pix: &Pix) -> FilterResult<Pix> {
    let hist = Histogram::from_pix(pix);
    let (Some(low), Some(high)) = (hist.min_value(), hist.max_value()) else {
        return Ok(pix.deep_clone());
    };

    let mut lut = [0u8; 256];
    if high > low {
        let range = (high - low) as f32;
        for (v, entry) in lut.iter_mut().enumerate().skip(low as usize + 1) {
            let scaled = (v as f32 - low as f32) * 255.0 / range;
            *entry = scaled.min(255.0) as u8;
        }
    }
    log::debug!("stretch_contrast: range [{low}, {high}]");
    Ok(apply_lut(pix, &lut))
}

/// Histogram equalization.
///
/// Each value maps to `trunc(255 / N * cumulative[v])` where `N` is the
/// pixel count.
pub fn equalize(pix: &Pix) -> FilterResult<Pix> {
    let hist = Histogram::from_pix(pix);
    let total = hist.total();
    if total == 0 {
        return Ok(pix.deep_clone());
    }

    let cumulative = hist.cumulative();
    let mut lut = [0u8; 256];
    for (entry, &c) in lut.iter_mut().zip(cumulative.iter()) {
        *entry = (c as f64 * 255.0 / total as f64).min(255.0) as u8;
    }
    Ok(apply_lut(pix, &lut))
}
