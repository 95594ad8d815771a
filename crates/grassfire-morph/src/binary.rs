//! Binary morphological operations
//!
//! Implements erosion, dilation, opening, closing and boundary extraction on
//! 8-bit images in the {0, 255} convention. A pixel is foreground iff it
//! equals 255; neighbors outside the image count as background.

use crate::{MorphError, MorphResult, Sel};
use grassfire_core::{Pix, binary};

#[inline]
fn is_set(pix: &Pix, x: i64, y: i64) -> bool {
    x >= 0
        && y >= 0
        && x < pix.width() as i64
        && y < pix.height() as i64
        && pix.get_pixel_unchecked(x as u32, y as u32) == binary::SET
}

fn hit_offsets(sel: &Sel) -> MorphResult<Vec<(i64, i64)>> {
    let offsets: Vec<(i64, i64)> = sel
        .hit_offsets()
        .map(|(dx, dy)| (dx as i64, dy as i64))
        .collect();
    if offsets.is_empty() {
        return Err(MorphError::InvalidSel(
            "structuring element has no hits".to_string(),
        ));
    }
    Ok(offsets)
}

fn to_value(on: bool) -> u8 {
    if on { binary::SET } else { binary::CLEAR }
}

/// Dilate a binary image
///
/// An output pixel is set when any hit of the reflected SEL placed at it
/// covers a foreground pixel.
pub fn dilate(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let offsets = hit_offsets(sel)?;
    let mut out_mut = pix.create_template().to_mut();

    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let (xi, yi) = (x as i64, y as i64);
            let on = offsets
                .iter()
                .any(|&(dx, dy)| is_set(pix, xi - dx, yi - dy));
            out_mut.set_pixel_unchecked(x, y, to_value(on));
        }
    }

    Ok(out_mut.into())
}

/// Erode a binary image
///
/// An output pixel is set only when every hit of the SEL placed at it
/// covers a foreground pixel.
pub fn erode(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let offsets = hit_offsets(sel)?;
    let mut out_mut = pix.create_template().to_mut();

    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let (xi, yi) = (x as i64, y as i64);
            let on = offsets
                .iter()
                .all(|&(dx, dy)| is_set(pix, xi + dx, yi + dy));
            out_mut.set_pixel_unchecked(x, y, to_value(on));
        }
    }

    Ok(out_mut.into())
}

/// Opening: erosion followed by dilation
pub fn open(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let eroded = erode(pix, sel)?;
    dilate(&eroded, sel)
}

/// Closing: dilation followed by erosion
///
/// Foreground touching the image border may be trimmed, since the erosion
/// step sees out-of-image pixels as background.
pub fn close(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    let dilated = dilate(pix, sel)?;
    erode(&dilated, sel)
}

/// Extract the boundary of objects
///
/// An object pixel (equal to `object_value`) is on the boundary when one of
/// its four direct neighbors is not an object pixel; out-of-image neighbors
/// count as non-object. Boundary pixels keep `object_value`, all others are
/// written as its complement `255 - object_value`.
pub fn extract_boundary(pix: &Pix, object_value: u8) -> MorphResult<Pix> {
    let blank = !object_value;
    let (w, h) = (pix.width() as i64, pix.height() as i64);
    let is_object = |x: i64, y: i64| {
        x >= 0
            && y >= 0
            && x < w
            && y < h
            && pix.get_pixel_unchecked(x as u32, y as u32) == object_value
    };

    let mut out_mut = Pix::new_with_value(pix.width(), pix.height(), blank)?.to_mut();
    let mut count = 0usize;
    for y in 0..h {
        for x in 0..w {
            if !is_object(x, y) {
                continue;
            }
            let interior = is_object(x, y - 1)
                && is_object(x, y + 1)
                && is_object(x - 1, y)
                && is_object(x + 1, y);
            if !interior {
                out_mut.set_pixel_unchecked(x as u32, y as u32, object_value);
                count += 1;
            }
        }
    }
    log::debug!("extract_boundary: {count} boundary pixels");

    Ok(out_mut.into())
}
