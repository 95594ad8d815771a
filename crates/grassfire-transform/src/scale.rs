//! Image scaling

use crate::{TransformError, TransformResult};
use grassfire_core::Pix;

/// Scale an image using nearest-neighbor sampling
///
/// The output is `round(w * scale_x) x round(h * scale_y)`, at least 1x1.
/// Output pixel `(x, y)` takes source pixel
/// `(floor(x / scale_x), floor(y / scale_y))`, clamped to the image.
///
/// # Arguments
/// * `pix` - Input image
/// * `scale_x` - Horizontal scale factor
/// * `scale_y` - Vertical scale factor
pub fn scale_by_sampling(pix: &Pix, scale_x: f32, scale_y: f32) -> TransformResult<Pix> {
    for s in [scale_x, scale_y] {
        if !s.is_finite() || s <= 0.0 {
            return Err(TransformError::InvalidScaleFactor(format!(
                "scale factors must be positive, got ({scale_x}, {scale_y})"
            )));
        }
    }

    let ws = pix.width();
    let hs = pix.height();
    let wd = ((ws as f32 * scale_x).round() as u32).max(1);
    let hd = ((hs as f32 * scale_y).round() as u32).max(1);
    log::debug!("scale_by_sampling: {ws}x{hs} -> {wd}x{hd}");

    let src_x: Vec<u32> = (0..wd)
        .map(|x| ((x as f32 / scale_x) as u32).min(ws - 1))
        .collect();
    let mut out_mut = Pix::new(wd, hd)?.to_mut();
    for y in 0..hd {
        let sy = ((y as f32 / scale_y) as u32).min(hs - 1);
        let src_row = pix.row_data(sy);
        for (dst, &sx) in out_mut.row_data_mut(y).iter_mut().zip(&src_x) {
            *dst = src_row[sx as usize];
        }
    }

    Ok(out_mut.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upscale() {
        let pix = Pix::from_vec(2, 1, vec![10, 20]).unwrap();
        let out = scale_by_sampling(&pix, 2.0, 3.0).unwrap();
        assert_eq!((out.width(), out.height()), (4, 3));
        assert_eq!(out.row_data(2), &[10, 10, 20, 20]);
    }

    #[test]
    fn test_downscale_min_size() {
        let pix = Pix::from_vec(4, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let half = scale_by_sampling(&pix, 0.5, 0.5).unwrap();
        assert_eq!((half.width(), half.height()), (2, 1));
        assert_eq!(half.data(), &[1, 3]);
        let tiny = scale_by_sampling(&pix, 0.01, 0.01).unwrap();
        assert_eq!((tiny.width(), tiny.height()), (1, 1));
    }

    #[test]
    fn test_invalid_factor() {
        let pix = Pix::new(2, 2).unwrap();
        assert!(scale_by_sampling(&pix, 0.0, 1.0).is_err());
        assert!(scale_by_sampling(&pix, 1.0, -2.0).is_err());
    }
}
