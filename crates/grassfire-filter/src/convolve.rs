//! Convolution operations
//!
//! Implements image convolution with arbitrary kernels.

use crate::{FilterError, FilterResult, Kernel};
use grassfire_core::Pix;

/// Weighted sum of the kernel over the neighborhood of `(x, y)`.
///
/// Uses replicate (clamp) border handling.
#[inline]
fn kernel_sum(pix: &Pix, kernel: &Kernel, x: u32, y: u32) -> f32 {
    let kcx = kernel.center_x() as i64;
    let kcy = kernel.center_y() as i64;
    let kw = kernel.width();
    let mut sum = 0.0f32;
    for (i, &k) in kernel.data().iter().enumerate() {
        if k == 0.0 {
            continue;
        }
        let kx = (i as u32 % kw) as i64;
        let ky = (i as u32 / kw) as i64;
        let pixel = pix.get_pixel_clamped(x as i64 + kx - kcx, y as i64 + ky - kcy);
        sum += pixel as f32 * k;
    }
    sum
}

/// Convolve an 8-bit image with a kernel
///
/// Uses replicate (clamp) border handling: pixels outside the image boundary
/// are treated as having the same value as the nearest edge pixel. Results
/// are rounded and clipped to `[0, 255]`.
pub fn convolve_gray(pix: &Pix, kernel: &Kernel) -> FilterResult<Pix> {
    let mut out_mut = pix.create_template().to_mut();

    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let result = kernel_sum(pix, kernel, x, y).round().clamp(0.0, 255.0) as u8;
            out_mut.set_pixel_unchecked(x, y, result);
        }
    }

    Ok(out_mut.into())
}

/// Convolve and keep the scaled magnitude of the response.
///
/// Each output pixel is `|sum| / divisor`, truncated and clipped to 255.
/// Suited to derivative kernels whose responses are signed.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `divisor` is not positive.
pub fn convolve_magnitude(pix: &Pix, kernel: &Kernel, divisor: f32) -> FilterResult<Pix> {
    if divisor.is_nan() || divisor <= 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "divisor must be > 0, got {divisor}"
        )));
    }
    let mut out_mut = pix.create_template().to_mut();

    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let mag = (kernel_sum(pix, kernel, x, y).abs() / divisor).min(255.0) as u8;
            out_mut.set_pixel_unchecked(x, y, mag);
        }
    }

    Ok(out_mut.into())
}

/// Box blur with a `(2*radius+1)` square window.
pub fn box_blur(pix: &Pix, radius: u32) -> FilterResult<Pix> {
    let kernel = Kernel::box_kernel(2 * radius + 1)?;
    convolve_gray(pix, &kernel)
}

/// 3x3 Gaussian blur.
pub fn gaussian_blur(pix: &Pix) -> FilterResult<Pix> {
    convolve_gray(pix, &Kernel::gaussian3())
}
