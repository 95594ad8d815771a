//! Edge detection and sharpening
//!
//! Derivative filters report the scaled magnitude of the kernel response.
//! The divisors normalize each kernel so a full 0 to 255 step maps to 255.

use crate::convolve::{convolve_gray, convolve_magnitude};
use crate::{FilterResult, Kernel};
use grassfire_core::Pix;

const LAPLACIAN_DIVISOR: f32 = 8.0;
const PREWITT_DIVISOR: f32 = 3.0;
const SOBEL_DIVISOR: f32 = 4.0;

/// Edge orientation to detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeOrientation {
    /// Horizontal edges (intensity changes along y)
    Horizontal,
    /// Vertical edges (intensity changes along x)
    Vertical,
    /// Both, combined by taking the per-pixel maximum
    #[default]
    All,
}

impl std::str::FromStr for EdgeOrientation {
    type Err = crate::FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h" | "horizontal" => Ok(EdgeOrientation::Horizontal),
            "v" | "vertical" => Ok(EdgeOrientation::Vertical),
            "all" | "both" => Ok(EdgeOrientation::All),
            other => Err(crate::FilterError::InvalidParameters(format!(
                "unknown edge orientation '{other}'"
            ))),
        }
    }
}

fn pixelwise_max(a: &Pix, b: &Pix) -> Pix {
    let mut out = a.to_mut();
    for (d, &s) in out.data_mut().iter_mut().zip(b.data()) {
        *d = (*d).max(s);
    }
    out.into()
}

fn directional_edge(
    pix: &Pix,
    kx: &Kernel,
    ky: &Kernel,
    divisor: f32,
    orientation: EdgeOrientation,
) -> FilterResult<Pix> {
    match orientation {
        EdgeOrientation::Horizontal => convolve_magnitude(pix, ky, divisor),
        EdgeOrientation::Vertical => convolve_magnitude(pix, kx, divisor),
        EdgeOrientation::All => {
            let gx = convolve_magnitude(pix, kx, divisor)?;
            let gy = convolve_magnitude(pix, ky, divisor)?;
            Ok(pixelwise_max(&gx, &gy))
        }
    }
}

/// Sobel edge detection
///
/// Output is `|response| / 4`, clipped to 255.
pub fn sobel_edge(pix: &Pix, orientation: EdgeOrientation) -> FilterResult<Pix> {
    directional_edge(
        pix,
        &Kernel::sobel_x(),
        &Kernel::sobel_y(),
        SOBEL_DIVISOR,
        orientation,
    )
}

/// Prewitt edge detection
///
/// Output is `|response| / 3`, clipped to 255.
pub fn prewitt_edge(pix: &Pix, orientation: EdgeOrientation) -> FilterResult<Pix> {
    directional_edge(
        pix,
        &Kernel::prewitt_x(),
        &Kernel::prewitt_y(),
        PREWITT_DIVISOR,
        orientation,
    )
}

/// Laplacian edge detection (8-neighbor)
pub fn laplacian_edge(pix: &Pix) -> FilterResult<Pix> {
    convolve_magnitude(pix, &Kernel::laplacian(), LAPLACIAN_DIVISOR)
}

/// Sharpen with the Laplacian high-pass kernel (center 9).
pub fn sharpen(pix: &Pix) -> FilterResult<Pix> {
    convolve_gray(pix, &Kernel::laplacian_sharpen())
}
