//! Binarization
//!
//! Maps an 8-bit image onto the {0, 255} binary convention: values below the
//! threshold become 0, everything else 255.

use crate::{FilterError, FilterResult};
use grassfire_core::{Histogram, Pix, binary};

/// Default convergence tolerance for the iterative threshold search.
pub const DEFAULT_EPSILON: u32 = 2;

/// Options for automatic threshold selection
#[derive(Debug, Clone)]
pub struct ThresholdOptions {
    /// Stop once the threshold moves by less than this many gray levels
    pub epsilon: u32,
}

impl Default for ThresholdOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl ThresholdOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the convergence tolerance
    pub fn with_epsilon(mut self, epsilon: u32) -> Self {
        self.epsilon = epsilon;
        self
    }
}

/// Binarize with a fixed threshold: `v < threshold` → 0, else 255.
pub fn binarize(pix: &Pix, threshold: u8) -> FilterResult<Pix> {
    let mut out = pix.to_mut();
    for v in out.data_mut() {
        *v = if *v < threshold {
            binary::CLEAR
        } else {
            binary::SET
        };
    }
    Ok(out.into())
}

/// Pick a threshold from the image histogram by iterative mean refinement.
pub fn auto_threshold(pix: &Pix, options: &ThresholdOptions) -> FilterResult<u8> {
    if options.epsilon == 0 {
        return Err(FilterError::InvalidParameters(
            "epsilon must be > 0".to_string(),
        ));
    }
    Histogram::from_pix(pix)
        .iterative_threshold(options.epsilon)
        .ok_or_else(|| FilterError::InvalidParameters("image has no pixels".to_string()))
}

/// Binarize with an automatically selected threshold.
///
/// Returns the binary image together with the threshold used.
pub fn binarize_auto(pix: &Pix, options: &ThresholdOptions) -> FilterResult<(Pix, u8)> {
    let threshold = auto_threshold(pix, options)?;
    log::debug!("binarize_auto: threshold {threshold}");
    Ok((binarize(pix, threshold)?, threshold))
}
