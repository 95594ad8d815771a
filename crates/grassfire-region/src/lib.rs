//! grassfire-region - Connected-component labeling for grassfire
//!
//! This crate partitions the foreground of a binary image into maximal
//! 8-connected regions and renders them according to a [`LabelingMode`]:
//!
//! - **Label store** - per-pixel labels and per-label areas ([`LabelStore`])
//! - **Region extraction** - explicit-stack depth-first region growing ([`RegionExtractor`])
//! - **Classification** - largest-only, area-threshold and gray-coded rendering
//!
//! Binary input uses 255 for foreground and 0 for background. Rendered
//! output is blank (255) except for the selected regions, which are drawn
//! with the object value (0), or with one gray level per label.
//!
//! # Examples
//!
//! ```
//! use grassfire_region::{LabelingMode, label};
//!
//! #[rustfmt::skip]
//! let input = [
//!     255, 255, 0,   0,
//!     255, 255, 0,   255,
//!     0,   0,   0,   0,
//! ];
//! let out = label(&input, 4, 3, LabelingMode::LargestOnly).unwrap();
//! assert_eq!(&out[..4], &[0, 0, 255, 255]);
//! assert_eq!(out[7], 255);
//! ```

pub mod classify;
pub mod error;
pub mod extract;
pub mod store;

use grassfire_core::Pix;

// Re-export core types
pub use grassfire_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export labeling types
pub use classify::{LabelingMode, render};
pub use extract::{DEFAULT_AREA_THRESHOLD, LabelingOptions, RegionExtractor};
pub use store::{DEFAULT_LABEL_CAPACITY, LabelId, LabelStore};

/// Label a binary buffer with the default options.
///
/// # Errors
///
/// See [`label_with_options`].
pub fn label(input: &[u8], width: u32, height: u32, mode: LabelingMode) -> RegionResult<Vec<u8>> {
    label_with_options(input, width, height, mode, &LabelingOptions::default())
}

/// Label a binary buffer and render the result as a new buffer.
///
/// # Errors
///
/// - [`RegionError::InvalidDimensions`] if a dimension is 0
/// - [`RegionError::DimensionMismatch`] if `input.len() != width * height`
/// - [`RegionError::LabelCapacityExceeded`] if there are more regions than
///   `options.capacity`
pub fn label_with_options(
    input: &[u8],
    width: u32,
    height: u32,
    mode: LabelingMode,
    options: &LabelingOptions,
) -> RegionResult<Vec<u8>> {
    RegionExtractor::new(options.clone()).label(input, width, height, mode)
}

/// Label `input` and write the rendering into `output`.
///
/// `output` is only modified when labeling succeeds.
///
/// # Errors
///
/// As [`label_with_options`], plus [`RegionError::DimensionMismatch`] if
/// `output` has the wrong length.
pub fn label_into(
    input: &[u8],
    output: &mut [u8],
    width: u32,
    height: u32,
    mode: LabelingMode,
    options: &LabelingOptions,
) -> RegionResult<()> {
    extract::check_buffer(output.len(), width, height)?;
    let rendered = label_with_options(input, width, height, mode, options)?;
    output.copy_from_slice(&rendered);
    Ok(())
}

/// Label a binary [`Pix`] and return the rendering as a new image.
pub fn label_pix(pix: &Pix, mode: LabelingMode, options: &LabelingOptions) -> RegionResult<Pix> {
    let out = label_with_options(pix.data(), pix.width(), pix.height(), mode, options)?;
    Ok(Pix::from_vec(pix.width(), pix.height(), out)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_into_leaves_output_on_error() {
        let input = [255, 0, 255, 0, 255];
        let mut output = [7u8; 5];
        let opts = LabelingOptions::new().with_capacity(1);
        let err = label_into(&input, &mut output, 5, 1, LabelingMode::GrayCoded, &opts);
        assert!(matches!(
            err,
            Err(RegionError::LabelCapacityExceeded { capacity: 1 })
        ));
        assert_eq!(output, [7; 5]);

        let mut short = [0u8; 4];
        assert!(matches!(
            label_into(&input, &mut short, 5, 1, LabelingMode::GrayCoded, &opts),
            Err(RegionError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_label_into_success() {
        let input = [255, 0, 255, 0, 255];
        let mut output = [7u8; 5];
        label_into(
            &input,
            &mut output,
            5,
            1,
            LabelingMode::GrayCoded,
            &LabelingOptions::default(),
        )
        .unwrap();
        assert_eq!(output, [85, 0, 170, 0, 255]);
    }

    #[test]
    fn test_label_pix() {
        let pix = Pix::from_vec(3, 1, vec![255, 255, 0]).unwrap();
        let out = label_pix(&pix, LabelingMode::LargestOnly, &LabelingOptions::default()).unwrap();
        assert_eq!(out.data(), &[0, 0, 255]);
        assert_eq!(out.width(), 3);
    }
}
