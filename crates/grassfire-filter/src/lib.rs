//! grassfire-filter - Image filtering operations
//!
//! This crate provides filtering operations on 8-bit gray images:
//!
//! - Convolution with arbitrary kernels and the classic 3x3 presets
//! - Edge detection (Laplacian, Prewitt, Sobel) and sharpening
//! - Rank filtering (median, min, max filters)
//! - Histogram stretching and equalization
//! - Binarization with a fixed or iteratively selected threshold
//!
//! Neighborhood filters replicate the border: samples outside the image
//! take the value of the nearest edge pixel.
//!
//! # Examples
//!
//! ```
//! use grassfire_core::Pix;
//! use grassfire_filter::{Kernel, convolve_gray};
//!
//! let pix = Pix::new_with_value(8, 8, 100).unwrap();
//! let blurred = convolve_gray(&pix, &Kernel::gaussian3()).unwrap();
//! assert!(blurred.equals(&pix));
//! ```

pub mod convolve;
pub mod edge;
pub mod enhance;
mod error;
pub mod kernel;
pub mod rank;
pub mod threshold;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use convolve::{box_blur, convolve_gray, convolve_magnitude, gaussian_blur};
pub use edge::{EdgeOrientation, laplacian_edge, prewitt_edge, sharpen, sobel_edge};
pub use enhance::{equalize, stretch_contrast};
pub use rank::{max_filter, median_filter, min_filter, rank_filter};
pub use threshold::{ThresholdOptions, auto_threshold, binarize, binarize_auto};
