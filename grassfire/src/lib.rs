//! grassfire - Connected-component labeling and 8-bit image processing
//!
//! The core of the toolkit is region labeling: a label store plus a region
//! extractor that grows 8-connected components with an explicit stack and
//! renders them as the largest object, the objects above an area
//! threshold, or a gray-coded label map. Around it sit the classic point,
//! neighborhood, geometric and morphological operations on 8-bit images.
//!
//! # Example
//!
//! ```
//! use grassfire::Pix;
//! use grassfire::region::{LabelingMode, LabelingOptions, label_pix};
//!
//! let mut pm = Pix::new(6, 4).unwrap().to_mut();
//! pm.set_pixel(1, 1, 255).unwrap();
//! pm.set_pixel(2, 2, 255).unwrap();
//! let pix: Pix = pm.into();
//!
//! let out = label_pix(&pix, LabelingMode::LargestOnly, &LabelingOptions::default()).unwrap();
//! assert_eq!(out.count_pixels_with_value(0), 2);
//! ```

pub mod cli;
mod cli_error;

pub use cli_error::{CliError, CliResult};

// Re-export core types (primary data structures used everywhere)
pub use grassfire_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use grassfire_filter as filter;
pub use grassfire_io as io;
pub use grassfire_morph as morph;
pub use grassfire_region as region;
pub use grassfire_transform as transform;
