//! grassfire-morph - Morphological operations for binary images
//!
//! This crate provides:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Binary morphology: erosion, dilation, opening, closing
//! - Object boundary extraction
//! - Zhang-Suen thinning (skeletonization)
//!
//! Binary images use the {0, 255} convention with 255 as foreground.
//!
//! # Examples
//!
//! ```
//! use grassfire_core::Pix;
//! use grassfire_morph::{Sel, dilate, erode};
//!
//! let mut pm = Pix::new(7, 7).unwrap().to_mut();
//! pm.set_pixel(3, 3, 255).unwrap();
//! let dot: Pix = pm.into();
//!
//! let grown = dilate(&dot, &Sel::cross()).unwrap();
//! assert_eq!(grown.count_pixels_with_value(255), 5);
//! let back = erode(&grown, &Sel::cross()).unwrap();
//! assert!(back.equals(&dot));
//! ```

pub mod binary;
mod error;
pub mod sel;
pub mod thin;

pub use error::{MorphError, MorphResult};
pub use sel::Sel;

pub use binary::{close, dilate, erode, extract_boundary, open};
pub use thin::{object_neighbor_count, thin_zhang_suen, transition_count};
