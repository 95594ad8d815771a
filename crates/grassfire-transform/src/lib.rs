//! grassfire-transform - Geometric transformations
//!
//! This crate provides geometric transformation operations on 8-bit images:
//!
//! - Horizontal and vertical flips
//! - Orthogonal rotations (90, 180, 270 degrees)
//! - Arbitrary angle rotation by inverse nearest-neighbor mapping
//! - Integer translation
//! - Scaling by nearest-neighbor sampling
//!
//! All transforms use image coordinates: x grows to the right, y grows
//! downward, and pixel (0, 0) is the top-left corner.

mod error;
pub mod rotate;
pub mod scale;
pub mod translate;

pub use error::{TransformError, TransformResult};
pub use rotate::{RotateOptions, flip_lr, flip_tb, rotate, rotate_90, rotate_180, rotate_orth};
pub use scale::scale_by_sampling;
pub use translate::translate;
