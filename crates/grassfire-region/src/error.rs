//! Error types for grassfire-region

use thiserror::Error;

/// Errors that can occur during labeling
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] grassfire_core::Error),

    /// Coordinate outside the labeled image
    #[error("coordinate (row {row}, col {col}) outside {width}x{height} label buffer")]
    OutOfBounds {
        row: u32,
        col: u32,
        width: u32,
        height: u32,
    },

    /// Attempt to relabel a pixel that already carries a label
    #[error("pixel (row {row}, col {col}) already carries label {label}")]
    AlreadyLabeled { row: u32, col: u32, label: u32 },

    /// More regions than the configured label capacity
    #[error("label capacity exceeded: more than {capacity} regions")]
    LabelCapacityExceeded { capacity: u32 },

    /// Unrecognized classification mode
    #[error("invalid labeling mode: {0}")]
    InvalidLabelingMode(String),

    /// Label ID that has not been allocated in the current pass
    #[error("unknown label {0}")]
    UnknownLabel(u32),

    /// Buffer length disagrees with the declared dimensions
    #[error("buffer length {actual} does not match {width}x{height} (expected {expected})")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Zero or overflowing image dimensions
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
