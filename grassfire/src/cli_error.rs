//! Error types for the grassfire front end

use thiserror::Error;

/// Errors reported by the command-line front end
#[derive(Debug, Error)]
pub enum CliError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] grassfire_core::Error),

    /// Image read or write failure
    #[error("I/O error: {0}")]
    Io(#[from] grassfire_io::IoError),

    /// Filtering failure
    #[error("filter error: {0}")]
    Filter(#[from] grassfire_filter::FilterError),

    /// Morphology failure
    #[error("morphology error: {0}")]
    Morph(#[from] grassfire_morph::MorphError),

    /// Geometric transform failure
    #[error("transform error: {0}")]
    Transform(#[from] grassfire_transform::TransformError),

    /// Region labeling failure
    #[error("labeling error: {0}")]
    Region(#[from] grassfire_region::RegionError),

    /// Invalid command-line argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for front-end operations
pub type CliResult<T> = Result<T, CliError>;
