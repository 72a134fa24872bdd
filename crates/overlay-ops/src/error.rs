//! Error types for overlay operations.

use thiserror::Error;

/// Error type for overlay operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Planes have incompatible extents.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Planes have incompatible pixel sizes.
    #[error("pixel size mismatch: {0}")]
    PixelSizeMismatch(String),

    /// A source intensity has neither a fixed nor a weighted map entry.
    #[error("color map has no entry for source value {value}")]
    IncompleteColorMap {
        /// Source intensity with no mapping
        value: u8,
    },
}

/// Result type for overlay operations.
pub type OpsResult<T> = Result<T, OpsError>;
