//! Error types for plane construction and access.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing or slicing plane views.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel size must be at least one byte.
    #[error("pixel size must be >= 1, got {pixel_size}")]
    InvalidPixelSize {
        /// Offending pixel size in bytes
        pixel_size: usize,
    },

    /// Stride is smaller than the row content it must span.
    ///
    /// A row of `width` pixels at `pixel_size` bytes each occupies
    /// `width * pixel_size` bytes; the stride must cover at least that.
    #[error("stride {stride} smaller than row content {row_bytes}")]
    StrideTooSmall {
        /// Stride in bytes
        stride: usize,
        /// Required row content bytes (`width * pixel_size`)
        row_bytes: usize,
    },

    /// The backing buffer cannot hold the described plane.
    #[error("buffer of {actual} bytes too small, plane needs {required}")]
    BufferTooSmall {
        /// Minimum bytes the plane geometry requires
        required: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// Plane geometry overflows the address space.
    #[error("plane geometry {width}x{height} (stride {stride}) overflows")]
    GeometryOverflow {
        /// Plane width in pixels
        width: usize,
        /// Plane height in rows
        height: usize,
        /// Stride in bytes
        stride: usize,
    },
}
