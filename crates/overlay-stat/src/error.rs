//! Error types for the frame statistics store.

use thiserror::Error;

/// Result type alias using [`StatError`] as the error type.
pub type StatResult<T> = std::result::Result<T, StatError>;

/// Errors that can occur while reading or writing a stat file.
#[derive(Debug, Error)]
pub enum StatError {
    /// Underlying stream I/O failed.
    #[error("stat file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file was written by a newer format than this build supports.
    #[error("stat file format version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version byte found in the file
        found: u8,
        /// Highest version this build understands
        supported: u8,
    },

    /// The file was written by an older, incompatible format.
    ///
    /// Old stat files must be regenerated by a fresh alignment pass; their
    /// record layout cannot be read back.
    #[error("stat file format version {found} is older than expected {expected}, regenerate it")]
    StaleVersion {
        /// Version byte found in the file
        found: u8,
        /// Version this store was opened with
        expected: u8,
    },
}
