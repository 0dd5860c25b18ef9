//! I/O error types
//!
//! Provides a unified error type for the ILBM codec. A file that simply is
//! not an IFF/ILBM container is a classification ([`IoError::NotThisFormat`])
//! rather than a parse failure, so callers can fall back to other decoders.

use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not an IFF/ILBM container at all
    #[error("not an ILBM file: {0}")]
    NotThisFormat(String),

    /// A chunk declared more payload than the stream holds and nothing
    /// usable was decoded before the cutoff
    #[error("truncated data: chunk {tag} declared {declared} bytes, {available} available")]
    Truncated {
        tag: String,
        declared: usize,
        available: usize,
    },

    /// The container parsed but its contents are structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// An error from the core library (e.g. bad dimensions)
    #[error("core error: {0}")]
    Core(#[from] pixelpaint_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
