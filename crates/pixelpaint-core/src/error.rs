//! Error types for pixelpaint-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Pixelpaint core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Palette cannot hold more than 256 entries
    #[error("palette too large: {0} entries")]
    PaletteTooLarge(usize),

    /// Color range with low > high
    #[error("invalid color range: low {low} > high {high}")]
    InvalidRange { low: u8, high: u8 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Null pointer or empty input
    #[error("null or empty input: {0}")]
    NullInput(&'static str),
}

/// Result type alias for pixelpaint core operations
pub type Result<T> = std::result::Result<T, Error>;
