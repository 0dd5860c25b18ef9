//! Error types for pixelpaint-raster

use thiserror::Error;

/// Raster engine error type
#[derive(Error, Debug)]
pub enum RasterError {
    /// Symmetry order must be at least 1
    #[error("invalid symmetry order: {0}")]
    InvalidOrder(u32),

    /// Tile dimensions must be nonzero
    #[error("invalid tile size: {width}x{height}")]
    InvalidTileSize { width: u32, height: u32 },

    /// An error from the core library
    #[error("core error: {0}")]
    Core(#[from] pixelpaint_core::Error),
}

/// Result type alias for raster operations
pub type RasterResult<T> = Result<T, RasterError>;
