//! Pixelpaint Core - Basic data structures for the paint engine
//!
//! This crate provides the fundamental data structures shared by the
//! rasterizer and the file codec:
//!
//! - [`PixelBuffer`] - indexed-color pixel grid (canvas, brushes, snapshots)
//! - [`Palette`] / [`Rgb`] - the active color table
//! - [`ColorRange`] - palette-cycling ranges (also gradient sources)
//! - [`Bounds`] - incremental shape bounding rectangle
//! - [`UndoStack`] - capped snapshot history
//! - [`display`] - CAMG display-mode bit flags

pub mod bounds;
pub mod display;
pub mod error;
pub mod palette;
pub mod pixbuf;
pub mod range;
pub mod undo;

pub use bounds::Bounds;
pub use error::{Error, Result};
pub use palette::{Palette, Rgb};
pub use pixbuf::PixelBuffer;
pub use range::{ColorRange, FLAG_ACTIVE, FLAG_REVERSE, NUM_RANGES, pad_ranges};
pub use undo::UndoStack;
