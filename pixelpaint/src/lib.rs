//! Pixelpaint - Indexed-color paint engine
//!
//! A bitmap paint engine in the spirit of the classic Amiga paint
//! programs: an indexed-color canvas, brushes stamped along rasterized
//! shapes, gradient and pattern fills, point/mirror/tile symmetry, and
//! ILBM/IFF file interchange with palette-cycling ranges.
//!
//! # Overview
//!
//! - Canvas, palette, cycling ranges and undo history ([`PixelBuffer`],
//!   [`Palette`], [`ColorRange`], [`UndoStack`])
//! - Drawing primitives with symmetry replication ([`raster`])
//! - ILBM load/save with byte-run compression ([`io`])
//!
//! # Example
//!
//! ```
//! use pixelpaint::raster::{
//!     Brush, BrushKind, DrawOptions, FillEngine, FillOptions, Geometry,
//!     OpControl, Painter, Point, SymmetryTransform,
//! };
//! use pixelpaint::PixelBuffer;
//!
//! let mut canvas = PixelBuffer::new(320, 200).unwrap();
//! let mut brush = Brush::new(BrushKind::Circle, 2);
//! let mut fill = FillEngine::new(FillOptions::default());
//! let mut symmetry = SymmetryTransform::identity();
//! let mut painter = Painter {
//!     brush: &mut brush,
//!     fill: &mut fill,
//!     symmetry: &mut symmetry,
//!     ranges: &[],
//!     options: DrawOptions::default(),
//! };
//! painter
//!     .draw(
//!         &mut canvas,
//!         1,
//!         &Geometry::Circle { center: Point::new(160, 100), radius: 40, filled: false },
//!         &mut OpControl::new(),
//!     )
//!     .unwrap();
//! assert_eq!(canvas.get(200, 100), Some(1));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixelpaint_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pixelpaint_io as io;
pub use pixelpaint_raster as raster;
