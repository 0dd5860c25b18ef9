//! Pixelpaint Raster - Symmetry-aware drawing primitives
//!
//! The drawing engine of the paint program: geometric rasterizers, the
//! brush stamping machinery, fill styles and flood fill, all replicated
//! through an optional symmetry transform.
//!
//! - [`prim`] - lines, circles, quadratic curves and ellipse outlines
//! - [`symmetry`] - point/mirror/tile replication of coordinates
//! - [`brush`] - built-in and clipped custom brushes with a stamp cache
//! - [`fill`] - scanline fill engine (solid, brush, wrap, gradients)
//! - [`flood`] - stack-based flood fill feeding the fill engine
//! - [`ops`] - shape-level drawing that ties the pieces together
//! - [`control`] - cooperative interrupt and redraw gating

pub mod brush;
pub mod control;
pub mod coordset;
pub mod error;
pub mod fill;
pub mod flood;
pub mod modes;
pub mod ops;
pub mod prim;
pub mod symmetry;

pub use brush::{Brush, BrushKind, Stamp};
pub use control::OpControl;
pub use coordset::CoordSet;
pub use error::{RasterError, RasterResult};
pub use fill::FillEngine;
pub use flood::flood_fill;
pub use modes::{DITHER4, DrawMode, DrawOptions, FillKind, FillOptions, Spacing};
pub use ops::{Geometry, Painter};
pub use symmetry::{Point, SymmetryKind, SymmetryMode, SymmetrySettings, SymmetryTransform};
