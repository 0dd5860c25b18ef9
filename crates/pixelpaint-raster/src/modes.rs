//! Drawing modes, spacing sub-modes and fill configuration.

/// How a brush stamp combines with the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Custom brushes keep their own colors; background-key pixels skipped
    #[default]
    Matte,
    /// Brush silhouette rendered in the current foreground color
    Color,
    /// Brush rectangle copied wholesale, background included
    Replace,
    Smear,
    Shade,
    Blend,
    /// Like Color, but each stamp advances through the active cycle range
    Cycle,
    Smooth,
    Tint,
    HBrite,
}

/// How stamps are distributed along a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Spacing {
    /// Stamp every rasterized point
    #[default]
    Continuous,
    /// Exactly n stamps spread over the stroke
    NTotal(u32),
    /// One stamp every n points
    EveryN(u32),
    /// n stamps at random offsets within `size` of each point
    Airbrush { count: u32, size: f64 },
}

/// Per-stroke brush configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawOptions {
    pub mode: DrawMode,
    pub spacing: Spacing,
    /// Whether stroke endpoints join the previous segment. NTotal spacing
    /// drops the final point of non-continuous strokes so closed shapes do
    /// not double-stamp their seam.
    pub continuous: bool,
}

/// Interior fill style for shapes and flood fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillKind {
    /// Flat foreground color
    #[default]
    Solid,
    Tint,
    /// Tile the current brush image across the interior
    Brush,
    /// Brush image scaled into each scanline with arcsine easing
    Wrap,
    Perspective,
    /// Brush image repeated by coordinate modulo
    Pattern,
    /// Gradient banded top-to-bottom over the shape's bounds
    Vertical,
    /// Gradient fitted per connected vertical run
    VerticalFit,
    /// Gradient banded left-to-right over the scanline
    Horizontal,
    /// Gradient fitted to each scanline independently
    HorizontalFit,
}

/// Fill configuration shared by the shape and flood fillers.
#[derive(Debug, Clone, Copy)]
pub struct FillOptions {
    pub kind: FillKind,
    /// Gradient dither amount. Positive values add random jitter scaled by
    /// `dither / 3` of a band width; negative values switch to the ordered
    /// 4x4 matrix.
    pub gradient_dither: i32,
    /// VerticalFit fills paint a solid preview while the vertical runs are
    /// still being collected.
    pub predraw: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            kind: FillKind::Solid,
            gradient_dither: 4,
            predraw: false,
        }
    }
}

/// 4x4 ordered dither thresholds for negative gradient dither.
pub const DITHER4: [[i32; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];
