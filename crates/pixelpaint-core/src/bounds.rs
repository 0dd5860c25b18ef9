//! Bounds - incremental bounding rectangle
//!
//! Gradient and pattern fills normalize pixel positions within the extent
//! of the shape being filled, so the rasterizers grow a bounding rectangle
//! incrementally as they emit spans.

/// Min/max bounding rectangle over emitted coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl Bounds {
    /// Empty sentinel: min fields above any real coordinate, max fields
    /// below. The first `add_point` snaps all four to that point.
    pub const NONE: Bounds = Bounds {
        x_min: i32::MAX,
        y_min: i32::MAX,
        x_max: i32::MIN,
        y_max: i32::MIN,
    };

    /// Bounds covering a single rectangle given by two corners (any order).
    pub fn of_rect(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Bounds {
            x_min: x1.min(x2),
            y_min: y1.min(y2),
            x_max: x1.max(x2),
            y_max: y1.max(y2),
        }
    }

    /// Whether any point has been added
    pub fn is_empty(&self) -> bool {
        self.x_max < self.x_min || self.y_max < self.y_min
    }

    /// Grow to include a point
    #[inline]
    pub fn add_point(&mut self, x: i32, y: i32) {
        if x < self.x_min {
            self.x_min = x;
        }
        if y < self.y_min {
            self.y_min = y;
        }
        if x > self.x_max {
            self.x_max = x;
        }
        if y > self.y_max {
            self.y_max = y;
        }
    }

    /// Width of the bounded region (inclusive extent)
    pub fn width(&self) -> i32 {
        self.x_max - self.x_min + 1
    }

    /// Height of the bounded region (inclusive extent)
    pub fn height(&self) -> i32 {
        self.y_max - self.y_min + 1
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::NONE
    }
}
