//! Symmetry expansion - rotational, mirror and tiled replication.
//!
//! Every primitive is drawn through a [`SymmetryTransform`]: each input
//! coordinate expands into a replica set, and the primitive is rasterized
//! once per replica. The rotation matrix is cached per (order, center) so
//! repeated expansion during a drag costs two multiplies per point.

use crate::control::OpControl;
use crate::error::{RasterError, RasterResult};

/// A canvas coordinate. Signed so shapes may straddle the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Replication style for point symmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymmetryKind {
    /// n-fold rotation about the center
    #[default]
    Rotational,
    /// n-fold rotation plus a horizontal mirror of every replica
    Mirror,
}

/// Point symmetry about a center, or tiled replication on a lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymmetryMode {
    Point,
    Tile,
}

/// Symmetry configuration, normally owned by the tool state.
#[derive(Debug, Clone, Copy)]
pub struct SymmetrySettings {
    pub enabled: bool,
    pub mode: SymmetryMode,
    pub kind: SymmetryKind,
    pub center: Point,
    /// Rotation order for point mode, >= 1
    pub order: u32,
    pub tile_width: i32,
    pub tile_height: i32,
    pub canvas_width: i32,
    pub canvas_height: i32,
}

impl Default for SymmetrySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: SymmetryMode::Point,
            kind: SymmetryKind::Rotational,
            center: Point::default(),
            order: 1,
            tile_width: 16,
            tile_height: 16,
            canvas_width: 320,
            canvas_height: 200,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RotCache {
    order: u32,
    center: Point,
    cos: f64,
    sin: f64,
}

/// Expands coordinates into symmetry replica sets.
#[derive(Debug)]
pub struct SymmetryTransform {
    settings: SymmetrySettings,
    cache: Option<RotCache>,
}

impl SymmetryTransform {
    /// Validate the settings and build a transform.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidOrder`] for a zero rotation order and
    /// [`RasterError::InvalidTileSize`] for non-positive tile dimensions.
    pub fn new(settings: SymmetrySettings) -> RasterResult<Self> {
        match settings.mode {
            SymmetryMode::Point if settings.order == 0 => {
                return Err(RasterError::InvalidOrder(settings.order));
            }
            SymmetryMode::Tile if settings.tile_width <= 0 || settings.tile_height <= 0 => {
                return Err(RasterError::InvalidTileSize {
                    width: settings.tile_width.max(0) as u32,
                    height: settings.tile_height.max(0) as u32,
                });
            }
            _ => {}
        }
        Ok(Self {
            settings,
            cache: None,
        })
    }

    /// An identity transform that never replicates.
    pub fn identity() -> Self {
        Self {
            settings: SymmetrySettings::default(),
            cache: None,
        }
    }

    pub fn settings(&self) -> &SymmetrySettings {
        &self.settings
    }

    /// Update the settings. The rotation cache revalidates itself lazily.
    pub fn set_settings(&mut self, settings: SymmetrySettings) -> RasterResult<()> {
        *self = Self::new(settings)?;
        Ok(())
    }

    fn rotation(&mut self, order: u32, center: Point) -> (f64, f64) {
        match self.cache {
            Some(c) if c.order == order && c.center == center => (c.cos, c.sin),
            _ => {
                let q = 2.0 * std::f64::consts::PI / f64::from(order);
                let c = RotCache {
                    order,
                    center,
                    cos: q.cos(),
                    sin: q.sin(),
                };
                self.cache = Some(c);
                (c.cos, c.sin)
            }
        }
    }

    /// Expand one point into its replica set. The original point comes
    /// first (except in tile mode, where the lattice replaces the list and
    /// the seed tile leads). With `apply` false, or symmetry disabled, the
    /// result is the singleton input.
    pub fn expand_point(&mut self, p: Point, apply: bool, ctl: &mut OpControl) -> Vec<Point> {
        let mut out = vec![p];
        if !apply || !self.settings.enabled {
            return out;
        }
        match self.settings.mode {
            SymmetryMode::Point => {
                let c = self.settings.center;
                let order = self.settings.order;
                let mirror = self.settings.kind == SymmetryKind::Mirror;
                if mirror {
                    out.push(Point::new(2 * c.x - p.x, p.y));
                }
                let (cos, sin) = self.rotation(order, c);
                let mut xf = f64::from(p.x);
                let mut yf = f64::from(p.y);
                for _ in 1..order {
                    if ctl.interrupted() {
                        // keep the replica count stable while unwinding
                        out.push(p);
                    } else {
                        let dx = xf - f64::from(c.x);
                        let dy = yf - f64::from(c.y);
                        xf = dx * cos - dy * sin + f64::from(c.x);
                        yf = dx * sin + dy * cos + f64::from(c.y);
                        out.push(Point::new(xf.round() as i32, yf.round() as i32));
                        if mirror {
                            let xm = 2.0 * f64::from(c.x) - xf;
                            out.push(Point::new(xm.round() as i32, yf.round() as i32));
                        }
                    }
                }
            }
            SymmetryMode::Tile => {
                let tw = self.settings.tile_width;
                let th = self.settings.tile_height;
                let numcols = self.settings.canvas_width / tw + 1;
                let numrows = self.settings.canvas_height / th + 1;
                out.clear();
                // four quadrants around the seed point cover the canvas
                // for any lattice phase
                let mut x0 = p.x;
                for _ in 0..numcols {
                    let mut y0 = p.y;
                    for _ in 0..numrows {
                        out.push(Point::new(x0, y0));
                        y0 += th;
                    }
                    x0 += tw;
                }
                let mut x0 = p.x;
                for _ in 0..numcols {
                    let mut y0 = p.y;
                    x0 -= tw;
                    for _ in 0..numrows {
                        out.push(Point::new(x0, y0));
                        y0 += th;
                    }
                }
                let mut x0 = p.x;
                for _ in 0..numcols {
                    let mut y0 = p.y;
                    for _ in 0..numrows {
                        y0 -= th;
                        out.push(Point::new(x0, y0));
                    }
                    x0 += tw;
                }
                let mut x0 = p.x;
                for _ in 0..numcols {
                    let mut y0 = p.y;
                    x0 -= tw;
                    for _ in 0..numrows {
                        y0 -= th;
                        out.push(Point::new(x0, y0));
                    }
                }
            }
        }
        out
    }

    /// Expand a vertex path into one path per replica. Once interrupted,
    /// remaining vertices reuse the previous vertex's replica set so the
    /// shapes stay closed while the operation unwinds.
    pub fn expand_path(&mut self, pts: &[Point], apply: bool, ctl: &mut OpControl) -> Vec<Vec<Point>> {
        let mut per_vertex: Vec<Vec<Point>> = Vec::with_capacity(pts.len());
        for &p in pts {
            if ctl.interrupted() {
                if let Some(last) = per_vertex.last() {
                    let repeat = last.clone();
                    per_vertex.push(repeat);
                    continue;
                }
            }
            per_vertex.push(self.expand_point(p, apply, ctl));
        }
        let n = per_vertex.first().map_or(0, Vec::len);
        let mut out = vec![Vec::with_capacity(pts.len()); n];
        for verts in &per_vertex {
            for (r, slot) in out.iter_mut().enumerate() {
                match verts.get(r).or_else(|| verts.first()) {
                    Some(&pt) => slot.push(pt),
                    None => {}
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_settings(order: u32, kind: SymmetryKind, cx: i32, cy: i32) -> SymmetrySettings {
        SymmetrySettings {
            enabled: true,
            mode: SymmetryMode::Point,
            kind,
            center: Point::new(cx, cy),
            order,
            ..SymmetrySettings::default()
        }
    }

    #[test]
    fn test_disabled_is_singleton() {
        let mut t = SymmetryTransform::identity();
        let pts = t.expand_point(Point::new(5, 6), true, &mut OpControl::new());
        assert_eq!(pts, vec![Point::new(5, 6)]);
    }

    #[test]
    fn test_apply_false_skips_expansion() {
        let mut t = SymmetryTransform::new(point_settings(4, SymmetryKind::Rotational, 0, 0))
            .unwrap();
        let pts = t.expand_point(Point::new(3, 0), false, &mut OpControl::new());
        assert_eq!(pts.len(), 1);
    }

    #[test]
    fn test_rotational_order_count_and_positions() {
        let mut t = SymmetryTransform::new(point_settings(4, SymmetryKind::Rotational, 10, 10))
            .unwrap();
        let pts = t.expand_point(Point::new(13, 10), true, &mut OpControl::new());
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[0], Point::new(13, 10));
        // quarter turns about (10, 10)
        assert_eq!(pts[1], Point::new(10, 13));
        assert_eq!(pts[2], Point::new(7, 10));
        assert_eq!(pts[3], Point::new(10, 7));
    }

    #[test]
    fn test_mirror_doubles_count() {
        let mut t =
            SymmetryTransform::new(point_settings(3, SymmetryKind::Mirror, 10, 10)).unwrap();
        let pts = t.expand_point(Point::new(14, 10), true, &mut OpControl::new());
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Point::new(14, 10));
        assert_eq!(pts[1], Point::new(6, 10));
    }

    #[test]
    fn test_order_one_is_identity() {
        let mut t = SymmetryTransform::new(point_settings(1, SymmetryKind::Rotational, 10, 10))
            .unwrap();
        let pts = t.expand_point(Point::new(2, 3), true, &mut OpControl::new());
        assert_eq!(pts, vec![Point::new(2, 3)]);
    }

    #[test]
    fn test_zero_order_rejected() {
        let err = SymmetryTransform::new(point_settings(0, SymmetryKind::Rotational, 0, 0));
        assert!(matches!(err, Err(RasterError::InvalidOrder(0))));
    }

    #[test]
    fn test_tile_lattice_covers_canvas() {
        let settings = SymmetrySettings {
            enabled: true,
            mode: SymmetryMode::Tile,
            tile_width: 20,
            tile_height: 20,
            canvas_width: 100,
            canvas_height: 60,
            ..SymmetrySettings::default()
        };
        let mut t = SymmetryTransform::new(settings).unwrap();
        let pts = t.expand_point(Point::new(30, 30), true, &mut OpControl::new());
        let numcols = 100 / 20 + 1;
        let numrows = 60 / 20 + 1;
        assert_eq!(pts.len(), 4 * numcols * numrows);
        // seed point leads, and its lattice neighbors are present
        assert_eq!(pts[0], Point::new(30, 30));
        assert!(pts.contains(&Point::new(10, 10)));
        assert!(pts.contains(&Point::new(50, 50)));
        assert!(pts.contains(&Point::new(30, 10)));
    }

    #[test]
    fn test_zero_tile_rejected() {
        let settings = SymmetrySettings {
            enabled: true,
            mode: SymmetryMode::Tile,
            tile_width: 0,
            tile_height: 16,
            ..SymmetrySettings::default()
        };
        assert!(matches!(
            SymmetryTransform::new(settings),
            Err(RasterError::InvalidTileSize { .. })
        ));
    }

    #[test]
    fn test_rotation_cache_reused() {
        let mut t = SymmetryTransform::new(point_settings(8, SymmetryKind::Rotational, 50, 50))
            .unwrap();
        let a = t.expand_point(Point::new(60, 50), true, &mut OpControl::new());
        let b = t.expand_point(Point::new(60, 50), true, &mut OpControl::new());
        assert_eq!(a, b);
    }

    #[test]
    fn test_expand_path_transposes() {
        let mut t = SymmetryTransform::new(point_settings(2, SymmetryKind::Rotational, 0, 0))
            .unwrap();
        let paths = t.expand_path(
            &[Point::new(1, 0), Point::new(2, 0)],
            true,
            &mut OpControl::new(),
        );
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], vec![Point::new(1, 0), Point::new(2, 0)]);
        assert_eq!(paths[1], vec![Point::new(-1, 0), Point::new(-2, 0)]);
    }
}
