//! High-level drawing operations.
//!
//! A [`Painter`] bundles the brush, fill engine and symmetry transform and
//! drives them for each [`Geometry`]. Outlines rasterize to point lists
//! that are stamped with the brush under the configured draw mode and
//! spacing; filled shapes go through the fill engine; both replicate
//! through symmetry the same way: open strokes expand per stamped point,
//! closed shapes expand their vertex path so each replica stays closed.

use crate::brush::{Brush, scatter_offset};
use crate::control::OpControl;
use crate::coordset::CoordSet;
use crate::error::RasterResult;
use crate::fill::FillEngine;
use crate::flood;
use crate::modes::{DrawMode, DrawOptions, Spacing};
use crate::prim;
use crate::symmetry::{Point, SymmetryTransform};
use pixelpaint_core::{Bounds, ColorRange, PixelBuffer};

/// A drawable shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Geometry {
    Point(Point),
    Line {
        from: Point,
        to: Point,
    },
    /// Open chain of line segments
    Polyline(Vec<Point>),
    Rect {
        from: Point,
        to: Point,
        filled: bool,
    },
    Circle {
        center: Point,
        radius: i32,
        filled: bool,
    },
    /// Axis-aligned ellipse with the given half-extents
    Ellipse {
        center: Point,
        width: i32,
        height: i32,
        filled: bool,
    },
    /// Quadratic curve through `control`
    Curve {
        from: Point,
        to: Point,
        control: Point,
    },
    Polygon {
        vertices: Vec<Point>,
        filled: bool,
    },
}

/// Drawing state for one tool stroke: brush, fill engine, symmetry and
/// per-stroke options.
pub struct Painter<'a> {
    pub brush: &'a mut Brush,
    pub fill: &'a mut FillEngine,
    pub symmetry: &'a mut SymmetryTransform,
    pub ranges: &'a [ColorRange],
    pub options: DrawOptions,
}

impl Painter<'_> {
    /// Draw one shape onto the canvas.
    ///
    /// # Errors
    ///
    /// Propagates stamp rendering failures; geometry itself never fails.
    pub fn draw(
        &mut self,
        buf: &mut PixelBuffer,
        color: u8,
        geom: &Geometry,
        ctl: &mut OpControl,
    ) -> RasterResult<()> {
        match geom {
            Geometry::Point(p) => {
                self.stamp_points(buf, color, vec![*p], false, true, ctl)?;
            }
            Geometry::Line { from, to } => {
                let pts = prim::line_points(*from, *to, false);
                self.stamp_points(buf, color, pts, false, true, ctl)?;
            }
            Geometry::Polyline(vertices) => {
                self.stamp_path(buf, color, vertices, false, ctl)?;
            }
            Geometry::Rect { from, to, filled } => {
                let path = vec![
                    Point::new(from.x, from.y),
                    Point::new(to.x, from.y),
                    Point::new(to.x, to.y),
                    Point::new(from.x, to.y),
                    Point::new(from.x, from.y),
                ];
                if *filled {
                    let replicas = self.symmetry.expand_path(&path, true, ctl);
                    for (i, replica) in replicas.iter().enumerate() {
                        if i == 0 {
                            self.fill.fill_rect(buf, color, *from, *to, ctl);
                        } else {
                            self.fill.fill_polygon(buf, color, replica, ctl);
                        }
                        if ctl.interrupted() {
                            return Ok(());
                        }
                    }
                } else {
                    self.stamp_path(buf, color, &path, true, ctl)?;
                }
            }
            Geometry::Circle {
                center,
                radius,
                filled,
            } => {
                for c in self.symmetry.expand_point(*center, true, ctl) {
                    if *filled {
                        self.fill.fill_circle(buf, color, c, *radius, ctl);
                    } else {
                        let pts = prim::circle_octants(c, *radius).into_points();
                        // outlines always stamp contiguously
                        self.stamp_points(buf, color, pts, true, false, ctl)?;
                    }
                    if ctl.interrupted() {
                        return Ok(());
                    }
                }
            }
            Geometry::Ellipse {
                center,
                width,
                height,
                filled,
            } => {
                if *filled && *width == 0 && *height == 0 {
                    for c in self.symmetry.expand_point(*center, true, ctl) {
                        self.fill.fill_rect(buf, color, c, c, ctl);
                    }
                    return Ok(());
                }
                let curve_pts = prim::ellipse_curve_points(*center, *width, *height);
                let replicas = self.symmetry.expand_path(&curve_pts, true, ctl);
                for replica in &replicas {
                    if *filled {
                        self.fill.fill_curve_outline(buf, color, replica, ctl);
                    } else {
                        let mut cs = CoordSet::new(4);
                        for (i, seg) in replica.chunks_exact(3).enumerate() {
                            let coords = prim::curve_coords(seg[0], seg[1], seg[2]);
                            cs.set_list(i, coords.into_iter().flatten().collect());
                        }
                        self.stamp_points(buf, color, cs.into_points(), true, false, ctl)?;
                    }
                    if ctl.interrupted() {
                        return Ok(());
                    }
                }
            }
            Geometry::Curve { from, to, control } => {
                let froms = self.symmetry.expand_point(*from, true, ctl);
                let tos = self.symmetry.expand_point(*to, true, ctl);
                let controls = self.symmetry.expand_point(*control, true, ctl);
                for ((f, t), c) in froms.iter().zip(&tos).zip(&controls) {
                    let segs = prim::curve_coords(*f, *t, *c);
                    let pts: Vec<Point> = segs.into_iter().flatten().collect();
                    self.stamp_points(buf, color, pts, false, false, ctl)?;
                    if ctl.interrupted() {
                        return Ok(());
                    }
                }
            }
            Geometry::Polygon { vertices, filled } => {
                if *filled {
                    let replicas = self.symmetry.expand_path(vertices, true, ctl);
                    for replica in &replicas {
                        self.fill.fill_polygon(buf, color, replica, ctl);
                        if ctl.interrupted() {
                            return Ok(());
                        }
                    }
                } else {
                    let mut path = vertices.clone();
                    if let Some(&first) = path.first() {
                        path.push(first);
                    }
                    self.stamp_path(buf, color, &path, true, ctl)?;
                }
            }
        }
        Ok(())
    }

    /// Flood fill at a seed point, replicated through symmetry. Returns
    /// the union of the painted bounds.
    pub fn flood(
        &mut self,
        buf: &mut PixelBuffer,
        color: u8,
        seed: Point,
        ctl: &mut OpControl,
    ) -> Bounds {
        let mut union = Bounds::NONE;
        for p in self.symmetry.expand_point(seed, true, ctl) {
            let b = flood::flood_fill(buf, self.fill, color, p, ctl);
            if !b.is_empty() {
                union.add_point(b.x_min, b.y_min);
                union.add_point(b.x_max, b.y_max);
            }
            if ctl.interrupted() {
                break;
            }
        }
        union
    }

    /// Expand a vertex path through symmetry and stroke each replica as a
    /// chain of lines, dropping duplicated joints between segments.
    fn stamp_path(
        &mut self,
        buf: &mut PixelBuffer,
        color: u8,
        path: &[Point],
        skip_last: bool,
        ctl: &mut OpControl,
    ) -> RasterResult<()> {
        let replicas = self.symmetry.expand_path(path, true, ctl);
        for replica in &replicas {
            for pair in replica.windows(2) {
                if ctl.interrupted() {
                    return Ok(());
                }
                let pts = prim::line_points(pair[0], pair[1], skip_last);
                self.stamp_points(buf, color, pts, false, false, ctl)?;
            }
        }
        Ok(())
    }

    /// Stamp the brush along an ordered point list, honoring the draw
    /// mode, the spacing sub-mode and Cycle banding.
    ///
    /// `force_continuous` marks closed outlines whose seam would
    /// double-stamp under total spacing; `stamp_symm` expands each stamp
    /// through symmetry (used when the points were not already expanded
    /// at the path level).
    fn stamp_points(
        &mut self,
        buf: &mut PixelBuffer,
        color: u8,
        points: Vec<Point>,
        force_continuous: bool,
        stamp_symm: bool,
        ctl: &mut OpControl,
    ) -> RasterResult<()> {
        let continuous = self.options.continuous || force_continuous;
        let mode = self.options.mode;

        // Cycle banding: spread an active range's colors along the stroke
        let mut arange: Vec<u8> = Vec::new();
        let mut cur_color = color;
        if mode == DrawMode::Cycle {
            if let Some(r) = self
                .ranges
                .iter()
                .find(|r| r.is_active() && r.contains(color))
            {
                arange = r.colors();
                cur_color = arange[0];
            }
        }

        let numpoints = points.len() as i64 + 1;
        let ppc = if arange.is_empty() {
            0.0
        } else {
            numpoints as f64 / arange.len() as f64
        };

        for (cp, p) in points.into_iter().enumerate() {
            let cp = cp as i64;
            if !arange.is_empty() && ppc > 0.0 {
                let idx = ((cp as f64 / ppc) as usize).min(arange.len() - 1);
                cur_color = arange[idx];
            }
            match self.options.spacing {
                Spacing::Continuous => {}
                Spacing::NTotal(n) => {
                    if numpoints > 1 && cp != 0 {
                        if continuous {
                            let step = (numpoints - 1) as f64 / f64::from(n.max(1));
                            if (cp as f64 / step) as i64 == ((cp - 1) as f64 / step) as i64 {
                                continue;
                            }
                        } else if cp != numpoints - 1 {
                            let step = if n > 1 {
                                (numpoints - 1) as f64 / f64::from(n - 1)
                            } else {
                                f64::INFINITY
                            };
                            if (cp as f64 / step) as i64 == ((cp + 1) as f64 / step) as i64 {
                                continue;
                            }
                        }
                    }
                }
                Spacing::EveryN(n) => {
                    if cp % i64::from(n.max(1)) != 0 {
                        continue;
                    }
                }
                Spacing::Airbrush { count, size } => {
                    for _ in 0..count {
                        let at = scatter_offset(&mut rand::rng(), p.x, p.y, size);
                        self.brush
                            .draw(buf, cur_color, at, mode, self.symmetry, stamp_symm, ctl)?;
                    }
                    if ctl.interrupted() {
                        return Ok(());
                    }
                    ctl.maybe_redraw(buf);
                    continue;
                }
            }
            self.brush
                .draw(buf, cur_color, p, mode, self.symmetry, stamp_symm, ctl)?;
            if ctl.interrupted() {
                return Ok(());
            }
            ctl.maybe_redraw(buf);
        }
        Ok(())
    }
}
