//! Point-exact primitive rasterization.
//!
//! These functions produce coordinate lists rather than touching pixels;
//! the stamping layer decides how each point lands on the canvas (brush
//! shape, draw mode, spacing). Keeping geometry separate lets outlines,
//! fills and stamped strokes share one rasterizer per shape.

use crate::coordset::CoordSet;
use crate::symmetry::Point;

/// Rasterize a line with Bresenham's algorithm. Endpoints included, in
/// order from `from` to `to`; `skip_last` drops the final point so chained
/// segments do not double their joints.
pub fn line_points(from: Point, to: Point, skip_last: bool) -> Vec<Point> {
    let (mut x, mut y) = (from.x, from.y);
    let w = to.x - from.x;
    let h = to.y - from.y;

    let dx1 = w.signum();
    let dy1 = h.signum();
    let mut dx2 = w.signum();
    let mut dy2 = 0;

    let mut longest = w.abs();
    let mut shortest = h.abs();
    if longest <= shortest {
        longest = h.abs();
        shortest = w.abs();
        dy2 = h.signum();
        dx2 = 0;
    }

    let mut out = Vec::with_capacity(longest as usize + 1);
    let mut numerator = longest / 2;
    let count = if skip_last { longest } else { longest + 1 };
    for _ in 0..count {
        out.push(Point::new(x, y));
        numerator += shortest;
        if numerator >= longest {
            numerator -= longest;
            x += dx1;
            y += dy1;
        } else {
            x += dx2;
            y += dy2;
        }
    }
    out
}

/// Rasterize a circle outline with the midpoint algorithm.
///
/// Points are kept in eight octant lists, alternately appended and
/// prepended, so flattening the set walks the circumference in order.
/// Stamp spacing along an outline depends on that ordering.
pub fn circle_octants(center: Point, radius: i32) -> CoordSet {
    let mut cl = CoordSet::new(8);
    let (x0, y0) = (center.x, center.y);
    let mut x = 0;
    let mut y = radius;
    let mut err = (5 - radius * 4).div_euclid(4);

    cl.append(0, Point::new(x0 + y, y0));
    cl.append(2, Point::new(x0, y0 + y));
    cl.append(4, Point::new(x0 - y, y0));
    cl.append(6, Point::new(x0, y0 - y));

    while x < y {
        x += 1;
        if err < 0 {
            err += 2 * x + 1;
        } else {
            y -= 1;
            err += 2 * (x - y) + 1;
        }

        cl.append(0, Point::new(x0 + y, y0 + x));
        cl.prepend(1, Point::new(x0 + x, y0 + y));
        cl.append(2, Point::new(x0 - x, y0 + y));
        cl.prepend(3, Point::new(x0 - y, y0 + x));
        cl.append(4, Point::new(x0 - y, y0 - x));
        cl.prepend(5, Point::new(x0 - x, y0 - y));
        cl.append(6, Point::new(x0 + x, y0 - y));
        cl.prepend(7, Point::new(x0 + y, y0 - x));
    }
    cl
}

/// Horizontal spans covering a filled circle, in midpoint emission order:
/// the equator first, then span pairs widening toward the poles.
pub fn circle_spans(center: Point, radius: i32) -> Vec<(i32, i32, i32)> {
    let (x0, y0) = (center.x, center.y);
    let mut x = 0;
    let mut y = radius;
    let mut err = (5 - radius * 4).div_euclid(4);

    let mut spans = vec![(y0, x0 - y, x0 + y)];
    while x < y {
        x += 1;
        if err < 0 {
            err += 2 * x + 1;
        } else {
            y -= 1;
            err += 2 * (x - y) + 1;
        }
        spans.push((y0 + y, x0 - x, x0 + x));
        spans.push((y0 - y, x0 - x, x0 + x));
        spans.push((y0 + x, x0 - y, x0 + y));
        spans.push((y0 - x, x0 - y, x0 + y));
    }
    spans
}

/// Re-anchor a user-supplied control point onto the curve: the returned
/// control is the reflection of the chord midpoint through the input, so
/// the rendered curve passes through where the user clicked.
pub fn convert_curve_control(from: Point, to: Point, control: Point) -> Point {
    let mx = (from.x + to.x).div_euclid(2);
    let my = (from.y + to.y).div_euclid(2);
    Point::new((control.x - mx) * 2 + mx, (control.y - my) * 2 + my)
}

/// Rasterize one quadratic Bezier segment whose gradient is monotonic in
/// both axes (Bresenham's curve stepper). Segments violating that
/// precondition come back empty; any residual tail is closed with a line.
fn curve_segment(from: Point, control: Point, to: Point) -> Vec<Point> {
    let (mut x0, mut y0) = (from.x as i64, from.y as i64);
    let (x1, y1) = (control.x as i64, control.y as i64);
    let (mut x2, mut y2) = (to.x as i64, to.y as i64);
    let mut sx = x2 - x1;
    let mut sy = y2 - y1;
    let mut xx = x0 - x1;
    let mut yy = y0 - y1;
    let mut cur = (xx * sy - yy * sx) as f64;
    let mut out = Vec::new();

    // sign change in either axis means the segment was not split correctly
    if !(xx * sx <= 0 && yy * sy <= 0) {
        return out;
    }

    if sx * sx + sy * sy > xx * xx + yy * yy {
        x2 = x0;
        x0 = sx + x1;
        y2 = y0;
        y0 = sy + y1;
        cur = -cur;
    }

    if cur != 0.0 {
        xx += sx;
        sx = if x0 < x2 { 1 } else { -1 };
        xx *= sx;
        yy += sy;
        sy = if y0 < y2 { 1 } else { -1 };
        yy *= sy;
        let mut xy = 2 * xx * yy;
        xx *= xx;
        yy *= yy;

        if cur * sx as f64 * (sy as f64) < 0.0 {
            xx = -xx;
            yy = -yy;
            xy = -xy;
            cur = -cur;
        }

        let mut dx = 4.0 * sy as f64 * cur * (x1 - x0) as f64 + xx as f64 - xy as f64;
        let mut dy = 4.0 * sx as f64 * cur * (y0 - y1) as f64 + yy as f64 - xy as f64;
        xx += xx;
        yy += yy;
        let mut err = dx + dy + xy as f64;

        loop {
            out.push(Point::new(x0 as i32, y0 as i32));
            if x0 == x2 && y0 == y2 {
                return out;
            }
            let step_y = 2.0 * err < dx;
            if 2.0 * err > dy {
                x0 += sx;
                dx -= xy as f64;
                dy += yy as f64;
                err += dy;
            }
            if step_y {
                y0 += sy;
                dy -= xy as f64;
                dx += xx as f64;
                err += dx;
            }
            if dy >= dx {
                break;
            }
        }
    }

    out.extend(line_points(
        Point::new(x0 as i32, y0 as i32),
        Point::new(x2 as i32, y2 as i32),
        false,
    ));
    out
}

/// Rasterize a quadratic curve through `from`, `control_on_curve` and `to`.
///
/// The curve is split at its x- and y-monotonic extrema into at most three
/// Bresenham-steppable segments; the segments are then reconciled so that
/// slot 0 starts at `from`, slot 2 ends at `to`, and the middle runs in
/// between. `control_on_curve` is the raw user point; it is re-anchored
/// with [`convert_curve_control`] internally.
pub fn curve_coords(from: Point, to: Point, control_on_curve: Point) -> [Vec<Point>; 3] {
    let control = convert_curve_control(from, to, control_on_curve);
    let (mut x0, mut y0) = (from.x, from.y);
    let (mut x1, mut y1) = (control.x, control.y);
    let (mut x2, mut y2) = (to.x, to.y);
    let mut x = x0 - x1;
    let mut y = y0 - y1;
    let mut t = (x0 - 2 * x1 + x2) as f64;
    let mut r;

    let mut segs: [Vec<Point>; 3] = [Vec::new(), Vec::new(), Vec::new()];

    if x * (x2 - x1) > 0 {
        if y * (y2 - y1) > 0 && ((y0 - 2 * y1 + y2) as f64 / t * x as f64).abs() > y.abs() as f64
        {
            x0 = x2;
            x2 = x + x1;
            y0 = y2;
            y2 = y + y1;
        }

        t = (x0 - x1) as f64 / t;
        r = (1.0 - t) * ((1.0 - t) * y0 as f64 + 2.0 * t * y1 as f64) + t * t * y2 as f64;
        t = (x0 * x2 - x1 * x1) as f64 * t / (x0 - x1) as f64;
        x = t.round() as i32;
        y = r.round() as i32;
        r = (y1 - y0) as f64 * (t - x0 as f64) / (x1 - x0) as f64 + y0 as f64;
        segs[0] = curve_segment(
            Point::new(x0, y0),
            Point::new(x, r.round() as i32),
            Point::new(x, y),
        );
        r = (y1 - y2) as f64 * (t - x2 as f64) / (x1 - x2) as f64 + y2 as f64;
        x0 = x;
        x1 = x;
        y0 = y;
        y1 = r.round() as i32;
    }

    if (y0 - y1) * (y2 - y1) > 0 {
        t = (y0 - 2 * y1 + y2) as f64;
        t = (y0 - y1) as f64 / t;
        r = (1.0 - t) * ((1.0 - t) * x0 as f64 + 2.0 * t * x1 as f64) + t * t * x2 as f64;
        t = (y0 * y2 - y1 * y1) as f64 * t / (y0 - y1) as f64;
        x = r.round() as i32;
        y = t.round() as i32;
        r = (x1 - x0) as f64 * (t - y0 as f64) / (y1 - y0) as f64 + x0 as f64;
        segs[2] = curve_segment(
            Point::new(x0, y0),
            Point::new(r.round() as i32, y),
            Point::new(x, y),
        );
        r = (x1 - x2) as f64 * (t - y2 as f64) / (y1 - y2) as f64 + x2 as f64;
        x0 = x;
        x1 = r.round() as i32;
        y0 = y;
        y1 = y;
    }

    segs[1] = curve_segment(
        Point::new(x0, y0),
        Point::new(x1, y1),
        Point::new(x2, y2),
    );

    reconcile_segments(&mut segs, from, to);
    segs
}

/// Order curve segments so slot 0 starts at `from`, slot 2 ends at `to`,
/// and the middle segment flows from slot 0 into slot 2.
fn reconcile_segments(segs: &mut [Vec<Point>; 3], from: Point, to: Point) {
    for i in 0..3 {
        if segs[i].is_empty() {
            continue;
        }
        if segs[i][0] == from {
            segs.swap(i, 0);
            break;
        }
        if segs[i].last() == Some(&from) {
            segs[i].reverse();
            segs.swap(i, 0);
            break;
        }
    }
    for i in 0..3 {
        if segs[i].is_empty() {
            continue;
        }
        if segs[i][0] == to {
            segs[i].reverse();
            segs.swap(i, 2);
            break;
        }
        if segs[i].last() == Some(&to) {
            segs.swap(i, 2);
            break;
        }
    }
    if !segs[1].is_empty() && !segs[0].is_empty() && segs[0].last() != segs[1].first() {
        segs[1].reverse();
    }
}

/// Control-point factor approximating a quarter circle with one quadratic
/// segment (716/1000 of the radius).
const ELLIPSE_CONTROL_NUM: i32 = 716;
const ELLIPSE_CONTROL_DEN: i32 = 1000;

/// The four (from, to, control) triples that outline an ellipse as
/// quadratic curve segments, flattened as 12 points in segment order.
pub fn ellipse_curve_points(center: Point, width: i32, height: i32) -> Vec<Point> {
    let (xc, yc) = (center.x, center.y);
    let cw = width * ELLIPSE_CONTROL_NUM / ELLIPSE_CONTROL_DEN;
    let ch = height * ELLIPSE_CONTROL_NUM / ELLIPSE_CONTROL_DEN;
    vec![
        Point::new(xc + width, yc),
        Point::new(xc, yc + height),
        Point::new(xc + cw, yc + ch),
        Point::new(xc, yc + height),
        Point::new(xc - width, yc),
        Point::new(xc - cw, yc + ch),
        Point::new(xc - width, yc),
        Point::new(xc, yc - height),
        Point::new(xc - cw, yc - ch),
        Point::new(xc, yc - height),
        Point::new(xc + width, yc),
        Point::new(xc + cw, yc - ch),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_horizontal() {
        let pts = line_points(Point::new(1, 2), Point::new(4, 2), false);
        assert_eq!(
            pts,
            vec![
                Point::new(1, 2),
                Point::new(2, 2),
                Point::new(3, 2),
                Point::new(4, 2)
            ]
        );
    }

    #[test]
    fn test_line_single_point() {
        assert_eq!(
            line_points(Point::new(3, 3), Point::new(3, 3), false),
            vec![Point::new(3, 3)]
        );
        assert!(line_points(Point::new(3, 3), Point::new(3, 3), true).is_empty());
    }

    #[test]
    fn test_line_skip_last() {
        let pts = line_points(Point::new(0, 0), Point::new(3, 0), true);
        assert_eq!(pts.len(), 3);
        assert_eq!(pts.last(), Some(&Point::new(2, 0)));
    }

    #[test]
    fn test_line_diagonal_connected() {
        let pts = line_points(Point::new(0, 0), Point::new(5, 3), false);
        assert_eq!(pts[0], Point::new(0, 0));
        assert_eq!(pts[pts.len() - 1], Point::new(5, 3));
        for w in pts.windows(2) {
            assert!((w[1].x - w[0].x).abs() <= 1);
            assert!((w[1].y - w[0].y).abs() <= 1);
        }
    }

    #[test]
    fn test_circle_octants_radius_zero() {
        let pts = circle_octants(Point::new(5, 5), 0).into_points();
        assert!(pts.iter().all(|p| *p == Point::new(5, 5)));
    }

    #[test]
    fn test_circle_octants_on_circle() {
        let r = 7;
        let pts = circle_octants(Point::new(0, 0), r).into_points();
        assert!(pts.contains(&Point::new(r, 0)));
        assert!(pts.contains(&Point::new(-r, 0)));
        assert!(pts.contains(&Point::new(0, r)));
        assert!(pts.contains(&Point::new(0, -r)));
        for p in &pts {
            let d = ((p.x * p.x + p.y * p.y) as f64).sqrt();
            assert!((d - r as f64).abs() < 0.75, "point {p:?} off the circle");
        }
    }

    #[test]
    fn test_circle_walk_is_contiguous() {
        // flattened octants walk the circumference without gaps
        let pts = circle_octants(Point::new(0, 0), 5).into_points();
        for w in pts.windows(2) {
            let dx = (w[1].x - w[0].x).abs();
            let dy = (w[1].y - w[0].y).abs();
            assert!(dx <= 1 && dy <= 1, "gap between {:?} and {:?}", w[0], w[1]);
        }
    }

    #[test]
    fn test_circle_spans_cover_disc() {
        let spans = circle_spans(Point::new(10, 10), 4);
        assert_eq!(spans[0], (10, 6, 14));
        // every span stays within the bounding box
        for &(y, x1, x2) in &spans {
            assert!((6..=14).contains(&y));
            assert!(x1 >= 6 && x2 <= 14 && x1 <= x2);
        }
    }

    #[test]
    fn test_convert_curve_control() {
        // control at the chord midpoint collapses to the midpoint
        let c = convert_curve_control(Point::new(0, 0), Point::new(10, 0), Point::new(5, 0));
        assert_eq!(c, Point::new(5, 0));
        // offsets from the midpoint are doubled
        let c = convert_curve_control(Point::new(0, 0), Point::new(10, 0), Point::new(5, 4));
        assert_eq!(c, Point::new(5, 8));
    }

    #[test]
    fn test_curve_degenerate_is_line() {
        let segs = curve_coords(Point::new(0, 0), Point::new(8, 0), Point::new(4, 0));
        let pts: Vec<Point> = segs.iter().flatten().copied().collect();
        assert_eq!(pts.first(), Some(&Point::new(0, 0)));
        assert_eq!(pts.last(), Some(&Point::new(8, 0)));
        assert!(pts.iter().all(|p| p.y == 0));
    }

    #[test]
    fn test_curve_passes_through_control() {
        let from = Point::new(0, 10);
        let to = Point::new(20, 10);
        let on_curve = Point::new(10, 0);
        let segs = curve_coords(from, to, on_curve);
        let pts: Vec<Point> = segs.iter().flatten().copied().collect();
        assert_eq!(pts.first(), Some(&from));
        assert_eq!(pts.last(), Some(&to));
        // the user point lies on (or within a pixel of) the curve
        assert!(
            pts.iter()
                .any(|p| (p.x - on_curve.x).abs() <= 1 && (p.y - on_curve.y).abs() <= 1)
        );
        // contiguous after reconciliation
        for w in pts.windows(2) {
            assert!((w[1].x - w[0].x).abs() <= 1 && (w[1].y - w[0].y).abs() <= 1);
        }
    }

    #[test]
    fn test_curve_s_bend_contiguous() {
        let segs = curve_coords(Point::new(0, 0), Point::new(0, 30), Point::new(15, 15));
        let pts: Vec<Point> = segs.iter().flatten().copied().collect();
        assert_eq!(pts.first(), Some(&Point::new(0, 0)));
        assert_eq!(pts.last(), Some(&Point::new(0, 30)));
        for w in pts.windows(2) {
            assert!((w[1].x - w[0].x).abs() <= 1 && (w[1].y - w[0].y).abs() <= 1);
        }
    }

    #[test]
    fn test_ellipse_curve_points_layout() {
        let pts = ellipse_curve_points(Point::new(100, 50), 40, 20);
        assert_eq!(pts.len(), 12);
        assert_eq!(pts[0], Point::new(140, 50));
        assert_eq!(pts[1], Point::new(100, 70));
        // control factor 716/1000
        assert_eq!(pts[2], Point::new(100 + 28, 50 + 14));
    }
}
