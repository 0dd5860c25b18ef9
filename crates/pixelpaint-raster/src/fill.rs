//! Scanline fill engine.
//!
//! Every filled shape reduces to horizontal spans fed through
//! [`FillEngine::hline`], which dispatches on the configured [`FillKind`]:
//! flat color, brush-sourced texture (scaled, arcsine-wrapped or tiled),
//! or gradients sourced from an active color-cycle range. The fit variants
//! defer their spans into per-column runs that are resolved when the shape
//! ends, so each connected vertical run gets the whole gradient.

use crate::control::OpControl;
use crate::modes::{DITHER4, FillKind, FillOptions};
use crate::prim;
use crate::symmetry::Point;
use pixelpaint_core::{Bounds, ColorRange, PixelBuffer};
use rand::RngExt;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const WRAP_STEPS: usize = 1024;

/// Arcsine easing table for the wrap fill, one quarter-wave per half.
static WRAP_CALC: LazyLock<[i32; WRAP_STEPS]> = LazyLock::new(|| {
    let mut t = [0i32; WRAP_STEPS];
    for (i, slot) in t.iter_mut().enumerate() {
        let f = -1.0 + 2.0 * i as f64 / WRAP_STEPS as f64;
        *slot = (WRAP_STEPS / 2) as i32 + (f.asin() * WRAP_STEPS as f64 / std::f64::consts::PI) as i32;
    }
    t
});

fn wrap_func(c: i32, maxc: i32) -> i32 {
    if c < 0 || maxc <= 0 {
        return c;
    }
    if c <= maxc {
        let idx = (WRAP_STEPS as i32 * c / maxc).clamp(0, WRAP_STEPS as i32 - 1) as usize;
        WRAP_CALC[idx] * maxc / WRAP_STEPS as i32
    } else {
        maxc
    }
}

/// Gradient parameters for one span or run.
struct Gradient {
    colors: Vec<u8>,
    ppc: f64,
    ditherfactor: f64,
    dither: i32,
}

impl Gradient {
    fn new(colors: Vec<u8>, numpoints: i32, dither: i32) -> Self {
        let numcolors = colors.len() as f64;
        let ppc = if dither >= 0 {
            numpoints as f64 / numcolors
        } else {
            // leave headroom so ordered dither can push into the last band
            numpoints as f64 / (numcolors - 0.9)
        };
        Self {
            colors,
            ppc,
            ditherfactor: dither as f64 / 3.0 * ppc,
            dither,
        }
    }

    /// Pick the band color for a pixel `distance` steps from the gradient's
    /// far end. `floor_scale` selects the legacy integer scaling used by
    /// the fit variants' run pass.
    fn color_at(&self, distance: i32, x: i32, y: i32, floor_scale: bool) -> u8 {
        if self.ppc <= 0.0 {
            return self.colors[0];
        }
        let jitter = if self.dither >= 0 && self.ditherfactor > 0.0 {
            (rand::rng().random::<f64>() * self.ditherfactor - self.ditherfactor / 2.0) as i32
        } else {
            0
        };
        let mut colori = ((distance - jitter) as f64 / self.ppc) as i32;
        if self.dither < 0 {
            let mut scaled = 16.0 * distance as f64 / self.ppc;
            if floor_scale {
                scaled = scaled.floor();
            }
            let xi = x.rem_euclid(4) as usize;
            let yi = y.rem_euclid(4) as usize;
            if f64::from(DITHER4[xi][yi]) > 16.0 - scaled % 16.0 {
                colori += 1;
            }
        }
        let colori = colori.clamp(0, self.colors.len() as i32 - 1);
        self.colors[colori as usize]
    }
}

/// Renders filled shapes scanline by scanline.
pub struct FillEngine {
    options: FillOptions,
    /// Extent of the shape currently being filled; gradients and brush
    /// scaling are computed against this.
    bounds: Bounds,
    brush: Option<(PixelBuffer, u8)>,
    ranges: Vec<ColorRange>,
    bg_color: u8,
    vlines: BTreeMap<i32, Vec<[i32; 2]>>,
}

impl FillEngine {
    pub fn new(options: FillOptions) -> Self {
        Self {
            options,
            bounds: Bounds::NONE,
            brush: None,
            ranges: Vec::new(),
            bg_color: 0,
            vlines: BTreeMap::new(),
        }
    }

    /// Source image for the brush-driven fills, with its transparent key.
    pub fn set_brush(&mut self, image: PixelBuffer, bg: u8) {
        self.brush = Some((image, bg));
    }

    /// Color-cycle ranges consulted by the gradient fills.
    pub fn set_ranges(&mut self, ranges: &[ColorRange]) {
        self.ranges = ranges.to_vec();
    }

    /// The canvas background color. Filling with it always paints flat.
    pub fn set_background(&mut self, bg: u8) {
        self.bg_color = bg;
    }

    pub fn options(&self) -> &FillOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: FillOptions) {
        self.options = options;
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Begin a shape: clears any vertical runs left from the last one.
    pub fn start_shape(&mut self) {
        self.vlines.clear();
    }

    /// The color a repeated flood click substitutes: advance through each
    /// active range containing it, like one palette cycling tick.
    pub fn cycle_substitute(&self, color: u8) -> Option<u8> {
        let mut c = color;
        for r in &self.ranges {
            if r.is_active() && r.contains(c) {
                c = r.next_color(c);
            }
        }
        (c != color).then_some(c)
    }

    fn active_range(&self, color: u8) -> Option<&ColorRange> {
        self.ranges
            .iter()
            .find(|r| r.is_active() && r.contains(color))
    }

    /// Fill one horizontal span according to the configured kind.
    ///
    /// `x1..=x2` is the logical span (used for scaling) and may hang off
    /// the canvas; writes are clipped.
    pub fn hline(&mut self, buf: &mut PixelBuffer, color: u8, y: i32, x1: i32, x2: i32) {
        let w = buf.width() as i32;
        if y < 0 || y >= buf.height() as i32 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let xs1 = x1.max(0);
        let xs2 = x2.min(w - 1);
        if xs1 > xs2 {
            return;
        }

        if self.options.kind == FillKind::Solid || color == self.bg_color {
            buf.hspan(y, xs1, xs2, color);
            return;
        }
        match self.options.kind {
            FillKind::Solid => {}
            FillKind::Brush | FillKind::Tint => self.hline_brush(buf, color, y, x1, x2, xs1, xs2),
            FillKind::Wrap | FillKind::Perspective => {
                self.hline_wrap(buf, color, y, x1, x2, xs1, xs2)
            }
            FillKind::Pattern => self.hline_pattern(buf, color, y, xs1, xs2),
            FillKind::VerticalFit => {
                if self.options.predraw {
                    buf.hspan(y, xs1, xs2, color);
                }
                self.add_vline(y, xs1, xs2);
            }
            FillKind::Vertical | FillKind::Horizontal | FillKind::HorizontalFit => {
                self.hline_gradient(buf, color, y, x1, x2, xs1, xs2);
            }
        }
    }

    fn hline_brush(&self, buf: &mut PixelBuffer, color: u8, y: i32, x1: i32, x2: i32, xs1: i32, xs2: i32) {
        let Some((image, bg)) = &self.brush else {
            buf.hspan(y, xs1, xs2, color);
            return;
        };
        let bw = image.width() as i32;
        let bh = image.height() as i32;
        let h = self.bounds.height().max(1);
        let w = (x2 - x1 + 1).max(1);
        let by = (y - self.bounds.y_min) * bh / h;
        for x in xs1..=xs2 {
            let bx = (x - x1) * bw / w;
            if let Some(c) = image.get(bx, by) {
                if c != *bg {
                    buf.set(x, y, c);
                }
            }
        }
    }

    fn hline_wrap(&self, buf: &mut PixelBuffer, color: u8, y: i32, x1: i32, x2: i32, xs1: i32, xs2: i32) {
        let Some((image, bg)) = &self.brush else {
            buf.hspan(y, xs1, xs2, color);
            return;
        };
        let bw = image.width() as i32;
        let bh = image.height() as i32;
        let h = self.bounds.height().max(1);
        let w = (x2 - x1 + 1).max(1);
        let by = wrap_func((y - self.bounds.y_min) * bh / h, bh);
        for x in xs1..=xs2 {
            let bx = wrap_func((x - x1) * bw / w, bw);
            if let Some(c) = image.get(bx, by) {
                if c != *bg {
                    buf.set(x, y, c);
                }
            }
        }
    }

    fn hline_pattern(&self, buf: &mut PixelBuffer, color: u8, y: i32, xs1: i32, xs2: i32) {
        let Some((image, bg)) = &self.brush else {
            buf.hspan(y, xs1, xs2, color);
            return;
        };
        let bw = image.width() as i32;
        let bh = image.height() as i32;
        let by = y.rem_euclid(bh);
        for x in xs1..=xs2 {
            if let Some(c) = image.get(x.rem_euclid(bw), by) {
                if c != *bg {
                    buf.set(x, y, c);
                }
            }
        }
    }

    fn hline_gradient(&self, buf: &mut PixelBuffer, color: u8, y: i32, x1: i32, x2: i32, xs1: i32, xs2: i32) {
        let Some(range) = self.active_range(color) else {
            buf.hspan(y, xs1, xs2, color);
            return;
        };
        let kind = self.options.kind;
        let (numpoints, end) = match kind {
            FillKind::Vertical => (self.bounds.height(), self.bounds.y_max),
            FillKind::Horizontal => (self.bounds.width(), self.bounds.x_max),
            _ => (x2 - x1 + 1, x2),
        };
        let grad = Gradient::new(range.colors(), numpoints, self.options.gradient_dither);
        for x in xs1..=xs2 {
            let distance = if kind == FillKind::Vertical {
                end - y
            } else {
                end - x
            };
            buf.set(x, y, grad.color_at(distance, x, y, false));
        }
    }

    /// Record a span's pixels as per-column run fragments, extending any
    /// fragment they touch.
    fn add_vline(&mut self, y: i32, xs1: i32, xs2: i32) {
        for x in xs1..=xs2 {
            let frags = self.vlines.entry(x).or_default();
            let mut found = false;
            for frag in frags.iter_mut() {
                if y >= frag[0] && y <= frag[1] {
                    found = true;
                    break;
                } else if frag[0] - 1 == y {
                    frag[0] = y;
                    found = true;
                    break;
                } else if frag[1] + 1 == y {
                    frag[1] = y;
                    found = true;
                    break;
                }
            }
            if !found {
                frags.push([y, y]);
            }
        }
    }

    /// Finish a shape. For VerticalFit this coalesces the recorded
    /// per-column fragments and paints each connected run with the whole
    /// gradient; other kinds have nothing deferred.
    pub fn end_shape(&mut self, buf: &mut PixelBuffer, color: u8, ctl: &mut OpControl) {
        if self.options.kind != FillKind::VerticalFit {
            return;
        }
        for frags in self.vlines.values_mut() {
            frags.sort_unstable();
            let mut i = 0;
            while i < frags.len() {
                let mut j = i + 1;
                while j < frags.len() {
                    let [y1i, y2i] = frags[i];
                    let [y1j, y2j] = frags[j];
                    if y1i + 1 == y2j
                        || y2i - 1 == y1j
                        || y2i + 1 == y1j
                        || y1i - 1 == y2j
                        || y1i == y2j
                        || y2i == y1j
                    {
                        frags[i] = [
                            y1i.min(y1j).min(y2i).min(y2j),
                            y1i.max(y1j).max(y2i).max(y2j),
                        ];
                        frags.remove(j);
                        j = i + 1;
                    } else {
                        j += 1;
                    }
                }
                i += 1;
            }
        }
        let Some(range) = self.active_range(color) else {
            self.vlines.clear();
            return;
        };
        let colors = range.colors();
        let dither = self.options.gradient_dither;
        let w = buf.width() as i32;
        let h = buf.height() as i32;
        for (&x, frags) in &self.vlines {
            if x < 0 || x >= w {
                continue;
            }
            for frag in frags {
                let [y1, y2] = *frag;
                let ys1 = y1.max(0);
                let ys2 = y2.min(h - 1);
                let grad = Gradient::new(colors.clone(), y2 - y1 + 1, dither);
                for y in ys1..=ys2 {
                    buf.set(x, y, grad.color_at(y2 - y, x, y, true));
                }
            }
            if ctl.interrupted() {
                self.vlines.clear();
                return;
            }
            ctl.maybe_redraw(buf);
        }
        self.vlines.clear();
    }

    /// Fill an axis-aligned rectangle given by two opposite corners.
    pub fn fill_rect(
        &mut self,
        buf: &mut PixelBuffer,
        color: u8,
        from: Point,
        to: Point,
        ctl: &mut OpControl,
    ) -> Bounds {
        let (x1, x2) = if from.x <= to.x { (from.x, to.x) } else { (to.x, from.x) };
        let (y1, y2) = if from.y <= to.y { (from.y, to.y) } else { (to.y, from.y) };
        let bounds = Bounds::of_rect(x1, y1, x2, y2);
        if ctl.interrupted() {
            return bounds;
        }
        if self.options.kind == FillKind::Solid {
            for y in y1..=y2 {
                buf.hspan(y, x1, x2, color);
            }
            return bounds;
        }
        self.bounds = bounds;
        self.start_shape();
        for y in y1..=y2 {
            self.hline(buf, color, y, x1, x2);
            if ctl.interrupted() {
                return bounds;
            }
            ctl.maybe_redraw(buf);
        }
        self.end_shape(buf, color, ctl);
        bounds
    }

    /// Fill a circle with midpoint-algorithm spans.
    pub fn fill_circle(
        &mut self,
        buf: &mut PixelBuffer,
        color: u8,
        center: Point,
        radius: i32,
        ctl: &mut OpControl,
    ) -> Bounds {
        let bounds = Bounds::of_rect(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        );
        self.bounds = bounds;
        self.start_shape();
        for (y, x1, x2) in prim::circle_spans(center, radius) {
            self.hline(buf, color, y, x1, x2);
            if ctl.interrupted() {
                return bounds;
            }
            ctl.maybe_redraw(buf);
        }
        self.end_shape(buf, color, ctl);
        bounds
    }

    /// Fill an ellipse by rasterizing its four quadratic curve segments
    /// and collapsing them into per-row extents.
    pub fn fill_ellipse(
        &mut self,
        buf: &mut PixelBuffer,
        color: u8,
        center: Point,
        width: i32,
        height: i32,
        ctl: &mut OpControl,
    ) -> Bounds {
        if width == 0 && height == 0 {
            return self.fill_rect(buf, color, center, center, ctl);
        }
        let curve_pts = prim::ellipse_curve_points(center, width, height);
        self.fill_curve_outline(buf, color, &curve_pts, ctl)
    }

    /// Fill the interior of a closed outline given as (from, to, control)
    /// point triples of quadratic curve segments. Each segment is
    /// rasterized and the pixels collapsed into one span per row.
    pub fn fill_curve_outline(
        &mut self,
        buf: &mut PixelBuffer,
        color: u8,
        curve_pts: &[Point],
        ctl: &mut OpControl,
    ) -> Bounds {
        let mut rows: BTreeMap<i32, [i32; 2]> = BTreeMap::new();
        for seg in curve_pts.chunks_exact(3) {
            let coords = prim::curve_coords(seg[0], seg[1], seg[2]);
            for p in coords.iter().flatten() {
                rows.entry(p.y)
                    .and_modify(|ext| {
                        ext[0] = ext[0].min(p.x);
                        ext[1] = ext[1].max(p.x);
                    })
                    .or_insert([p.x, p.x]);
            }
        }
        let mut bounds = Bounds::NONE;
        for (&y, ext) in &rows {
            bounds.add_point(ext[0], y);
            bounds.add_point(ext[1], y);
        }
        if bounds.is_empty() {
            return bounds;
        }
        self.bounds = bounds;
        self.start_shape();
        for (&y, ext) in &rows {
            self.hline(buf, color, y, ext[0], ext[1]);
            if ctl.interrupted() {
                return bounds;
            }
            ctl.maybe_redraw(buf);
        }
        self.end_shape(buf, color, ctl);
        bounds
    }

    /// Fill a polygon with even-odd scanline crossings. A trailing vertex
    /// equal to the first is ignored.
    pub fn fill_polygon(
        &mut self,
        buf: &mut PixelBuffer,
        color: u8,
        vertices: &[Point],
        ctl: &mut OpControl,
    ) -> Bounds {
        let mut n = vertices.len();
        if n == 0 {
            return Bounds::NONE;
        }
        let minx = vertices.iter().map(|p| p.x).min().unwrap_or(0);
        let maxx = vertices.iter().map(|p| p.x).max().unwrap_or(0);
        let miny = vertices.iter().map(|p| p.y).min().unwrap_or(0);
        let maxy = vertices.iter().map(|p| p.y).max().unwrap_or(0);
        let bounds = Bounds::of_rect(minx, miny, maxx, maxy);
        self.bounds = bounds;

        if n > 1 && vertices[0] == vertices[n - 1] {
            n -= 1;
        }

        self.start_shape();
        for y in miny..=maxy {
            if ctl.interrupted() {
                return bounds;
            }
            let mut crossings = Vec::new();
            for i in 0..n {
                let ind1 = if i == 0 { n - 1 } else { i - 1 };
                let a = vertices[ind1];
                let b = vertices[i];
                let (x1, y1, x2, y2) = if a.y < b.y {
                    (a.x, a.y, b.x, b.y)
                } else if a.y > b.y {
                    (b.x, b.y, a.x, a.y)
                } else {
                    continue;
                };
                // the bottom row counts its upper-open edges so the last
                // scanline still closes
                if (y >= y1 && y < y2) || (y == maxy && y > y1 && y <= y2) {
                    crossings.push(((y - y1) * (x2 - x1)).div_euclid(y2 - y1) + x1);
                }
            }
            crossings.sort_unstable();
            for pair in crossings.chunks_exact(2) {
                self.hline(buf, color, y, pair[0], pair[1]);
                if ctl.interrupted() {
                    return bounds;
                }
                ctl.maybe_redraw(buf);
            }
        }
        self.end_shape(buf, color, ctl);
        bounds
    }
}

impl Default for FillEngine {
    fn default() -> Self {
        Self::new(FillOptions::default())
    }
}
