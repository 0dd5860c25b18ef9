//! Flood fill with scanline fragment recording.
//!
//! The flood itself is a plain 4-connected stack walk that writes the fill
//! color directly; while it runs, every painted pixel is recorded into
//! per-row fragments. For non-solid fills the coalesced fragments are then
//! replayed through the [`FillEngine`] so gradients and patterns span the
//! flooded region rather than individual pixels.

use crate::fill::FillEngine;
use crate::modes::FillKind;
use crate::symmetry::Point;
use pixelpaint_core::{Bounds, PixelBuffer};
use std::collections::BTreeMap;

/// Flood fill the connected region of the seed's color.
///
/// When the seed already holds the fill color and an active cycle range
/// contains it, the fill substitutes the range's next color so repeated
/// clicks keep producing visible changes; with a solid fill the click is a
/// no-op instead. Returns the bounds of the painted region (empty when
/// nothing changed).
pub fn flood_fill(
    buf: &mut PixelBuffer,
    engine: &mut FillEngine,
    fill_color: u8,
    seed: Point,
    ctl: &mut crate::control::OpControl,
) -> Bounds {
    let mut bounds = Bounds::NONE;
    let Some(target) = buf.get(seed.x, seed.y) else {
        return bounds;
    };

    let mut fill_color = fill_color;
    if fill_color == target {
        if engine.options().kind == FillKind::Solid {
            return bounds;
        }
        if let Some(next) = engine.cycle_substitute(fill_color) {
            fill_color = next;
        }
        if fill_color == target {
            return bounds;
        }
    }

    let maxx = buf.width() as i32;
    let maxy = buf.height() as i32;
    let mut fragments: BTreeMap<i32, Vec<[i32; 2]>> = BTreeMap::new();
    let mut frontier = vec![(seed.x, seed.y)];
    while let Some((x, y)) = frontier.pop() {
        if x < 0 || x >= maxx || y < 0 || y >= maxy {
            continue;
        }
        if buf.get(x, y) != Some(target) {
            continue;
        }
        buf.set(x, y, fill_color);
        bounds.add_point(x, y);

        let frags = fragments.entry(y).or_default();
        let mut found = false;
        for frag in frags.iter_mut() {
            if x >= frag[0] && x <= frag[1] {
                found = true;
                break;
            } else if frag[0] - 1 == x {
                frag[0] = x;
                found = true;
                break;
            } else if frag[1] + 1 == x {
                frag[1] = x;
                found = true;
                break;
            }
        }
        if !found {
            frags.push([x, x]);
        }

        frontier.push((x + 1, y));
        frontier.push((x - 1, y));
        frontier.push((x, y + 1));
        frontier.push((x, y - 1));
    }

    if bounds.is_empty() {
        return bounds;
    }

    // coalesce fragments that grew toward each other
    for frags in fragments.values_mut() {
        let mut i = 0;
        while i < frags.len() {
            let mut j = i + 1;
            while j < frags.len() {
                let [x1i, x2i] = frags[i];
                let [x1j, x2j] = frags[j];
                if x1i + 1 == x2j || x2i - 1 == x1j || x2i + 1 == x1j || x1i - 1 == x2j {
                    frags[i] = [
                        x1i.min(x1j).min(x2i).min(x2j),
                        x1i.max(x1j).max(x2i).max(x2j),
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

    if engine.options().kind != FillKind::Solid {
        engine.set_bounds(bounds);
        engine.start_shape();
        for (&y, frags) in &fragments {
            for frag in frags {
                engine.hline(buf, fill_color, y, frag[0], frag[1]);
            }
            if ctl.interrupted() {
                return bounds;
            }
            ctl.maybe_redraw(buf);
        }
        engine.end_shape(buf, fill_color, ctl);
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::OpControl;
    use crate::modes::FillOptions;
    use pixelpaint_core::{ColorRange, FLAG_ACTIVE};

    fn solid_engine() -> FillEngine {
        FillEngine::new(FillOptions::default())
    }

    #[test]
    fn test_flood_contained_by_border() {
        let mut buf = PixelBuffer::new(10, 10).unwrap();
        // hollow square border of color 1
        for i in 2..=7 {
            buf.set(i, 2, 1);
            buf.set(i, 7, 1);
            buf.set(2, i, 1);
            buf.set(7, i, 1);
        }
        let mut eng = solid_engine();
        let b = flood_fill(&mut buf, &mut eng, 5, Point::new(4, 4), &mut OpControl::new());
        // interior filled
        assert_eq!(buf.get(4, 4), Some(5));
        assert_eq!(buf.get(6, 6), Some(5));
        // border and exterior untouched
        assert_eq!(buf.get(2, 4), Some(1));
        assert_eq!(buf.get(0, 0), Some(0));
        assert_eq!((b.x_min, b.y_min, b.x_max, b.y_max), (3, 3, 6, 6));
    }

    #[test]
    fn test_flood_whole_canvas() {
        let mut buf = PixelBuffer::new(6, 4).unwrap();
        let mut eng = solid_engine();
        flood_fill(&mut buf, &mut eng, 2, Point::new(0, 0), &mut OpControl::new());
        assert!(buf.data().iter().all(|&c| c == 2));
    }

    #[test]
    fn test_flood_offscreen_seed_is_noop() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        let mut eng = solid_engine();
        let b = flood_fill(
            &mut buf,
            &mut eng,
            2,
            Point::new(-1, 0),
            &mut OpControl::new(),
        );
        assert!(b.is_empty());
        assert!(buf.data().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_flood_same_color_solid_noop() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        buf.fill(3);
        let mut eng = solid_engine();
        let b = flood_fill(&mut buf, &mut eng, 3, Point::new(1, 1), &mut OpControl::new());
        assert!(b.is_empty());
    }

    #[test]
    fn test_flood_same_color_cycles_when_in_range() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        buf.fill(3);
        let mut eng = FillEngine::new(FillOptions {
            kind: FillKind::Vertical,
            gradient_dither: 0,
            predraw: false,
        });
        eng.set_ranges(&[ColorRange::new(16384, FLAG_ACTIVE, 2, 5)]);
        let b = flood_fill(&mut buf, &mut eng, 3, Point::new(1, 1), &mut OpControl::new());
        assert!(!b.is_empty());
        // the substituted fill repaints the region as a band gradient
        assert_eq!(buf.get(0, 0), Some(5));
        assert_eq!(buf.get(0, 1), Some(4));
        assert_eq!(buf.get(0, 2), Some(3));
        assert_eq!(buf.get(0, 3), Some(2));
    }

    #[test]
    fn test_flood_does_not_cross_diagonal_gap() {
        // two regions touching only at a corner stay separate
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        buf.set(0, 1, 1);
        buf.set(1, 0, 1);
        let mut eng = solid_engine();
        flood_fill(&mut buf, &mut eng, 7, Point::new(0, 0), &mut OpControl::new());
        assert_eq!(buf.get(0, 0), Some(7));
        // (1, 1) is only diagonally adjacent through the blocked corner
        assert_eq!(buf.get(1, 1), Some(0));
    }

    #[test]
    fn test_flood_gradient_spans_region() {
        let mut buf = PixelBuffer::new(4, 12).unwrap();
        let mut eng = FillEngine::new(FillOptions {
            kind: FillKind::Vertical,
            gradient_dither: 0,
            predraw: false,
        });
        eng.set_ranges(&[ColorRange::new(16384, FLAG_ACTIVE, 8, 11)]);
        flood_fill(&mut buf, &mut eng, 8, Point::new(0, 0), &mut OpControl::new());
        // banded top to bottom across the flooded bounds
        assert_eq!(buf.get(0, 0), Some(11));
        assert_eq!(buf.get(0, 11), Some(8));
    }
}
