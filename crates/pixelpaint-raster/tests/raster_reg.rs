//! Raster engine regression test
//!
//! Exercises the primitive rasterizers, symmetry replication, gradient
//! fills and flood fill together through the painter.

use pixelpaint_core::{ColorRange, FLAG_ACTIVE, PixelBuffer};
use pixelpaint_raster::{
    Brush, BrushKind, DrawMode, DrawOptions, FillEngine, FillKind, FillOptions, Geometry,
    OpControl, Painter, Point, SymmetryKind, SymmetryMode, SymmetrySettings, SymmetryTransform,
    prim,
};
use pixelpaint_test::RegParams;

fn painter<'a>(
    brush: &'a mut Brush,
    fill: &'a mut FillEngine,
    symmetry: &'a mut SymmetryTransform,
    ranges: &'a [ColorRange],
) -> Painter<'a> {
    Painter {
        brush,
        fill,
        symmetry,
        ranges,
        options: DrawOptions::default(),
    }
}

#[test]
fn raster_reg() {
    let mut rp = RegParams::new("raster");
    let mut ctl = OpControl::new();

    // --- Test 1: Bresenham line hits both endpoints, one pixel per step ---
    let pts = prim::line_points(Point::new(0, 0), Point::new(7, 3), false);
    rp.compare_values(8.0, pts.len() as f64, 0.0);
    rp.assert_true(pts[0] == Point::new(0, 0), "line start");
    rp.assert_true(pts[7] == Point::new(7, 3), "line end");
    let skipped = prim::line_points(Point::new(0, 0), Point::new(7, 3), true);
    rp.compare_values(7.0, skipped.len() as f64, 0.0);

    // --- Test 2: circle outline is contiguous in angular order ---
    let circle = prim::circle_octants(Point::new(0, 0), 10).into_points();
    rp.assert_true(
        circle.iter().all(|p| {
            let r2 = p.x * p.x + p.y * p.y;
            (81..=121).contains(&r2)
        }),
        "circle points near radius",
    );
    for pair in circle.windows(2) {
        let dx = (pair[0].x - pair[1].x).abs();
        let dy = (pair[0].y - pair[1].y).abs();
        if dx > 1 || dy > 1 {
            rp.assert_true(false, "circle outline contiguous");
            break;
        }
    }

    // --- Test 3: ellipse curve outline returns to its start ---
    let ell = prim::ellipse_curve_points(Point::new(50, 40), 20, 10);
    rp.compare_values(12.0, ell.len() as f64, 0.0);
    rp.assert_true(ell[0] == Point::new(50 + 20, 40), "ellipse starts at +x");

    // --- Test 4: rotational symmetry stamps all replicas ---
    let mut brush = Brush::new(BrushKind::Circle, 1);
    let mut fill = FillEngine::new(FillOptions::default());
    let mut symmetry = SymmetryTransform::new(SymmetrySettings {
        enabled: true,
        mode: SymmetryMode::Point,
        kind: SymmetryKind::Rotational,
        center: Point::new(20, 20),
        order: 4,
        ..SymmetrySettings::default()
    })
    .unwrap();
    let mut buf = PixelBuffer::new(41, 41).unwrap();
    {
        let mut p = painter(&mut brush, &mut fill, &mut symmetry, &[]);
        p.draw(&mut buf, 7, &Geometry::Point(Point::new(30, 20)), &mut ctl)
            .unwrap();
    }
    for (x, y) in [(30, 20), (20, 30), (10, 20), (20, 10)] {
        rp.assert_true(buf.get(x, y) == Some(7), "quarter-turn replica stamped");
    }
    rp.compare_values(
        4.0,
        buf.data().iter().filter(|&&c| c == 7).count() as f64,
        0.0,
    );

    // a top-edge line under the same order about (2, 2) traces the whole
    // frame of a 5x5 canvas, one edge per quarter turn
    let mut frame_symm = SymmetryTransform::new(SymmetrySettings {
        enabled: true,
        mode: SymmetryMode::Point,
        kind: SymmetryKind::Rotational,
        center: Point::new(2, 2),
        order: 4,
        ..SymmetrySettings::default()
    })
    .unwrap();
    let mut frame = PixelBuffer::new(5, 5).unwrap();
    {
        let mut p = painter(&mut brush, &mut fill, &mut frame_symm, &[]);
        p.draw(
            &mut frame,
            2,
            &Geometry::Line {
                from: Point::new(0, 0),
                to: Point::new(4, 0),
            },
            &mut ctl,
        )
        .unwrap();
    }
    for i in 0..5 {
        rp.assert_true(frame.get(i, 0) == Some(2), "frame top edge");
        rp.assert_true(frame.get(i, 4) == Some(2), "frame bottom edge");
        rp.assert_true(frame.get(0, i) == Some(2), "frame left edge");
        rp.assert_true(frame.get(4, i) == Some(2), "frame right edge");
    }
    rp.assert_true(frame.get(2, 2) == Some(0), "frame interior empty");

    // --- Test 5: mirror symmetry doubles the replica count ---
    let mut mirror = SymmetryTransform::new(SymmetrySettings {
        enabled: true,
        mode: SymmetryMode::Point,
        kind: SymmetryKind::Mirror,
        center: Point::new(20, 20),
        order: 2,
        ..SymmetrySettings::default()
    })
    .unwrap();
    let replicas = mirror.expand_point(Point::new(26, 14), true, &mut ctl);
    rp.compare_values(4.0, replicas.len() as f64, 0.0);
    rp.assert_true(
        replicas.contains(&Point::new(14, 14)),
        "mirror replica present",
    );

    // --- Test 6: vertical gradient bands the shape's bounds ---
    let ranges = [ColorRange::new(16384, FLAG_ACTIVE, 8, 11)];
    let mut grad_fill = FillEngine::new(FillOptions {
        kind: FillKind::Vertical,
        gradient_dither: 0,
        predraw: false,
    });
    grad_fill.set_ranges(&ranges);
    let mut grad_buf = PixelBuffer::new(8, 16).unwrap();
    grad_fill.fill_rect(
        &mut grad_buf,
        8,
        Point::new(0, 0),
        Point::new(7, 15),
        &mut ctl,
    );
    rp.assert_true(grad_buf.get(3, 0) == Some(11), "gradient top band");
    rp.assert_true(grad_buf.get(3, 7) == Some(10), "gradient middle band");
    rp.assert_true(grad_buf.get(3, 15) == Some(8), "gradient bottom band");
    rp.assert_true(
        grad_buf.data().iter().all(|c| (8..=11).contains(c)),
        "gradient stays in band",
    );
    // heavy random jitter and ordered dither both stay clamped to the band
    for dither in [30, -1] {
        grad_fill.set_options(FillOptions {
            kind: FillKind::Vertical,
            gradient_dither: dither,
            predraw: false,
        });
        let mut jittered = PixelBuffer::new(8, 16).unwrap();
        grad_fill.fill_rect(
            &mut jittered,
            8,
            Point::new(0, 0),
            Point::new(7, 15),
            &mut ctl,
        );
        rp.assert_true(
            jittered.data().iter().all(|c| (8..=11).contains(c)),
            "dithered gradient stays in band",
        );
    }

    // --- Test 7: flood fill stops at a border and reports tight bounds ---
    let mut border_buf = PixelBuffer::new(10, 10).unwrap();
    let mut solid_fill = FillEngine::new(FillOptions::default());
    let mut identity = SymmetryTransform::identity();
    {
        let mut p = painter(&mut brush, &mut solid_fill, &mut identity, &[]);
        p.draw(
            &mut border_buf,
            1,
            &Geometry::Rect {
                from: Point::new(2, 2),
                to: Point::new(7, 7),
                filled: false,
            },
            &mut ctl,
        )
        .unwrap();
        let bounds = p.flood(&mut border_buf, 5, Point::new(4, 4), &mut ctl);
        rp.compare_values(3.0, bounds.x_min as f64, 0.0);
        rp.compare_values(3.0, bounds.y_min as f64, 0.0);
        rp.compare_values(6.0, bounds.x_max as f64, 0.0);
        rp.compare_values(6.0, bounds.y_max as f64, 0.0);
    }
    rp.assert_true(border_buf.get(4, 4) == Some(5), "interior filled");
    rp.assert_true(border_buf.get(2, 4) == Some(1), "border intact");
    rp.assert_true(border_buf.get(1, 1) == Some(0), "outside untouched");

    // --- Test 8: filled ellipse through the painter matches the engine ---
    let mut via_painter = PixelBuffer::new(60, 40).unwrap();
    let mut via_engine = PixelBuffer::new(60, 40).unwrap();
    {
        let mut p = painter(&mut brush, &mut fill, &mut identity, &[]);
        p.draw(
            &mut via_painter,
            3,
            &Geometry::Ellipse {
                center: Point::new(30, 20),
                width: 18,
                height: 9,
                filled: true,
            },
            &mut ctl,
        )
        .unwrap();
    }
    fill.fill_ellipse(&mut via_engine, 3, Point::new(30, 20), 18, 9, &mut ctl);
    rp.compare_buf(&via_engine, &via_painter);

    // --- Test 9: seeded spray brush renders identically every time ---
    let mut spray = Brush::new(BrushKind::Spray, 6);
    let mut spray_a = PixelBuffer::new(40, 40).unwrap();
    let mut spray_b = PixelBuffer::new(40, 40).unwrap();
    spray
        .draw(
            &mut spray_a,
            4,
            Point::new(20, 20),
            DrawMode::Color,
            &mut identity,
            false,
            &mut ctl,
        )
        .unwrap();
    spray.invalidate();
    spray
        .draw(
            &mut spray_b,
            4,
            Point::new(20, 20),
            DrawMode::Color,
            &mut identity,
            false,
            &mut ctl,
        )
        .unwrap();
    rp.compare_buf(&spray_a, &spray_b);

    assert!(rp.cleanup());
}
