//! Mask erosion and coverage-sampling properties through the public surface
//! API.

use keepsake::{ALPHA_ERASED, Mask, OverlaySkin, Point, ScratchSurface, Stage, brush_radius};

fn stage(w: f64, h: f64, pr: f64) -> Stage {
    Stage::new(w, h, pr).unwrap()
}

#[test]
fn fresh_mask_is_fully_covered() {
    let mask = Mask::new(&stage(320.0, 240.0, 1.0));
    assert_eq!(mask.erased_ratio(), 0.0);
}

#[test]
fn erasing_everything_reports_one() {
    let mut mask = Mask::new(&stage(128.0, 96.0, 1.0));
    mask.erase_disc(Point::new(64.0, 48.0), 200.0);
    assert_eq!(mask.erased_ratio(), 1.0);
}

#[test]
fn device_pixel_ratio_scales_the_buffer_and_brush_geometry() {
    let hi = stage(200.0, 100.0, 2.0);
    let mut mask = Mask::new(&hi);
    assert_eq!(mask.width(), 400);
    assert_eq!(mask.height(), 200);

    // A stroke addressed in CSS coordinates lands at the device-scaled spot.
    mask.erase_disc(Point::new(100.0, 50.0), 10.0);
    assert_eq!(mask.alpha_at(200, 100), Some(0));
    assert_eq!(mask.alpha_at(100, 50), Some(255));
}

#[test]
fn ratio_is_monotone_across_a_whole_drag() {
    let st = stage(400.0, 300.0, 1.0);
    let mut surface = ScratchSurface::new(&st, OverlaySkin::default(), 9);

    let mut prev = 0.0f64;
    surface.pointer_down(Point::new(10.0, 40.0));
    for row in 0..3 {
        let y = 40.0 + f64::from(row) * 100.0;
        let mut x = 10.0;
        while x < 400.0 {
            let out = surface.pointer_move(Point::new(x, y));
            if let Some(ratio) = out.sampled {
                assert!(ratio >= prev, "ratio regressed: {ratio} < {prev}");
                prev = ratio;
            }
            x += 25.0;
        }
    }
    let end = surface.pointer_up().sampled.unwrap();
    assert!(end >= prev);
    assert!(end > 0.3, "a three-row sweep should erase plenty: {end}");
}

#[test]
fn separate_strokes_do_not_connect() {
    let st = stage(400.0, 100.0, 1.0);
    let mut surface = ScratchSurface::new(&st, OverlaySkin::default(), 9);

    // Two taps far apart, with a pointer-up between them: no capsule may
    // join them.
    surface.pointer_down(Point::new(50.0, 50.0));
    surface.pointer_up();
    surface.pointer_down(Point::new(350.0, 50.0));
    surface.pointer_up();

    let mid = surface.mask().alpha_at(200, 50).unwrap();
    assert_eq!(mid, 255, "midpoint between taps must stay covered");
}

#[test]
fn fast_drag_leaves_no_gaps() {
    let st = stage(400.0, 100.0, 1.0);
    let mut surface = ScratchSurface::new(&st, OverlaySkin::default(), 9);

    // Two samples only, far apart — the capsule must bridge them.
    surface.pointer_down(Point::new(30.0, 50.0));
    surface.pointer_move(Point::new(370.0, 50.0));

    for x in (30..=370).step_by(20) {
        let alpha = surface.mask().alpha_at(x, 50).unwrap();
        assert!(alpha < ALPHA_ERASED, "gap at x={x}: alpha={alpha}");
    }
}

#[test]
fn brush_policy_floor_and_fraction() {
    assert_eq!(brush_radius(100.0), 42.0);
    assert_eq!(brush_radius(419.9), 42.0);
    assert_eq!(brush_radius(420.0), 42.0);
    assert_eq!(brush_radius(800.0), 80.0);
}
