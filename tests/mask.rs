use inpaint_mask::{MaskEngine, MaskError, StrokeMode, MASKED, UNMASKED};

fn assert_all_black(mask: &inpaint_mask::MaskBitmap) {
    assert!(mask.pixels().iter().all(|&v| v == UNMASKED));
}

#[test]
fn empty_path_gives_black_mask_of_requested_size() {
    let mut engine = MaskEngine::new();
    let mask = engine.finalize(37, 21).unwrap();
    assert_eq!(mask.dimensions(), (37, 21));
    assert_eq!(mask.pixels().len(), 37 * 21);
    assert_all_black(&mask);
}

#[test]
fn top_row_stroke_masks_top_only() {
    let (w, h) = (120, 200);
    let mut engine = MaskEngine::new();
    engine.begin_stroke((0.0, 0.0));
    engine.extend_stroke(((w - 1) as f32, 0.0));
    let mask = engine.finalize(w, h).unwrap();

    for x in [5, 60, 110] {
        assert_eq!(mask.get(x, 0), Some(MASKED), "row 0, x={x}");
        assert_eq!(mask.get(x, 10), Some(MASKED), "row 10, x={x}");
        assert_eq!(mask.get(x, h as u32 - 1), Some(UNMASKED), "last row, x={x}");
    }
    assert_eq!(mask.get(60, 40), Some(UNMASKED));
}

#[test]
fn clear_then_finalize_matches_fresh_engine() {
    let mut fresh = MaskEngine::new();
    let expected = fresh.finalize(64, 64).unwrap();

    let mut engine = MaskEngine::new();
    engine.begin_stroke((3.0, 3.0));
    engine.extend_stroke((60.0, 60.0));
    engine.clear();
    let mask = engine.finalize(64, 64).unwrap();

    assert_eq!(mask, expected);
    assert_all_black(&mask);
}

#[test]
fn dimensions_hold_for_any_coordinates() {
    let strokes: [&[(f32, f32)]; 5] = [
        &[(-100.0, -100.0), (-50.0, -20.0)],
        &[(1000.0, 5.0), (2000.0, 900.0)],
        &[(-40.0, 10.0), (90.0, 10.0), (90.0, 400.0)],
        &[(5.0, 5.0), (5.0, 5.0)],
        &[(-1e15, 0.0), (1e15, 0.0)],
    ];
    for (w, h) in [(1, 1), (3, 200), (80, 60)] {
        for points in strokes {
            let mut engine = MaskEngine::new();
            engine.begin_stroke(points[0]);
            for &p in &points[1..] {
                engine.extend_stroke(p);
            }
            let mask = engine.finalize(w, h).unwrap();
            assert_eq!(mask.dimensions(), (w as u32, h as u32));
            assert_eq!(mask.pixels().len(), (w * h) as usize);
        }
    }
}

#[test]
fn far_out_points_are_clipped_not_dropped() {
    for mag in [1e10_f32, 1e15, 1e38] {
        let mut engine = MaskEngine::new();
        engine.begin_stroke((-mag, 50.0));
        engine.extend_stroke((mag, 50.0));
        let mask = engine.finalize(100, 100).unwrap();
        assert_eq!(mask.get(50, 50), Some(MASKED), "mag={mag}");
        assert_eq!(mask.get(50, 0), Some(UNMASKED), "mag={mag}");
    }

    // Every size sees the top-row crossing.
    for (w, h) in [(1, 1), (3, 200), (80, 60)] {
        let mut engine = MaskEngine::new();
        engine.begin_stroke((-1e15, 0.0));
        engine.extend_stroke((1e15, 0.0));
        let mask = engine.finalize(w, h).unwrap();
        assert_eq!(mask.get(0, 0), Some(MASKED), "{w}x{h}");
        assert_eq!(mask.get(w as u32 - 1, 0), Some(MASKED), "{w}x{h}");
    }
}

#[test]
fn revision_strictly_increases() {
    let mut engine = MaskEngine::with_mode(StrokeMode::Accumulate);
    let mut seen = vec![engine.revision()];
    for i in 0..5 {
        engine.begin_stroke((i as f32, 0.0));
        seen.push(engine.revision());
        engine.extend_stroke((i as f32, 10.0));
        seen.push(engine.revision());
        engine.clear();
        seen.push(engine.revision());
    }
    assert!(seen.windows(2).all(|pair| pair[1] > pair[0]));
}

#[test]
fn non_positive_dimensions_are_rejected() {
    let mut engine = MaskEngine::new();
    engine.begin_stroke((1.0, 1.0));
    engine.extend_stroke((20.0, 1.0));

    assert_eq!(
        engine.finalize(0, 50),
        Err(MaskError::InvalidDimensions { width: 0, height: 50 })
    );
    assert_eq!(
        engine.finalize(50, -1),
        Err(MaskError::InvalidDimensions { width: 50, height: -1 })
    );
    assert!(!engine.is_empty());
}

#[test]
fn polyline_with_round_cap_and_join() {
    let mut engine = MaskEngine::new();
    engine.begin_stroke((10.0, 10.0));
    engine.extend_stroke((50.0, 10.0));
    engine.extend_stroke((50.0, 50.0));
    let mask = engine.finalize(100, 100).unwrap();

    // Along both segments.
    assert_eq!(mask.get(30, 10), Some(MASKED));
    assert_eq!(mask.get(50, 30), Some(MASKED));
    // Round start cap reaches 20px behind the first point.
    assert_eq!(mask.get(0, 10), Some(MASKED));
    // Round end cap: straight below the end is inside, the square
    // corner a butt/square cap would fill is not.
    assert_eq!(mask.get(50, 62), Some(MASKED));
    assert_eq!(mask.get(67, 67), Some(UNMASKED));
    // Round join: the arc around the bend covers what a bevel would cut,
    // but not the square corner a miter would fill.
    assert_eq!(mask.get(66, 3), Some(MASKED));
    assert_eq!(mask.get(69, 0), Some(UNMASKED));
    // Far from the polyline everything is black.
    assert_eq!(mask.get(20, 45), Some(UNMASKED));
    assert_eq!(mask.get(90, 90), Some(UNMASKED));
    assert_eq!(mask.get(10, 90), Some(UNMASKED));
    assert!(engine.is_empty());
}
