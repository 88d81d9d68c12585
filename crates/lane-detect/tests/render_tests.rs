use lane_detect::{
    BinaryMask, CLEAR_RGBA, DEFAULT_THRESHOLD, LANE_RGBA, ProbabilityGrid, overlay, render,
    threshold_mask,
};

fn ramp(width: usize, height: usize) -> ProbabilityGrid {
    ProbabilityGrid::from_fn(width, height, |x, y| ((x + y) % 11) as f32 / 10.0).unwrap()
}

#[test]
fn test_threshold_is_strict() {
    let probs = ProbabilityGrid::new(4, 1, vec![0.49, 0.5, 0.51, 1.0]).unwrap();
    let mask = threshold_mask(&probs, DEFAULT_THRESHOLD);
    assert_eq!(mask.data(), &[false, false, true, true]);
}

#[test]
fn test_nan_is_never_lane() {
    let probs = ProbabilityGrid::new(2, 1, vec![f32::NAN, 0.9]).unwrap();
    let mask = threshold_mask(&probs, DEFAULT_THRESHOLD);
    assert_eq!(mask.data(), &[false, true]);
}

#[test]
fn test_overlay_colors() {
    let mask = BinaryMask::new(2, 1, vec![true, false]).unwrap();
    let grid = overlay(&mask).unwrap();
    assert_eq!((grid.width(), grid.height(), grid.channels()), (2, 1, 4));
    assert_eq!(grid.pixel(0, 0), &LANE_RGBA);
    assert_eq!(grid.pixel(1, 0), &CLEAR_RGBA);
    assert_eq!(LANE_RGBA, [0, 255, 0, 255]);
    assert_eq!(CLEAR_RGBA, [0, 0, 0, 0]);
}

#[test]
fn test_render_matches_mask() {
    let probs = ramp(32, 16);
    let (mask, grid) = render(&probs, DEFAULT_THRESHOLD).unwrap();
    for y in 0..16 {
        for x in 0..32 {
            let expected = if probs.get(x, y) > 0.5 {
                LANE_RGBA
            } else {
                CLEAR_RGBA
            };
            assert_eq!(mask.get(x, y), probs.get(x, y) > 0.5);
            assert_eq!(grid.pixel(x, y), &expected);
        }
    }
}

#[test]
fn test_render_is_deterministic() {
    let probs = ramp(320, 256);
    let first = render(&probs, DEFAULT_THRESHOLD).unwrap();
    let second = render(&probs, DEFAULT_THRESHOLD).unwrap();
    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
}

#[test]
fn test_custom_threshold() {
    let probs = ProbabilityGrid::new(3, 1, vec![0.1, 0.2, 0.3]).unwrap();
    let (mask, _) = render(&probs, 0.15).unwrap();
    assert_eq!(mask.count(), 2);
}
