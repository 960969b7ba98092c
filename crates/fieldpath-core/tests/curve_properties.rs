//! Behavioral tests for the cubic curve and its collision metric.

use fieldpath_core::{Alliance, CubicCurve, OrientedRect, Point};
use proptest::prelude::*;

fn bent_curve(offset: f64) -> CubicCurve {
    CubicCurve::new(
        Point::new(0.0, 0.0),
        Point::new(25.0, offset),
        Point::new(75.0, offset),
        Point::new(100.0, 0.0),
    )
}

#[test]
fn test_endpoints_are_exact() {
    let curve = CubicCurve::new(
        Point::new(56.0, 8.0),
        Point::new(60.0, 40.0),
        Point::new(50.0, 70.0),
        Point::new(56.0, 100.0),
    );
    assert_eq!(curve.evaluate(0.0), curve.p0());
    assert_eq!(curve.evaluate(1.0), curve.p3());
}

#[test]
fn test_arc_length_grows_as_control_points_leave_chord() {
    let mut previous = bent_curve(0.0).arc_length();
    for offset in [5.0, 10.0, 20.0, 40.0] {
        let length = bent_curve(offset).arc_length();
        assert!(
            length > previous,
            "offset {offset} should lengthen the curve ({length} <= {previous})"
        );
        previous = length;
    }
}

#[test]
fn test_degenerate_curve_has_zero_length() {
    let p = Point::new(72.0, 72.0);
    let curve = CubicCurve::new(p, p, p, p);
    assert_eq!(curve.arc_length(), 0.0);
}

#[test]
fn test_arc_length_is_cached() {
    let curve = bent_curve(20.0);
    let first = curve.arc_length();
    let second = curve.arc_length();
    assert_eq!(first, second);
}

#[test]
fn test_collision_weight_at_field_center() {
    // A degenerate curve parked on the field center: robot 16x16 at
    // (72, 72) with 1 in tolerances penetrates the restricted zone by 16,
    // the divider band by 2, and each wall band by 1.
    let p = Point::new(72.0, 72.0);
    let curve = CubicCurve::new(p, p, p, p);
    let weight = curve.collision_weight(Alliance::Blue, 0.0, 1.0, 1.0, 16.0, 16.0);
    assert!((weight - 20.0 * 21.0 / 100.0).abs() < 1e-12);
}

#[test]
fn test_collision_weight_uses_only_terminal_sample() {
    // The path crosses the divider band mid-way, but its final sample is
    // clear of every region, so the score is zero.
    let curve = CubicCurve::new(
        Point::new(30.0, 30.0),
        Point::new(30.0, 53.0),
        Point::new(30.0, 77.0),
        Point::new(30.0, 100.0),
    );

    let mid = curve.evaluate(0.6);
    let robot = OrientedRect::from_center(mid, 16.0, 16.0, 0.0);
    let divider = fieldpath_core::field::alliance_divider(1.0);
    assert!(
        fieldpath_core::minimum_separating_width(&robot, &divider) > 0.0,
        "expected the mid-path sample to penetrate the divider"
    );

    let weight = curve.collision_weight(Alliance::Blue, 0.0, 1.0, 1.0, 16.0, 16.0);
    assert_eq!(weight, 0.0);
}

#[test]
fn test_alliance_selects_outer_wall() {
    // Parked on the divider at the red end of the field: both alliances
    // see the divider penetration, but only red also sees its outer wall.
    let p = Point::new(140.0, 72.0);
    let curve = CubicCurve::new(p, p, p, p);
    let red = curve.collision_weight(Alliance::Red, 0.0, 2.0, 1.0, 16.0, 16.0);
    let blue = curve.collision_weight(Alliance::Blue, 0.0, 2.0, 1.0, 16.0, 16.0);
    assert!(blue > 0.0);
    assert!(red > blue);
    assert!((red - blue - 20.0 * 2.0 / 100.0).abs() < 1e-12);
}

proptest! {
    #[test]
    fn prop_arc_length_at_least_chord(
        x0 in 0.0..144.0, y0 in 0.0..144.0,
        x1 in 0.0..144.0, y1 in 0.0..144.0,
        x2 in 0.0..144.0, y2 in 0.0..144.0,
        x3 in 0.0..144.0, y3 in 0.0..144.0,
    ) {
        let p0 = Point::new(x0, y0);
        let p3 = Point::new(x3, y3);
        let curve = CubicCurve::new(p0, Point::new(x1, y1), Point::new(x2, y2), p3);
        // The sampled polyline can undershoot the true chord only by
        // floating error.
        prop_assert!(curve.arc_length() >= p0.distance_to(&p3) - 1e-9);
    }

    #[test]
    fn prop_invert_lands_on_nearest_sample(t_index in 0usize..=100) {
        let curve = CubicCurve::new(
            Point::new(10.0, 10.0),
            Point::new(50.0, 120.0),
            Point::new(90.0, 20.0),
            Point::new(130.0, 110.0),
        );
        let t = t_index as f64 / 100.0;
        let recovered = curve.invert(curve.evaluate(t));
        prop_assert!((recovered - t).abs() < 1e-12);
    }
}
