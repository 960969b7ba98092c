//! Pose sampling against a built timeline.

use fieldpath_core::{Heading, PathPoint, Point, Segment, Settings};
use fieldpath_timeline::{calculate_path_time, robot_state, MotionProfile};

fn settings() -> Settings {
    Settings {
        max_velocity: 40.0,
        max_acceleration: 30.0,
        max_deceleration: Some(30.0),
        ..Settings::default()
    }
}

fn constant_point(x: f64, y: f64, degrees: f64) -> PathPoint {
    PathPoint::new(x, y, Heading::Constant { degrees })
}

#[test]
fn test_empty_timeline_returns_start_pose() {
    let start = constant_point(56.0, 8.0, 0.0);
    let state = robot_state(50.0, &[], &[], &start, &settings());
    assert_eq!(state.x, 56.0);
    assert_eq!(state.y, 8.0);
    assert_eq!(state.heading, 0.0);
}

#[test]
fn test_travel_endpoints() {
    let start = constant_point(0.0, 0.0, 0.0);
    let segments = vec![Segment::new(constant_point(100.0, 0.0, 0.0))];
    let cfg = settings();
    let prediction = calculate_path_time(&start, &segments, &cfg, None);

    let at_start = robot_state(0.0, &prediction.timeline, &segments, &start, &cfg);
    assert!(at_start.x.abs() < 1e-9);
    assert_eq!(at_start.heading, 0.0);

    let at_end = robot_state(100.0, &prediction.timeline, &segments, &start, &cfg);
    assert!((at_end.x - 100.0).abs() < 1e-6);
    assert!(at_end.y.abs() < 1e-9);
}

#[test]
fn test_travel_position_follows_motion_profile() {
    let start = constant_point(0.0, 0.0, 0.0);
    let segments = vec![Segment::new(constant_point(100.0, 0.0, 0.0))];
    let cfg = settings();
    let prediction = calculate_path_time(&start, &segments, &cfg, None);

    let profile = MotionProfile::new(100.0, 40.0, 30.0, 30.0);
    let halfway_time = profile.total_time() / 2.0;
    let percent = halfway_time / prediction.total_time * 100.0;

    let state = robot_state(percent, &prediction.timeline, &segments, &start, &cfg);
    let expected_x = profile.distance_at(halfway_time);
    assert!((state.x - expected_x).abs() < 1e-3);
}

#[test]
fn test_wait_event_interpolates_heading() {
    let start = constant_point(0.0, 0.0, 0.0);
    let segments = vec![
        Segment::new(constant_point(50.0, 0.0, 0.0)),
        Segment::new(constant_point(50.0, 50.0, 90.0)),
    ];
    let cfg = settings();
    let prediction = calculate_path_time(&start, &segments, &cfg, None);

    // Event 1 is the rotation wait from 0 to 90 degrees at (50, 0).
    let wait_start = prediction.timeline[1].start_time();
    let wait_duration = prediction.timeline[1].duration();
    let mid_time = wait_start + wait_duration / 2.0;
    let percent = mid_time / prediction.total_time * 100.0;

    let state = robot_state(percent, &prediction.timeline, &segments, &start, &cfg);
    assert_eq!(state.x, 50.0);
    assert_eq!(state.y, 0.0);
    assert!((state.heading - 45.0).abs() < 1e-6);
}

#[test]
fn test_linear_heading_sweeps_during_travel() {
    let start = constant_point(
        0.0,
        0.0,
        0.0,
    );
    let segments = vec![Segment::new(PathPoint::new(
        100.0,
        0.0,
        Heading::Linear {
            start_deg: 0.0,
            end_deg: 90.0,
        },
    ))];
    let cfg = settings();
    let prediction = calculate_path_time(&start, &segments, &cfg, None);

    let early = robot_state(10.0, &prediction.timeline, &segments, &start, &cfg);
    let late = robot_state(90.0, &prediction.timeline, &segments, &start, &cfg);
    assert!(early.heading >= 0.0 && early.heading <= 90.0);
    assert!(late.heading > early.heading);

    let done = robot_state(100.0, &prediction.timeline, &segments, &start, &cfg);
    assert!((done.heading - 90.0).abs() < 1e-6);
}

#[test]
fn test_percent_past_timeline_clamps_to_last_event() {
    let start = constant_point(0.0, 0.0, 0.0);
    let segments = vec![Segment::new(constant_point(100.0, 0.0, 0.0))];
    let cfg = settings();
    let prediction = calculate_path_time(&start, &segments, &cfg, None);

    let state = robot_state(150.0, &prediction.timeline, &segments, &start, &cfg);
    assert!((state.x - 100.0).abs() < 1e-6);
}
