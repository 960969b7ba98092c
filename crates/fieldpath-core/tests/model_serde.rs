//! Round-trip tests for the serialized path model: the host persists
//! paths, settings, and obstacles as JSON.

use fieldpath_core::{
    Heading, Obstacle, PathPoint, Point, Segment, SequenceItem, Settings, WaitSpec,
};
use uuid::Uuid;

#[test]
fn test_segment_round_trip() {
    let mut segment = Segment::new(PathPoint::new(
        56.0,
        36.0,
        Heading::Linear {
            start_deg: 90.0,
            end_deg: 180.0,
        },
    ))
    .with_control_points(vec![Point::new(40.0, 20.0), Point::new(50.0, 30.0)]);
    segment.name = Some("Path 1".to_string());
    segment.wait_after = Some(WaitSpec {
        name: Some("score".to_string()),
        duration_ms: 1200.0,
    });

    let json = serde_json::to_string(&segment).unwrap();
    let back: Segment = serde_json::from_str(&json).unwrap();
    assert_eq!(back, segment);
}

#[test]
fn test_heading_variant_tags() {
    let tangential = PathPoint::new(0.0, 0.0, Heading::Tangential { reverse: true });
    let json = serde_json::to_string(&tangential).unwrap();
    assert!(json.contains("\"heading\":\"tangential\""));
    assert!(json.contains("\"reverse\":true"));

    let constant = PathPoint::new(0.0, 0.0, Heading::Constant { degrees: 270.0 });
    let json = serde_json::to_string(&constant).unwrap();
    assert!(json.contains("\"heading\":\"constant\""));
}

#[test]
fn test_sequence_round_trip() {
    let sequence = vec![
        SequenceItem::Path {
            segment_id: Uuid::new_v4(),
        },
        SequenceItem::Wait {
            id: Uuid::new_v4(),
            name: "load specimen".to_string(),
            duration_ms: 800.0,
        },
    ];

    let json = serde_json::to_string(&sequence).unwrap();
    let back: Vec<SequenceItem> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sequence);
}

#[test]
fn test_settings_round_trip_with_defaults() {
    let settings = Settings::default();
    let json = serde_json::to_string(&settings).unwrap();
    let back: Settings = serde_json::from_str(&json).unwrap();
    assert_eq!(back, settings);
}

#[test]
fn test_obstacle_validation() {
    let triangle = Obstacle::new(vec![
        Point::new(60.0, 60.0),
        Point::new(84.0, 60.0),
        Point::new(72.0, 84.0),
    ]);
    assert!(triangle.validate().is_ok());

    let degenerate = Obstacle::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
    assert!(degenerate.validate().is_err());
}

#[test]
fn test_segment_control_point_limit() {
    let segment = Segment::new(PathPoint::new(10.0, 10.0, Heading::Constant { degrees: 0.0 }))
        .with_control_points(vec![
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
        ]);
    assert!(segment.validate().is_err());
}
