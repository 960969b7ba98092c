//! Turns a path, its settings, and an optional build sequence into a
//! timed event timeline.
//!
//! Events accumulate on a monotonically increasing clock: a rotation wait
//! is inserted wherever the current heading differs from a segment's
//! required start heading by more than 0.1 degrees, user waits become
//! their own events, and each travel leg's duration comes from its
//! velocity profile. The terminal event's end time is the path's total
//! predicted duration.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use fieldpath_core::geometry::{angular_difference, curve_point, Point};
use fieldpath_core::{
    segment_end_heading, segment_start_heading, start_point_heading, PathPoint, Segment,
    SequenceItem, Settings,
};

use crate::profile::MotionProfile;

/// Heading difference below which no rotation event is emitted, degrees.
const ROTATION_THRESHOLD_DEG: f64 = 0.1;

/// Samples used for the polyline length of a segment curve.
const LENGTH_SAMPLES: usize = 100;

/// One entry of the predicted timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimelineEvent {
    /// The robot drives one path segment.
    Travel {
        segment_index: usize,
        duration: f64,
        start_time: f64,
        end_time: f64,
    },
    /// The robot holds position, possibly rotating toward a new heading.
    Wait {
        name: Option<String>,
        duration: f64,
        start_time: f64,
        end_time: f64,
        start_heading: f64,
        target_heading: f64,
        at_point: Point,
    },
}

impl TimelineEvent {
    pub fn start_time(&self) -> f64 {
        match self {
            Self::Travel { start_time, .. } | Self::Wait { start_time, .. } => *start_time,
        }
    }

    pub fn end_time(&self) -> f64 {
        match self {
            Self::Travel { end_time, .. } | Self::Wait { end_time, .. } => *end_time,
        }
    }

    pub fn duration(&self) -> f64 {
        match self {
            Self::Travel { duration, .. } | Self::Wait { duration, .. } => *duration,
        }
    }
}

/// The timing summary handed to collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePrediction {
    pub total_time: f64,
    pub segment_times: Vec<f64>,
    pub total_distance: f64,
    pub timeline: Vec<TimelineEvent>,
}

/// Polyline length of the curve spanned by `polygon`.
pub(crate) fn curve_length(polygon: &[Point]) -> f64 {
    let mut length = 0.0;
    let mut prev = polygon[0];

    for i in 1..=LENGTH_SAMPLES {
        let point = curve_point(i as f64 / LENGTH_SAMPLES as f64, polygon);
        length += point.distance_to(&prev);
        prev = point;
    }

    length
}

fn ms_to_seconds(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    value / 1000.0
}

/// The sequence actually executed: the explicit one when present and
/// non-empty, otherwise the segments in order with their attached
/// wait-before/wait-after pauses expanded into wait items.
fn effective_sequence(segments: &[Segment], sequence: Option<&[SequenceItem]>) -> Vec<SequenceItem> {
    if let Some(seq) = sequence {
        if !seq.is_empty() {
            return seq.to_vec();
        }
    }

    let mut items = Vec::new();
    for segment in segments {
        if let Some(wait) = &segment.wait_before {
            items.push(SequenceItem::Wait {
                id: Uuid::new_v4(),
                name: wait.name.clone().unwrap_or_default(),
                duration_ms: wait.duration_ms,
            });
        }
        items.push(SequenceItem::Path {
            segment_id: segment.id,
        });
        if let Some(wait) = &segment.wait_after {
            items.push(SequenceItem::Wait {
                id: Uuid::new_v4(),
                name: wait.name.clone().unwrap_or_default(),
                duration_ms: wait.duration_ms,
            });
        }
    }
    items
}

/// Predict the timed event sequence for a path.
///
/// Sequence items referencing unknown segment ids are skipped (logged,
/// not surfaced). Settings are assumed validated.
pub fn calculate_path_time(
    start_point: &PathPoint,
    segments: &[Segment],
    settings: &Settings,
    sequence: Option<&[SequenceItem]>,
) -> TimePrediction {
    let mut segment_lengths: Vec<f64> = Vec::new();
    let mut segment_times: Vec<f64> = Vec::new();
    let mut timeline: Vec<TimelineEvent> = Vec::new();

    let mut current_time = 0.0;
    let mut current_heading = start_point_heading(start_point, segments);
    let mut last_point = start_point.point();

    let items = effective_sequence(segments, sequence);

    for (idx, item) in items.iter().enumerate() {
        match item {
            SequenceItem::Wait { name, duration_ms, .. } => {
                let wait_seconds = ms_to_seconds(*duration_ms);
                if wait_seconds > 0.0 {
                    timeline.push(TimelineEvent::Wait {
                        name: Some(name.clone()),
                        duration: wait_seconds,
                        start_time: current_time,
                        end_time: current_time + wait_seconds,
                        start_heading: current_heading,
                        target_heading: current_heading,
                        at_point: last_point,
                    });
                    current_time += wait_seconds;
                }
            }
            SequenceItem::Path { segment_id } => {
                let Some((segment_index, segment)) = segments
                    .iter()
                    .enumerate()
                    .find(|(_, s)| s.id == *segment_id)
                else {
                    warn!(%segment_id, "sequence references a missing segment; skipping");
                    continue;
                };

                let prev_point = last_point;

                let required_heading = segment_start_heading(segment, prev_point);
                if idx == 0 {
                    current_heading = required_heading;
                }
                let diff = angular_difference(current_heading, required_heading).abs();
                if diff > ROTATION_THRESHOLD_DEG {
                    let rotation_time = diff.to_radians() / settings.a_velocity;
                    timeline.push(TimelineEvent::Wait {
                        name: None,
                        duration: rotation_time,
                        start_time: current_time,
                        end_time: current_time + rotation_time,
                        start_heading: current_heading,
                        target_heading: required_heading,
                        at_point: prev_point,
                    });
                    current_time += rotation_time;
                    current_heading = required_heading;
                }

                let length = curve_length(&segment.control_polygon(prev_point));
                segment_lengths.push(length);

                let profile = MotionProfile::new(
                    length,
                    settings.max_velocity,
                    settings.max_acceleration,
                    settings.deceleration(),
                );
                let segment_time = profile.total_time();
                segment_times.push(segment_time);

                timeline.push(TimelineEvent::Travel {
                    segment_index,
                    duration: segment_time,
                    start_time: current_time,
                    end_time: current_time + segment_time,
                });
                current_time += segment_time;
                current_heading = segment_end_heading(segment, prev_point);
                last_point = segment.end_point.point();
            }
        }
    }

    let total_distance: f64 = segment_lengths.iter().sum();
    debug!(
        events = timeline.len(),
        total_time = current_time,
        total_distance,
        "timeline built"
    );

    TimePrediction {
        total_time: current_time,
        segment_times,
        total_distance,
        timeline,
    }
}

/// Format a duration in seconds as `m:ss.mmm` (or `s.mmm` under a
/// minute).
pub fn format_time(total_seconds: f64) -> String {
    if total_seconds <= 0.0 {
        return "0.000s".to_string();
    }
    let minutes = (total_seconds / 60.0).floor() as u64;
    let seconds = total_seconds % 60.0;
    if minutes > 0 {
        format!("{minutes}:{seconds:06.3}s")
    } else {
        format!("{seconds:.3}s")
    }
}

/// Wall-clock milliseconds for an animation of `total_time` seconds at
/// the given speed factor.
pub fn animation_duration_ms(total_time: f64, speed_factor: f64) -> f64 {
    total_time * 1000.0 / speed_factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0.000s");
        assert_eq!(format_time(3.8333), "3.833s");
        assert_eq!(format_time(75.5), "1:15.500s");
    }

    #[test]
    fn test_ms_to_seconds_rejects_junk() {
        assert_eq!(ms_to_seconds(f64::NAN), 0.0);
        assert_eq!(ms_to_seconds(-200.0), 0.0);
        assert_eq!(ms_to_seconds(1500.0), 1.5);
    }

    #[test]
    fn test_animation_duration_scaling() {
        assert_eq!(animation_duration_ms(4.0, 2.0), 2000.0);
    }
}
