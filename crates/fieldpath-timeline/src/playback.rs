//! Playback of a predicted timeline.
//!
//! [`Playback`] advances a normalized progress value against wall-clock
//! timestamps supplied by the host's frame loop; suspension is modeled as
//! "no tick scheduled" and resumption as "schedule the next tick", so no
//! blocking is ever required. [`robot_state`] maps a progress value back
//! to a robot pose using the same profile math the builder used.

use serde::{Deserialize, Serialize};
use tracing::trace;

use fieldpath_core::geometry::{curve_point, shortest_rotation};
use fieldpath_core::{segment_heading_at, PathPoint, Segment, Settings};

use crate::builder::{curve_length, TimelineEvent};
use crate::profile::MotionProfile;

/// Robot pose in field inches and degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotState {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

type PercentCallback = Box<dyn FnMut(f64) + Send>;
type CompleteCallback = Box<dyn FnMut() + Send>;

/// Drives playback progress over wall-clock time.
///
/// The host owns the frame loop: it calls [`Playback::tick`] with a
/// timestamp in seconds whenever a frame fires, and keeps scheduling
/// frames while `tick` returns `true`. All control methods are safe to
/// call between ticks; nothing here blocks.
pub struct Playback {
    playing: bool,
    accumulated_seconds: f64,
    last_timestamp: Option<f64>,
    tick_scheduled: bool,
    total_duration: f64,
    loop_enabled: bool,
    external_change: bool,
    on_percent: Option<PercentCallback>,
    on_complete: Option<CompleteCallback>,
}

impl Playback {
    pub fn new(total_duration: f64) -> Self {
        Self {
            playing: false,
            accumulated_seconds: 0.0,
            last_timestamp: None,
            tick_scheduled: false,
            total_duration,
            loop_enabled: true,
            external_change: false,
            on_percent: None,
            on_complete: None,
        }
    }

    /// Register the progress listener invoked on every effective tick.
    pub fn on_percent(mut self, callback: impl FnMut(f64) + Send + 'static) -> Self {
        self.on_percent = Some(Box::new(callback));
        self
    }

    /// Register the listener fired when non-looping playback completes.
    pub fn on_complete(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.loop_enabled
    }

    pub fn duration(&self) -> f64 {
        self.total_duration
    }

    /// Current progress in percent, derived from accumulated time.
    pub fn percent(&self) -> f64 {
        if self.total_duration > 0.0 {
            (self.accumulated_seconds / self.total_duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    fn emit_percent(&mut self, percent: f64) {
        if self.external_change {
            return;
        }
        if let Some(callback) = self.on_percent.as_mut() {
            callback(percent);
        }
    }

    /// Start (or resume) playback. Returns `true` when the host must
    /// start its frame loop; `false` when one is already scheduled.
    pub fn play(&mut self) -> bool {
        if self.playing {
            return false;
        }

        // At the end of a non-looping run, play restarts from zero.
        if !self.loop_enabled
            && self.total_duration > 0.0
            && self.accumulated_seconds >= self.total_duration
        {
            self.accumulated_seconds = 0.0;
            self.emit_percent(0.0);
        }

        self.playing = true;
        if !self.tick_scheduled {
            self.last_timestamp = None;
            self.tick_scheduled = true;
            return true;
        }
        false
    }

    pub fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        self.tick_scheduled = false;
        self.last_timestamp = None;
    }

    pub fn reset(&mut self) {
        self.pause();
        self.accumulated_seconds = 0.0;
        self.last_timestamp = None;
        self.emit_percent(0.0);
    }

    /// Jump to `target_percent`. The progress listener is called with the
    /// clamped value immediately; the next tick's own echo is suppressed
    /// so the external change is not fed back twice.
    pub fn seek_to_percent(&mut self, target_percent: f64) {
        let clamped = target_percent.clamp(0.0, 100.0);
        self.accumulated_seconds = if self.total_duration > 0.0 {
            clamped / 100.0 * self.total_duration
        } else {
            0.0
        };

        if let Some(callback) = self.on_percent.as_mut() {
            callback(clamped);
        }
        self.external_change = true;
    }

    /// Change the timeline duration, preserving the current visual
    /// position by rescaling accumulated time proportionally.
    pub fn set_duration(&mut self, duration: f64) {
        if self.total_duration > 0.0 {
            let progress = self.accumulated_seconds / self.total_duration;
            self.total_duration = duration;
            self.accumulated_seconds = progress * duration.max(0.0);
        } else {
            self.total_duration = duration;
            self.accumulated_seconds = self.accumulated_seconds.min(duration.max(0.0));
        }
        let percent = self.percent();
        self.emit_percent(percent);
    }

    pub fn set_loop(&mut self, loop_enabled: bool) {
        self.loop_enabled = loop_enabled;
    }

    /// Advance playback to `timestamp` (seconds). Returns whether the
    /// host should schedule another tick.
    pub fn tick(&mut self, timestamp: f64) -> bool {
        if !self.playing {
            self.last_timestamp = None;
            self.tick_scheduled = false;
            self.external_change = false;
            return false;
        }

        let Some(last) = self.last_timestamp else {
            // First tick after play just synchronizes the clock.
            self.last_timestamp = Some(timestamp);
            self.tick_scheduled = true;
            return true;
        };

        let delta = timestamp - last;
        self.last_timestamp = Some(timestamp);
        self.accumulated_seconds += delta;

        let keep_going = if self.total_duration > 0.0 {
            if self.loop_enabled {
                self.accumulated_seconds = self.accumulated_seconds.rem_euclid(self.total_duration);
                let percent = self.percent();
                trace!(percent, "loop tick");
                self.emit_percent(percent);
                true
            } else if self.accumulated_seconds >= self.total_duration {
                self.accumulated_seconds = self.total_duration;
                self.emit_percent(100.0);
                self.playing = false;
                self.last_timestamp = None;
                if let Some(callback) = self.on_complete.as_mut() {
                    callback();
                }
                false
            } else {
                let percent = self.percent();
                self.emit_percent(percent);
                true
            }
        } else {
            self.emit_percent(0.0);
            true
        };

        self.external_change = false;
        self.tick_scheduled = keep_going;
        keep_going
    }
}

/// Map a progress percentage to the robot's pose.
///
/// Locates the timeline event containing the elapsed time (falling back
/// to the last event), then interpolates: heading rotation in place for
/// waits, profile-timed curve sampling for travels.
pub fn robot_state(
    percent: f64,
    timeline: &[TimelineEvent],
    segments: &[Segment],
    start_point: &PathPoint,
    settings: &Settings,
) -> RobotState {
    let fallback = RobotState {
        x: start_point.x,
        y: start_point.y,
        heading: 0.0,
    };

    let Some(last_event) = timeline.last() else {
        return fallback;
    };

    let total_duration = last_event.end_time();
    let current_seconds = percent / 100.0 * total_duration;

    let active = timeline
        .iter()
        .find(|e| current_seconds >= e.start_time() && current_seconds <= e.end_time())
        .unwrap_or(last_event);

    match active {
        TimelineEvent::Wait {
            duration,
            start_time,
            start_heading,
            target_heading,
            at_point,
            ..
        } => {
            let progress = if *duration > 0.0 {
                ((current_seconds - start_time) / duration).clamp(0.0, 1.0)
            } else {
                0.0
            };
            RobotState {
                x: at_point.x,
                y: at_point.y,
                heading: shortest_rotation(*start_heading, *target_heading, progress),
            }
        }
        TimelineEvent::Travel {
            segment_index,
            duration,
            start_time,
            ..
        } => {
            let Some(segment) = segments.get(*segment_index) else {
                return fallback;
            };
            let prev_point = if *segment_index == 0 {
                start_point.point()
            } else {
                segments[segment_index - 1].end_point.point()
            };

            let polygon = segment.control_polygon(prev_point);
            let length = curve_length(&polygon);

            let time_into_event = (current_seconds - start_time).clamp(0.0, *duration);
            let profile = MotionProfile::new(
                length,
                settings.max_velocity,
                settings.max_acceleration,
                settings.deceleration(),
            );

            let fraction = if length > 0.0 {
                (profile.distance_at(time_into_event) / length).clamp(0.0, 1.0)
            } else {
                0.0
            };

            let position = curve_point(fraction, &polygon);
            let heading = segment_heading_at(segment, prev_point, fraction);

            RobotState {
                x: position.x,
                y: position.y,
                heading,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_then_percent_round_trips() {
        let mut playback = Playback::new(10.0);
        playback.seek_to_percent(50.0);
        assert!((playback.percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_seek_clamps() {
        let mut playback = Playback::new(10.0);
        playback.seek_to_percent(250.0);
        assert_eq!(playback.percent(), 100.0);
        playback.seek_to_percent(-3.0);
        assert_eq!(playback.percent(), 0.0);
    }

    #[test]
    fn test_tick_advances_percent() {
        let mut playback = Playback::new(10.0);
        assert!(playback.play());
        assert!(playback.tick(0.0));
        assert!(playback.tick(2.5));
        assert!((playback.percent() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_loop_completes_and_stops() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let completed = Arc::new(AtomicBool::new(false));
        let flag = completed.clone();

        let mut playback = Playback::new(2.0).on_complete(move || {
            flag.store(true, Ordering::SeqCst);
        });
        playback.set_loop(false);
        playback.play();
        playback.tick(0.0);
        assert!(!playback.tick(5.0));
        assert!(completed.load(Ordering::SeqCst));
        assert!(!playback.is_playing());
        assert_eq!(playback.percent(), 100.0);
    }

    #[test]
    fn test_loop_wraps_accumulated_time() {
        let mut playback = Playback::new(4.0);
        playback.play();
        playback.tick(0.0);
        assert!(playback.tick(5.0));
        assert!((playback.percent() - 25.0).abs() < 1e-9);
        assert!(playback.is_playing());
    }

    #[test]
    fn test_set_duration_preserves_position() {
        let mut playback = Playback::new(10.0);
        playback.seek_to_percent(50.0);
        playback.set_duration(20.0);
        assert!((playback.percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_seek_suppresses_one_echo() {
        use std::sync::{Arc, Mutex};

        let seen: Arc<Mutex<Vec<f64>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let mut playback = Playback::new(10.0).on_percent(move |p| {
            sink.lock().unwrap().push(p);
        });

        playback.play();
        playback.tick(0.0);
        playback.seek_to_percent(50.0);
        // The seek emits directly; the next tick's echo is swallowed.
        playback.tick(1.0);
        playback.tick(2.0);

        let calls = seen.lock().unwrap();
        assert_eq!(calls[0], 50.0);
        assert_eq!(calls.len(), 2);
    }
}
