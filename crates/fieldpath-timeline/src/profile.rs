//! Trapezoidal and triangular velocity profiles.
//!
//! A profile is trapezoidal when the segment is long enough to reach the
//! velocity cap (`length >= accel_dist + decel_dist`), otherwise
//! triangular with the peak velocity solved from
//! `v_peak = sqrt(2 * L * a * d / (a + d))`.

/// A velocity profile over a segment of known length.
///
/// All divisor parameters must be positive; [`Settings::validate`]
/// enforces this at the boundary.
///
/// [`Settings::validate`]: fieldpath_core::Settings::validate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    length: f64,
    max_velocity: f64,
    acceleration: f64,
    deceleration: f64,
    peak_velocity: f64,
    accel_time: f64,
    decel_time: f64,
    accel_dist: f64,
    const_time: f64,
    const_dist: f64,
    triangular: bool,
}

impl MotionProfile {
    pub fn new(length: f64, max_velocity: f64, acceleration: f64, deceleration: f64) -> Self {
        let accel_dist = (max_velocity * max_velocity) / (2.0 * acceleration);
        let decel_dist = (max_velocity * max_velocity) / (2.0 * deceleration);

        if length >= accel_dist + decel_dist {
            let const_dist = length - accel_dist - decel_dist;
            Self {
                length,
                max_velocity,
                acceleration,
                deceleration,
                peak_velocity: max_velocity,
                accel_time: max_velocity / acceleration,
                decel_time: max_velocity / deceleration,
                accel_dist,
                const_time: const_dist / max_velocity,
                const_dist,
                triangular: false,
            }
        } else {
            let peak_velocity =
                ((2.0 * length * acceleration * deceleration) / (acceleration + deceleration))
                    .sqrt();
            Self {
                length,
                max_velocity,
                acceleration,
                deceleration,
                peak_velocity,
                accel_time: peak_velocity / acceleration,
                decel_time: peak_velocity / deceleration,
                accel_dist: (peak_velocity * peak_velocity) / (2.0 * acceleration),
                const_time: 0.0,
                const_dist: 0.0,
                triangular: true,
            }
        }
    }

    pub fn is_triangular(&self) -> bool {
        self.triangular
    }

    pub fn peak_velocity(&self) -> f64 {
        self.peak_velocity
    }

    pub fn total_time(&self) -> f64 {
        self.accel_time + self.const_time + self.decel_time
    }

    /// Distance traveled at elapsed time `t`, clamped to the profile.
    pub fn distance_at(&self, t: f64) -> f64 {
        if self.length <= 0.0 {
            return 0.0;
        }

        let t = t.clamp(0.0, self.total_time());

        if t <= self.accel_time {
            return 0.5 * self.acceleration * t * t;
        }

        if t <= self.accel_time + self.const_time {
            return self.accel_dist + self.max_velocity * (t - self.accel_time);
        }

        let rem = t - self.accel_time - self.const_time;
        let reached = self.accel_dist + self.const_dist;
        let cruise = if self.is_triangular() {
            self.peak_velocity
        } else {
            self.max_velocity
        };
        reached + cruise * rem - 0.5 * self.deceleration * rem * rem
    }
}
