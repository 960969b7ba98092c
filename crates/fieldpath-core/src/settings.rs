//! Motion-constraint settings.
//!
//! The numeric limits every timing and planning routine divides by. The
//! math layers assume these are positive and do not re-check; callers
//! holding user-edited values must run [`Settings::validate`] first.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Robot motion constraints and footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Nominal axis velocity, in/s.
    pub x_velocity: f64,
    /// Nominal axis velocity, in/s.
    pub y_velocity: f64,
    /// Angular velocity, rad/s.
    pub a_velocity: f64,
    /// Kinetic friction coefficient.
    pub k_friction: f64,
    /// Robot footprint width, inches.
    pub robot_width: f64,
    /// Robot footprint height, inches.
    pub robot_height: f64,
    /// Clearance kept from field boundaries, inches.
    pub safety_margin: f64,
    /// Motion-profile velocity cap, in/s.
    pub max_velocity: f64,
    /// Motion-profile acceleration limit, in/s^2.
    pub max_acceleration: f64,
    /// Motion-profile deceleration limit, in/s^2. Falls back to
    /// `max_acceleration` when absent.
    pub max_deceleration: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            x_velocity: 30.0,
            y_velocity: 30.0,
            a_velocity: std::f64::consts::PI,
            k_friction: 0.4,
            robot_width: 16.0,
            robot_height: 16.0,
            safety_margin: 1.0,
            max_velocity: 40.0,
            max_acceleration: 30.0,
            max_deceleration: Some(30.0),
        }
    }
}

impl Settings {
    /// Deceleration limit, defaulting to the acceleration limit.
    pub fn deceleration(&self) -> f64 {
        self.max_deceleration.unwrap_or(self.max_acceleration)
    }

    /// Radius of the circle circumscribing the robot footprint.
    pub fn robot_radius(&self) -> f64 {
        (self.robot_width * self.robot_width + self.robot_height * self.robot_height).sqrt() / 2.0
    }

    /// Reject non-positive or non-finite limits before they reach the
    /// profile and solver math.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("x_velocity", self.x_velocity),
            ("y_velocity", self.y_velocity),
            ("a_velocity", self.a_velocity),
            ("robot_width", self.robot_width),
            ("robot_height", self.robot_height),
            ("max_velocity", self.max_velocity),
            ("max_acceleration", self.max_acceleration),
            ("max_deceleration", self.deceleration()),
        ];

        for (key, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::InvalidSetting {
                    key: key.to_string(),
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        for (key, value) in [
            ("k_friction", self.k_friction),
            ("safety_margin", self.safety_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::InvalidSetting {
                    key: key.to_string(),
                    reason: format!("must be a non-negative number, got {value}"),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_deceleration_falls_back_to_acceleration() {
        let settings = Settings {
            max_deceleration: None,
            ..Settings::default()
        };
        assert_eq!(settings.deceleration(), settings.max_acceleration);
    }

    #[test]
    fn test_robot_radius_circumscribes_footprint() {
        let settings = Settings::default();
        let expected = (16.0_f64 * 16.0 + 16.0 * 16.0).sqrt() / 2.0;
        assert!((settings.robot_radius() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_velocity_rejected() {
        let settings = Settings {
            max_velocity: 0.0,
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("max_velocity"));
    }
}
