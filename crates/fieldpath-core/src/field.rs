//! Static field geometry: the 144x144 in arena, its center structure, and
//! the boundary bands used as penetration targets by the collision metric.

use serde::{Deserialize, Serialize};

use crate::geometry::{OrientedRect, Point};

/// Field side length, inches.
pub const FIELD_SIZE: f64 = 144.0;

/// Field midline coordinate.
pub const FIELD_CENTER: f64 = FIELD_SIZE / 2.0;

/// Footprint of the central restricted zone, inches.
pub const RESTRICTED_ZONE_WIDTH: f64 = 27.5;
pub const RESTRICTED_ZONE_HEIGHT: f64 = 42.75;

/// Which side of the field the robot starts from. Selects the outer wall
/// used by the collision metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alliance {
    Blue,
    Red,
}

impl std::fmt::Display for Alliance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blue => write!(f, "blue"),
            Self::Red => write!(f, "red"),
        }
    }
}

/// Central restricted zone grown by `tolerance` on every side.
pub fn restricted_zone(tolerance: f64) -> OrientedRect {
    OrientedRect::from_center(
        Point::new(FIELD_CENTER, FIELD_CENTER),
        RESTRICTED_ZONE_WIDTH + 2.0 * tolerance,
        RESTRICTED_ZONE_HEIGHT + 2.0 * tolerance,
        0.0,
    )
}

/// Band along the alliance divider at midfield.
pub fn alliance_divider(tolerance: f64) -> OrientedRect {
    OrientedRect::from_center(
        Point::new(FIELD_CENTER, FIELD_CENTER),
        FIELD_SIZE,
        2.0 * tolerance,
        0.0,
    )
}

/// Outer wall band for the given alliance side.
pub fn outer_wall(alliance: Alliance, tolerance: f64) -> OrientedRect {
    let x = match alliance {
        Alliance::Blue => 0.0,
        Alliance::Red => FIELD_SIZE,
    };
    OrientedRect::from_center(Point::new(x, FIELD_CENTER), FIELD_SIZE, tolerance, 0.0)
}

/// Side wall band along y = 0.
pub fn side_wall_low(tolerance: f64) -> OrientedRect {
    OrientedRect::from_center(Point::new(FIELD_CENTER, 0.0), tolerance, FIELD_SIZE, 0.0)
}

/// Side wall band along y = 144.
pub fn side_wall_high(tolerance: f64) -> OrientedRect {
    OrientedRect::from_center(
        Point::new(FIELD_CENTER, FIELD_SIZE),
        tolerance,
        FIELD_SIZE,
        0.0,
    )
}
