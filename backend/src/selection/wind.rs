//! Wind decomposition against runway bearings
//!
//! All angles are degrees true, all speeds knots. The headwind component is
//! positive when the wind blows against the direction of travel; a negative
//! headwind is a tailwind.

use crate::models::runway::Runway;

/// Headwind and crosswind components of a wind vector relative to a bearing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindComponents {
    /// Component along the bearing (negative = tailwind)
    pub headwind: f64,
    /// Magnitude of the component perpendicular to the bearing (always >= 0)
    pub crosswind: f64,
}

impl WindComponents {
    /// Tailwind magnitude, zero when the wind is a headwind
    pub fn tailwind(&self) -> f64 {
        (-self.headwind).max(0.0)
    }
}

/// Normalize a direction to [0, 360)
///
/// # Example
/// ```
/// use airport_capacity_core_rs::selection::wind::normalize_direction;
///
/// assert_eq!(normalize_direction(370.0), 10.0);
/// assert_eq!(normalize_direction(-90.0), 270.0);
/// ```
pub fn normalize_direction(direction: f64) -> f64 {
    let normalized = direction.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// The opposite-end bearing of a runway
pub fn reciprocal_bearing(bearing: f64) -> f64 {
    normalize_direction(bearing + 180.0)
}

/// Signed angular difference `to - from`, folded into [-180, 180]
pub fn angle_difference(from: f64, to: f64) -> f64 {
    let mut diff = to - from;
    while diff > 180.0 {
        diff -= 360.0;
    }
    while diff < -180.0 {
        diff += 360.0;
    }
    diff
}

/// Decompose a wind into components relative to `bearing`
///
/// `wind_direction` is the direction the wind blows FROM, so a wind from the
/// runway heading is a pure headwind.
///
/// # Example
/// ```
/// use airport_capacity_core_rs::selection::wind::wind_components;
///
/// let c = wind_components(90.0, 20.0, 90.0);
/// assert!((c.headwind - 20.0).abs() < 1e-9);
/// assert!(c.crosswind.abs() < 1e-9);
/// ```
pub fn wind_components(bearing: f64, speed_knots: f64, wind_direction: f64) -> WindComponents {
    let radians = angle_difference(bearing, wind_direction).to_radians();
    WindComponents {
        headwind: speed_knots * radians.cos(),
        crosswind: (speed_knots * radians.sin()).abs(),
    }
}

/// Whether operating on `bearing` keeps the runway within its wind limits
///
/// A limit of zero means "no limit".
pub fn direction_usable(runway: &Runway, bearing: f64, speed_knots: f64, wind_direction: f64) -> bool {
    let components = wind_components(bearing, speed_knots, wind_direction);
    let crosswind_ok = runway.crosswind_limit_knots <= 0.0
        || components.crosswind <= runway.crosswind_limit_knots;
    let tailwind_ok = runway.tailwind_limit_knots <= 0.0
        || components.tailwind() <= runway.tailwind_limit_knots;
    crosswind_ok && tailwind_ok
}
