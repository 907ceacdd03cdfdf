//! Runway model
//!
//! A runway is immutable for the lifetime of a simulation. Its minimum
//! separation drives per-runway throughput: one movement per separation
//! interval.

use crate::core::time::{duration_seconds, seconds_f64};
use crate::selection::wind;
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Runway surface material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceType {
    #[default]
    Asphalt,
    Concrete,
    Grass,
    Dirt,
}

/// A physical runway with its operational parameters
///
/// # Example
/// ```
/// use airport_capacity_core_rs::Runway;
/// use chrono::Duration;
///
/// let runway = Runway::new("09L", 86.0, Duration::seconds(60))
///     .with_wind_limits(38.0, 10.0);
/// assert_eq!(runway.separation_seconds(), 60.0);
/// assert_eq!(runway.reciprocal_bearing(), 266.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runway {
    /// Unique designation (e.g., "09L")
    pub designation: String,

    /// True bearing in degrees, [0, 360)
    pub true_bearing: f64,

    #[serde(default)]
    pub length_meters: f64,

    #[serde(default)]
    pub width_meters: f64,

    #[serde(default)]
    pub surface_type: SurfaceType,

    #[serde(default)]
    pub elevation_meters: f64,

    #[serde(default)]
    pub gradient_percent: f64,

    /// Maximum crosswind component in knots (0 = no limit)
    #[serde(default)]
    pub crosswind_limit_knots: f64,

    /// Maximum tailwind component in knots (0 = no limit)
    #[serde(default)]
    pub tailwind_limit_knots: f64,

    /// Minimum time between consecutive movements
    #[serde(rename = "minimum_separation_seconds", with = "duration_seconds")]
    pub minimum_separation: Duration,
}

impl Runway {
    /// Create a runway with no wind limits and no physical attributes
    pub fn new(designation: impl Into<String>, true_bearing: f64, minimum_separation: Duration) -> Self {
        Self {
            designation: designation.into(),
            true_bearing,
            length_meters: 0.0,
            width_meters: 0.0,
            surface_type: SurfaceType::default(),
            elevation_meters: 0.0,
            gradient_percent: 0.0,
            crosswind_limit_knots: 0.0,
            tailwind_limit_knots: 0.0,
            minimum_separation,
        }
    }

    /// Set crosswind and tailwind limits (knots, 0 = unlimited)
    pub fn with_wind_limits(mut self, crosswind_knots: f64, tailwind_knots: f64) -> Self {
        self.crosswind_limit_knots = crosswind_knots;
        self.tailwind_limit_knots = tailwind_knots;
        self
    }

    /// Set physical dimensions and surface
    pub fn with_dimensions(mut self, length_meters: f64, width_meters: f64, surface: SurfaceType) -> Self {
        self.length_meters = length_meters;
        self.width_meters = width_meters;
        self.surface_type = surface;
        self
    }

    /// Minimum separation in fractional seconds
    pub fn separation_seconds(&self) -> f64 {
        seconds_f64(self.minimum_separation)
    }

    /// Movements this runway can handle in a window of `window_seconds`
    ///
    /// Returns 0 for a runway with a non-positive separation.
    pub fn movements_in(&self, window_seconds: f64) -> f64 {
        let separation = self.separation_seconds();
        if separation <= 0.0 {
            0.0
        } else {
            window_seconds / separation
        }
    }

    /// Bearing of the opposite runway end
    pub fn reciprocal_bearing(&self) -> f64 {
        wind::reciprocal_bearing(self.true_bearing)
    }

    /// Whether either runway end is within its wind limits
    pub fn usable_in_wind(&self, speed_knots: f64, direction_true: f64) -> bool {
        if speed_knots == 0.0 {
            return true;
        }
        if self.crosswind_limit_knots <= 0.0 && self.tailwind_limit_knots <= 0.0 {
            return true;
        }
        wind::direction_usable(self, self.true_bearing, speed_knots, direction_true)
            || wind::direction_usable(self, self.reciprocal_bearing(), speed_knots, direction_true)
    }
}
