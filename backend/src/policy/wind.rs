//! Wind policies
//!
//! [`WindPolicy`] sets one wind for the whole simulation. [`ScheduledWindPolicy`]
//! replays a chronological list of wind changes, typically built with the
//! helpers in [`wind_patterns`](super::wind_patterns).

use crate::events::types::Event;
use crate::policy::{EventWorld, Policy, PolicyError};
use crate::selection::wind::normalize_direction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wind speed (knots) and the direction it blows from (degrees true)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindVector {
    pub speed_knots: f64,
    pub direction_true: f64,
}

impl WindVector {
    pub fn new(speed_knots: f64, direction_true: f64) -> Self {
        Self {
            speed_knots,
            direction_true,
        }
    }

    pub fn calm() -> Self {
        Self::default()
    }
}

/// A wind condition taking effect at `timestamp`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindChange {
    pub timestamp: DateTime<Utc>,
    pub speed_knots: f64,
    pub direction_true: f64,
}

impl WindChange {
    pub fn new(timestamp: DateTime<Utc>, wind: WindVector) -> Self {
        Self {
            timestamp,
            speed_knots: wind.speed_knots,
            direction_true: wind.direction_true,
        }
    }

    pub fn wind(&self) -> WindVector {
        WindVector::new(self.speed_knots, self.direction_true)
    }
}

// ============================================================================
// Static wind
// ============================================================================

/// Constant wind for the whole simulation
///
/// # Example
/// ```
/// use airport_capacity_core_rs::policy::WindPolicy;
///
/// let policy = WindPolicy::new(15.0, -90.0).unwrap();
/// assert_eq!(policy.direction_true(), 270.0);
/// assert!(WindPolicy::new(-1.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WindPolicy {
    speed_knots: f64,
    direction_true: f64,
}

impl WindPolicy {
    pub fn new(speed_knots: f64, direction_true: f64) -> Result<Self, PolicyError> {
        if speed_knots < 0.0 || !speed_knots.is_finite() {
            return Err(PolicyError::invalid("WindPolicy", "wind speed cannot be negative"));
        }
        Ok(Self {
            speed_knots,
            direction_true: normalize_direction(direction_true),
        })
    }

    pub fn speed_knots(&self) -> f64 {
        self.speed_knots
    }

    pub fn direction_true(&self) -> f64 {
        self.direction_true
    }
}

impl Policy for WindPolicy {
    fn name(&self) -> String {
        "WindPolicy".to_string()
    }

    fn generate_events(&self, world: &dyn EventWorld) -> Result<(), PolicyError> {
        world.schedule_event(Event::wind_change(
            world.start_time(),
            self.speed_knots,
            self.direction_true,
        ));
        Ok(())
    }
}

// ============================================================================
// Scheduled wind
// ============================================================================

/// Time-varying wind replayed from a schedule
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledWindPolicy {
    schedule: Vec<WindChange>,
}

impl ScheduledWindPolicy {
    /// Validate and normalize a schedule
    ///
    /// The schedule must be non-empty, strictly chronological and free of
    /// negative speeds. Directions are normalized to [0, 360).
    pub fn new(mut schedule: Vec<WindChange>) -> Result<Self, PolicyError> {
        const POLICY: &str = "ScheduledWindPolicy";

        if schedule.is_empty() {
            return Err(PolicyError::invalid(POLICY, "wind schedule cannot be empty"));
        }
        for (index, change) in schedule.iter_mut().enumerate() {
            if change.speed_knots < 0.0 || !change.speed_knots.is_finite() {
                return Err(PolicyError::invalid(
                    POLICY,
                    format!("wind change {}: wind speed cannot be negative", index),
                ));
            }
            change.direction_true = normalize_direction(change.direction_true);
        }
        if schedule.windows(2).any(|pair| pair[1].timestamp <= pair[0].timestamp) {
            return Err(PolicyError::invalid(
                POLICY,
                "wind schedule must be in chronological order",
            ));
        }
        Ok(Self { schedule })
    }

    /// Copy of the normalized schedule
    pub fn schedule(&self) -> Vec<WindChange> {
        self.schedule.clone()
    }

    /// Wind in force at `timestamp` (calm before the first change)
    pub fn wind_at(&self, timestamp: DateTime<Utc>) -> WindVector {
        self.schedule
            .iter()
            .take_while(|change| change.timestamp <= timestamp)
            .last()
            .map(WindChange::wind)
            .unwrap_or_else(WindVector::calm)
    }
}

impl Policy for ScheduledWindPolicy {
    fn name(&self) -> String {
        "ScheduledWindPolicy".to_string()
    }

    fn generate_events(&self, world: &dyn EventWorld) -> Result<(), PolicyError> {
        let start = world.start_time();
        let end = world.end_time();
        self.schedule
            .iter()
            .filter(|change| change.timestamp >= start && change.timestamp <= end)
            .for_each(|change| {
                world.schedule_event(Event::wind_change(
                    change.timestamp,
                    change.speed_knots,
                    change.direction_true,
                ))
            });
        Ok(())
    }
}
