//! Event application
//!
//! Each event kind maps onto a fixed set of [`WorldState`] mutators:
//! - curfew start/end: curfew flag, then selector notification
//! - maintenance start/end: runway availability, then selector notification
//! - rotation, gate, taxi: the matching setter
//! - wind: `set_wind`, which notifies the selector itself
//! - configuration changed: stores the snapshot on the world

use crate::events::types::{Event, EventKind};
use crate::models::world::{WorldError, WorldState};

impl Event {
    /// Apply this event to the world
    ///
    /// # Arguments
    /// * `world` - State to mutate
    ///
    /// # Returns
    /// Ok(()) if successful, `WorldError` when the event references an
    /// unknown runway or carries an invalid value
    pub fn apply<W: WorldState + ?Sized>(&self, world: &mut W) -> Result<(), WorldError> {
        let timestamp = self.timestamp();

        match self.kind() {
            EventKind::CurfewStart => {
                world.set_curfew_active(true);
                world.notify_curfew_change(true, timestamp)
            }

            EventKind::CurfewEnd => {
                world.set_curfew_active(false);
                world.notify_curfew_change(false, timestamp)
            }

            EventKind::RunwayMaintenanceStart { runway } => {
                world.set_runway_available(runway, false)?;
                world.notify_runway_availability_change(runway, false, timestamp)
            }

            EventKind::RunwayMaintenanceEnd { runway } => {
                world.set_runway_available(runway, true)?;
                world.notify_runway_availability_change(runway, true, timestamp)
            }

            EventKind::RotationChange { multiplier } => {
                world.set_rotation_multiplier(*multiplier);
                Ok(())
            }

            EventKind::GateCapacityConstraint {
                max_movements_per_second,
            } => world.set_gate_capacity_constraint(*max_movements_per_second),

            EventKind::TaxiTimeAdjustment { overhead } => world.set_taxi_time_overhead(*overhead),

            EventKind::WindChange {
                speed_knots,
                direction_true,
            } => world.set_wind(*speed_knots, *direction_true, timestamp),

            EventKind::ActiveRunwayConfigurationChanged { configuration } => {
                world.set_active_runway_configuration(configuration.clone());
                Ok(())
            }
        }
    }
}
