//! Tests for the timeline integrator
//!
//! Each scenario builds a world, queues events (directly or through a
//! policy) and checks the integrated capacity against a hand computation.

use airport_capacity_core_rs::core::time::{default_start, year_duration};
use airport_capacity_core_rs::policy::{
    CurfewPolicy, GateCapacityConstraint, GateCapacityPolicy, MaintenancePolicy, MaintenanceSchedule,
    Policy, TaxiTimeConfiguration, TaxiTimePolicy,
};
use airport_capacity_core_rs::{
    Airport, CapacityBasis, Engine, Event, EventType, Runway, RunwayCompatibility, SimulationError,
    World, WorldError, WorldState,
};
use chrono::Duration;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

const TOLERANCE: f64 = 1e-6;

fn single_runway_airport() -> Airport {
    Airport::new("Single", vec![Runway::new("09", 90.0, Duration::seconds(60))])
}

/// 09 at 60/h and 18 at 40/h, mutually compatible
fn two_runway_airport() -> Airport {
    Airport::new(
        "Pair",
        vec![
            Runway::new("09", 90.0, Duration::seconds(60)),
            Runway::new("18", 180.0, Duration::seconds(90)),
        ],
    )
}

/// 09L/09R parallels (60/h each, 35kt crosswind limit) and an isolated 18 (90/h)
fn parallel_and_crossing_airport() -> Airport {
    let ids = ["09L", "09R", "18"];
    Airport::new(
        "Parallel",
        vec![
            Runway::new("09L", 90.0, Duration::seconds(60)).with_wind_limits(35.0, 0.0),
            Runway::new("09R", 90.0, Duration::seconds(60)).with_wind_limits(35.0, 0.0),
            Runway::new("18", 180.0, Duration::seconds(40)),
        ],
    )
    .with_compatibility(RunwayCompatibility::from_edges(ids, [("09L", "09R")]))
}

fn world_for(airport: Airport, length: Duration) -> World {
    World::new(airport, default_start(), default_start() + length)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {}, got {}",
        expected,
        actual
    );
}

// ============================================================================
// Baseline
// ============================================================================

#[test]
fn test_single_runway_full_year() {
    let mut world = world_for(single_runway_airport(), year_duration());
    let capacity = Engine::new().calculate(&mut world).unwrap();
    assert_close(capacity, 525_600.0);
}

#[test]
fn test_runways_sum_without_events() {
    let mut world = world_for(two_runway_airport(), Duration::hours(10));
    let outcome = Engine::new().run(&mut world).unwrap();
    assert_close(outcome.total_capacity, 1000.0);
    assert_eq!(outcome.events_processed, 0);
    assert_eq!(outcome.events_remaining, 0);
}

#[test]
fn test_inverted_window_is_zero() {
    let airport = single_runway_airport();
    let mut world = World::new(airport, default_start(), default_start() - Duration::hours(1));
    assert_eq!(Engine::new().calculate(&mut world).unwrap(), 0.0);
}

// ============================================================================
// Curfew
// ============================================================================

#[test]
fn test_nightly_curfew_removes_seven_hours_per_day() {
    let days = 5;
    let start = default_start() + Duration::hours(6);
    let mut world = World::new(single_runway_airport(), start, start + Duration::days(days));

    let curfew_start = default_start() + Duration::hours(23);
    CurfewPolicy::daily(curfew_start, curfew_start + Duration::hours(7))
        .unwrap()
        .generate_events(&world)
        .unwrap();
    assert_eq!(world.events().len(), 2 * days as usize, "two curfew events per day");

    let capacity = Engine::new().calculate(&mut world).unwrap();
    let baseline = 60.0 * 24.0 * days as f64;
    let lost = 60.0 * 7.0 * days as f64;
    assert_close(capacity, baseline - lost);
}

#[test]
fn test_curfew_end_at_window_end_stays_queued() {
    let mut world = world_for(single_runway_airport(), Duration::hours(10));
    world.schedule_event(Event::curfew_start(default_start() + Duration::hours(8)));
    world.schedule_event(Event::curfew_end(default_start() + Duration::hours(10)));

    let outcome = Engine::new().run(&mut world).unwrap();
    assert_close(outcome.total_capacity, 480.0);
    assert_eq!(outcome.events_remaining, 1);
    let leftover = world.events().peek().unwrap();
    assert_eq!(leftover.event_type(), EventType::CurfewEnd);
}

// ============================================================================
// Maintenance
// ============================================================================

#[test]
fn test_maintenance_closes_runway() {
    let mut world = world_for(two_runway_airport(), Duration::days(2));
    MaintenancePolicy::new(MaintenanceSchedule {
        runway_designations: vec!["09".to_string()],
        duration: Duration::hours(4),
        frequency: Duration::days(1),
    })
    .unwrap()
    .generate_events(&world)
    .unwrap();

    let capacity = Engine::new().calculate(&mut world).unwrap();
    // 18 runs all 48h at 40/h; 09 loses two 4h windows at 60/h
    assert_close(capacity, 40.0 * 48.0 + 60.0 * 40.0);
}

#[test]
fn test_unknown_runway_event_aborts() {
    let mut world = world_for(single_runway_airport(), Duration::hours(2));
    world.schedule_event(Event::maintenance_start(default_start() + Duration::hours(1), "27"));

    match Engine::new().calculate(&mut world) {
        Err(SimulationError::EventApplication {
            event_type,
            source: WorldError::UnknownRunway(runway),
            ..
        }) => {
            assert_eq!(event_type, EventType::RunwayMaintenanceStart);
            assert_eq!(runway, "27");
        }
        other => panic!("expected event application error, got {:?}", other),
    }
}

// ============================================================================
// Rotation, Gates and Taxi
// ============================================================================

#[test]
fn test_rotation_change_mid_window() {
    let mut world = world_for(single_runway_airport(), Duration::hours(24));
    world.schedule_event(Event::rotation_change(default_start() + Duration::hours(12), 0.5));
    let capacity = Engine::new().calculate(&mut world).unwrap();
    assert_close(capacity, 60.0 * 12.0 + 30.0 * 12.0);
}

#[test]
fn test_event_before_start_skipped() {
    let mut world = world_for(single_runway_airport(), Duration::hours(24));
    world.schedule_event(Event::rotation_change(default_start() - Duration::hours(1), 0.5));

    let outcome = Engine::new().run(&mut world).unwrap();
    assert_eq!(outcome.events_skipped, 1);
    assert_eq!(outcome.events_processed, 0);
    assert_close(outcome.total_capacity, 1440.0);
    assert_eq!(world.rotation_multiplier(), 1.0);
}

#[test]
fn test_gate_ceiling_dominates_runways() {
    let mut world = world_for(two_runway_airport(), Duration::days(1));
    // 10 gates, 2h turnaround: 5 arrivals/h, 10 movements/h
    GateCapacityPolicy::new(GateCapacityConstraint {
        total_gates: 10,
        average_turnaround: Duration::hours(2),
    })
    .unwrap()
    .generate_events(&world)
    .unwrap();

    let capacity = Engine::new().calculate(&mut world).unwrap();
    assert_close(capacity, 240.0);
}

#[test]
fn test_generous_gate_ceiling_leaves_runways_binding() {
    let mut world = world_for(two_runway_airport(), Duration::days(1));
    GateCapacityPolicy::new(GateCapacityConstraint {
        total_gates: 500,
        average_turnaround: Duration::hours(1),
    })
    .unwrap()
    .generate_events(&world)
    .unwrap();

    let capacity = Engine::new().calculate(&mut world).unwrap();
    assert_close(capacity, 100.0 * 24.0);
}

#[test]
fn test_taxi_time_stretches_gate_cycle() {
    let mut world = world_for(two_runway_airport(), Duration::days(1));
    GateCapacityPolicy::new(GateCapacityConstraint {
        total_gates: 10,
        average_turnaround: Duration::hours(2),
    })
    .unwrap()
    .generate_events(&world)
    .unwrap();
    TaxiTimePolicy::new(TaxiTimeConfiguration {
        average_taxi_in: Duration::minutes(10),
        average_taxi_out: Duration::minutes(10),
    })
    .unwrap()
    .generate_events(&world)
    .unwrap();

    let capacity = Engine::new().calculate(&mut world).unwrap();
    // 360s per movement from the gates plus 1200s taxi
    assert_close(capacity, 86_400.0 / 1560.0);
}

#[test]
fn test_taxi_time_alone_changes_nothing() {
    let mut world = world_for(two_runway_airport(), Duration::days(1));
    world.schedule_event(Event::taxi_time(default_start(), Duration::minutes(30)));
    let capacity = Engine::new().calculate(&mut world).unwrap();
    assert_close(capacity, 2400.0);
}

// ============================================================================
// Capacity Basis
// ============================================================================

#[test]
fn test_available_basis_ignores_compatibility() {
    let mut world = world_for(parallel_and_crossing_airport(), Duration::hours(1));
    let capacity = Engine::new().calculate(&mut world).unwrap();
    assert_close(capacity, 60.0 + 60.0 + 90.0);
}

#[test]
fn test_active_basis_uses_selected_configuration() {
    let mut world = world_for(parallel_and_crossing_airport(), Duration::hours(1));
    let engine = Engine::new().with_capacity_basis(CapacityBasis::ActiveConfiguration);
    assert_eq!(engine.capacity_basis(), CapacityBasis::ActiveConfiguration);
    let capacity = engine.calculate(&mut world).unwrap();
    assert_close(capacity, 120.0);
}

#[test]
fn test_active_basis_follows_wind_change() {
    let mut world = world_for(parallel_and_crossing_airport(), Duration::hours(2));
    // 40kt from the north exceeds the parallels' crosswind limit
    world.schedule_event(Event::wind_change(default_start() + Duration::hours(1), 40.0, 0.0));

    let outcome = Engine::new()
        .with_capacity_basis(CapacityBasis::ActiveConfiguration)
        .run(&mut world)
        .unwrap();

    assert_close(outcome.total_capacity, 120.0 + 90.0);
    // wind change plus the configuration snapshot it triggers
    assert_eq!(outcome.events_processed, 2);
    let active = world.active_runway_configuration();
    assert_eq!(active.keys().collect::<Vec<_>>(), vec!["18"]);
}

#[test]
fn test_wind_change_irrelevant_to_available_basis() {
    let mut world = world_for(parallel_and_crossing_airport(), Duration::hours(2));
    world.schedule_event(Event::wind_change(default_start() + Duration::hours(1), 40.0, 0.0));
    let capacity = Engine::new().calculate(&mut world).unwrap();
    assert_close(capacity, 2.0 * 210.0);
}

// ============================================================================
// Ordering
// ============================================================================

proptest! {
    /// Events may be queued in any order; integration sees them in time
    /// order, and same-instant events apply in insertion order.
    #[test]
    fn capacity_matches_piecewise_integration(
        changes in proptest::collection::vec((0i64..1440, 1u32..=10), 0..25)
    ) {
        let mut world = world_for(single_runway_airport(), Duration::hours(24));
        for (minute, tenths) in &changes {
            world.schedule_event(Event::rotation_change(
                default_start() + Duration::minutes(*minute),
                f64::from(*tenths) / 10.0,
            ));
        }

        let mut ordered: Vec<(i64, f64)> = changes
            .iter()
            .map(|(minute, tenths)| (*minute, f64::from(*tenths) / 10.0))
            .collect();
        ordered.sort_by_key(|(minute, _)| *minute);

        let mut expected = 0.0;
        let mut previous = 0i64;
        let mut multiplier = 1.0;
        for (minute, value) in ordered {
            expected += (minute - previous) as f64 * multiplier;
            previous = minute;
            multiplier = value;
        }
        expected += (1440 - previous) as f64 * multiplier;

        let capacity = Engine::new().calculate(&mut world).unwrap();
        prop_assert!((capacity - expected).abs() < 1e-6, "expected {}, got {}", expected, capacity);
    }
}
