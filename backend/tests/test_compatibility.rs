//! Tests for the runway compatibility graph
//!
//! Covers validation errors, compatibility queries and the symmetry and
//! reflexivity properties every valid graph must satisfy.

use airport_capacity_core_rs::{CompatibilityError, RunwayCompatibility};
use proptest::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// Test Helpers
// ============================================================================

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn graph(entries: &[(&str, &[&str])]) -> RunwayCompatibility {
    let map: BTreeMap<String, Vec<String>> = entries
        .iter()
        .map(|(id, list)| (id.to_string(), ids(list)))
        .collect();
    RunwayCompatibility::new(map)
}

/// 09L/09R parallel, 18 crossing both
fn parallel_with_crossing() -> RunwayCompatibility {
    graph(&[("09L", &["09R"]), ("09R", &["09L"]), ("18", &[])])
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_valid_graph_passes() {
    let compat = parallel_with_crossing();
    assert!(compat.validate(&ids(&["09L", "09R", "18"])).is_ok());
}

#[test]
fn test_asymmetric_graph_rejected() {
    let compat = graph(&[("09L", &["09R"]), ("09R", &[]), ("18", &[])]);
    let err = compat.validate(&ids(&["09L", "09R", "18"])).unwrap_err();
    assert_eq!(
        err,
        CompatibilityError::Asymmetric {
            runway: "09L".to_string(),
            compatible: "09R".to_string()
        }
    );
    assert!(err.to_string().contains("09R does not list 09L"));
}

#[test]
fn test_missing_reverse_entry_rejected() {
    let compat = graph(&[("09L", &["09R"]), ("18", &[])]);
    let err = compat.validate(&ids(&["09L", "09R", "18"])).unwrap_err();
    assert!(matches!(err, CompatibilityError::MissingReverseEntry { .. }));
}

#[test]
fn test_dangling_reference_rejected() {
    let compat = graph(&[("09L", &["27"]), ("09R", &[])]);
    let err = compat.validate(&ids(&["09L", "09R"])).unwrap_err();
    assert_eq!(
        err,
        CompatibilityError::UnknownCompatibleRunway {
            runway: "09L".to_string(),
            compatible: "27".to_string()
        }
    );
}

#[test]
fn test_unknown_key_rejected() {
    let compat = graph(&[("09L", &[]), ("36", &[])]);
    let err = compat.validate(&ids(&["09L"])).unwrap_err();
    assert_eq!(err, CompatibilityError::UnknownRunway("36".to_string()));
}

#[test]
fn test_runway_missing_from_graph_rejected() {
    let compat = graph(&[("09L", &["09R"]), ("09R", &["09L"])]);
    let err = compat.validate(&ids(&["09L", "09R", "18"])).unwrap_err();
    assert_eq!(err, CompatibilityError::MissingRunway("18".to_string()));
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_is_compatible() {
    let compat = parallel_with_crossing();
    assert!(compat.is_compatible("09L", "09R"));
    assert!(compat.is_compatible("09R", "09L"));
    assert!(!compat.is_compatible("09L", "18"));
    assert!(compat.is_compatible("18", "18"), "A runway is always compatible with itself");
    assert!(!compat.is_compatible("27", "09L"), "Unknown runways are incompatible");
}

#[test]
fn test_absent_graph_all_compatible() {
    let compat = RunwayCompatibility::all_compatible();
    assert!(compat.is_compatible("09L", "18"));
    assert!(compat.is_compatible("anything", "else"));
}

#[test]
fn test_compatible_with_absent_graph_returns_others() {
    let compat = RunwayCompatibility::all_compatible();
    let all = ids(&["09L", "09R", "18"]);
    assert_eq!(compat.compatible_with("09L", &all), ids(&["09R", "18"]));
}

#[test]
fn test_compatible_with_unknown_runway_empty() {
    let compat = parallel_with_crossing();
    assert!(compat
        .compatible_with("27", &ids(&["09L", "09R", "18"]))
        .is_empty());
}

#[test]
fn test_compatible_with_returns_independent_copy() {
    let compat = parallel_with_crossing();
    let all = ids(&["09L", "09R", "18"]);

    let mut first = compat.compatible_with("09L", &all);
    first.push("18".to_string());

    assert_eq!(
        compat.compatible_with("09L", &all),
        ids(&["09R"]),
        "Mutating a returned list must not affect the graph"
    );
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Symmetric graphs built from arbitrary edge sets stay valid, symmetric
    /// and reflexive.
    #[test]
    fn compatibility_symmetric_and_reflexive(
        edges in proptest::collection::vec((0usize..6, 0usize..6), 0..20)
    ) {
        let names: Vec<String> = (0..6).map(|i| format!("R{}", i)).collect();
        let compat = RunwayCompatibility::from_edges(
            names.clone(),
            edges.iter().map(|(a, b)| (names[*a].clone(), names[*b].clone())),
        );

        prop_assert!(compat.validate(&names).is_ok());
        for a in &names {
            prop_assert!(compat.is_compatible(a, a));
            for b in &names {
                prop_assert_eq!(compat.is_compatible(a, b), compat.is_compatible(b, a));
            }
        }
    }
}
