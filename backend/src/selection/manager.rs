//! Runway selector
//!
//! Derives the active runway configuration from availability, curfew, wind
//! and the compatibility graph. Every mutator takes the write lock, updates
//! one field and recomputes the whole configuration before releasing it, so
//! readers never observe a partially updated configuration.
//!
//! # Algorithm
//!
//! ```text
//! 1. Curfew active            -> empty configuration
//! 2. Available runways        -> availability map
//! 3. Wind filter              -> drop runways unusable in both directions
//! 4. Maximal cliques          -> computed once, cached
//! 5. Best clique              -> subset of step 3 with highest throughput,
//!                                fewer runways on a tie
//! 6. Direction per runway     -> only usable end, else larger headwind
//! ```

use crate::core::time::REFERENCE_WINDOW_SECONDS;
use crate::events::types::{ActiveConfiguration, ActiveRunwayInfo, Direction, OperationType};
use crate::models::compatibility::RunwayCompatibility;
use crate::models::runway::Runway;
use crate::selection::cliques::maximal_cliques;
use crate::selection::wind::{direction_usable, wind_components};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

/// Relative tolerance when comparing configuration throughput
const CAPACITY_TIE_EPSILON: f64 = 1e-9;

#[derive(Debug)]
struct SelectorState {
    availability: BTreeMap<String, bool>,
    curfew_active: bool,
    wind_speed_knots: f64,
    wind_direction_true: f64,
    active: ActiveConfiguration,
}

/// Wind-aware runway configuration selector
///
/// # Example
/// ```
/// use airport_capacity_core_rs::{Runway, RunwayCompatibility};
/// use airport_capacity_core_rs::selection::RunwayManager;
/// use chrono::Duration;
///
/// let runways = vec![
///     Runway::new("09L", 86.0, Duration::seconds(60)),
///     Runway::new("18", 176.0, Duration::seconds(50)),
/// ];
/// let compat = RunwayCompatibility::from_edges(["09L", "18"], Vec::<(&str, &str)>::new());
/// let manager = RunwayManager::new(runways, compat);
///
/// // 18 alone beats 09L alone (72 vs 60 movements/hour)
/// let active = manager.active_configuration();
/// assert_eq!(active.keys().collect::<Vec<_>>(), vec!["18"]);
///
/// manager.on_curfew_changed(true);
/// assert!(manager.active_configuration().is_empty());
/// ```
#[derive(Debug)]
pub struct RunwayManager {
    runways: Vec<Runway>,
    compatibility: RunwayCompatibility,
    cliques: OnceLock<Vec<Vec<String>>>,
    state: RwLock<SelectorState>,
}

impl RunwayManager {
    /// Create a selector with every runway available, calm wind and no curfew
    pub fn new(runways: Vec<Runway>, compatibility: RunwayCompatibility) -> Self {
        let availability = runways
            .iter()
            .map(|r| (r.designation.clone(), true))
            .collect();

        let manager = Self {
            runways,
            compatibility,
            cliques: OnceLock::new(),
            state: RwLock::new(SelectorState {
                availability,
                curfew_active: false,
                wind_speed_knots: 0.0,
                wind_direction_true: 0.0,
                active: ActiveConfiguration::new(),
            }),
        };

        {
            let mut state = manager.state.write();
            manager.recompute(&mut state);
        }
        manager
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub fn on_runway_available(&self, runway_id: &str) {
        self.set_availability(runway_id, true);
    }

    pub fn on_runway_unavailable(&self, runway_id: &str) {
        self.set_availability(runway_id, false);
    }

    pub fn on_curfew_changed(&self, active: bool) {
        let mut state = self.state.write();
        state.curfew_active = active;
        self.recompute(&mut state);
    }

    pub fn on_wind_changed(&self, speed_knots: f64, direction_true: f64) {
        let mut state = self.state.write();
        state.wind_speed_knots = speed_knots;
        state.wind_direction_true = direction_true;
        self.recompute(&mut state);
    }

    fn set_availability(&self, runway_id: &str, available: bool) {
        let mut state = self.state.write();
        match state.availability.get_mut(runway_id) {
            Some(flag) => *flag = available,
            None => {
                warn!(runway = runway_id, "availability change for unknown runway ignored");
                return;
            }
        }
        self.recompute(&mut state);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Independent copy of the current active configuration
    pub fn active_configuration(&self) -> ActiveConfiguration {
        self.state.read().active.clone()
    }

    /// All maximal compatible runway sets (computed on first use)
    pub fn maximal_cliques(&self) -> Vec<Vec<String>> {
        self.cliques().clone()
    }

    pub fn is_runway_available(&self, runway_id: &str) -> Option<bool> {
        self.state.read().availability.get(runway_id).copied()
    }

    pub fn runways(&self) -> &[Runway] {
        &self.runways
    }

    pub fn compatibility(&self) -> &RunwayCompatibility {
        &self.compatibility
    }

    fn cliques(&self) -> &Vec<Vec<String>> {
        self.cliques.get_or_init(|| {
            let ids: Vec<String> = self.runways.iter().map(|r| r.designation.clone()).collect();
            let cliques = maximal_cliques(&ids, &self.compatibility);
            trace!(count = cliques.len(), ?cliques, "maximal cliques computed");
            cliques
        })
    }

    fn runway(&self, runway_id: &str) -> Option<&Runway> {
        self.runways.iter().find(|r| r.designation == runway_id)
    }

    // ========================================================================
    // Recomputation
    // ========================================================================

    fn recompute(&self, state: &mut SelectorState) {
        state.active.clear();

        if state.curfew_active {
            debug!("curfew active, no runways selected");
            return;
        }

        let available: Vec<&Runway> = self
            .runways
            .iter()
            .filter(|r| state.availability.get(&r.designation).copied().unwrap_or(false))
            .collect();

        let usable: Vec<&Runway> = available
            .iter()
            .copied()
            .filter(|r| r.usable_in_wind(state.wind_speed_knots, state.wind_direction_true))
            .collect();

        let selected = self.select_max_capacity(&usable);

        for runway in selected {
            let direction = choose_direction(runway, state.wind_speed_knots, state.wind_direction_true);
            state.active.insert(
                runway.designation.clone(),
                ActiveRunwayInfo {
                    runway_designation: runway.designation.clone(),
                    operation_type: OperationType::Mixed,
                    direction,
                    runway: runway.clone(),
                },
            );
        }

        debug!(
            available = available.len(),
            wind_usable = usable.len(),
            selected = ?state.active.keys().collect::<Vec<_>>(),
            "active runway configuration recomputed"
        );
    }

    fn select_max_capacity<'a>(&'a self, usable: &[&'a Runway]) -> Vec<&'a Runway> {
        if !self.compatibility.is_defined() {
            return usable.to_vec();
        }

        let usable_ids: BTreeSet<&str> = usable.iter().map(|r| r.designation.as_str()).collect();
        let mut best: Option<(&Vec<String>, f64)> = None;

        for clique in self.cliques() {
            if !clique.iter().all(|id| usable_ids.contains(id.as_str())) {
                continue;
            }
            let capacity = self.clique_capacity(clique);
            let better = match best {
                None => true,
                Some((current, current_capacity)) => {
                    let tolerance = CAPACITY_TIE_EPSILON * current_capacity.abs().max(1.0);
                    if (capacity - current_capacity).abs() <= tolerance {
                        clique.len() < current.len()
                    } else {
                        capacity > current_capacity
                    }
                }
            };
            if better {
                best = Some((clique, capacity));
            }
        }

        best.map(|(clique, _)| clique.iter().filter_map(|id| self.runway(id)).collect())
            .unwrap_or_default()
    }

    fn clique_capacity(&self, clique: &[String]) -> f64 {
        clique
            .iter()
            .filter_map(|id| self.runway(id))
            .map(|r| r.movements_in(REFERENCE_WINDOW_SECONDS))
            .sum()
    }
}

/// Pick the runway end to operate from under the given wind
///
/// Calm wind selects the forward end. Otherwise the only usable end wins;
/// when both (or neither) are usable the larger headwind wins, ties going
/// to the forward end.
pub fn choose_direction(runway: &Runway, speed_knots: f64, direction_true: f64) -> Direction {
    if speed_knots == 0.0 {
        return Direction::Forward;
    }

    let forward_bearing = runway.true_bearing;
    let reverse_bearing = runway.reciprocal_bearing();

    let forward_usable = direction_usable(runway, forward_bearing, speed_knots, direction_true);
    let reverse_usable = direction_usable(runway, reverse_bearing, speed_knots, direction_true);

    match (forward_usable, reverse_usable) {
        (true, false) => Direction::Forward,
        (false, true) => Direction::Reverse,
        _ => {
            let forward = wind_components(forward_bearing, speed_knots, direction_true);
            let reverse = wind_components(reverse_bearing, speed_knots, direction_true);
            if forward.headwind >= reverse.headwind {
                Direction::Forward
            } else {
                Direction::Reverse
            }
        }
    }
}
