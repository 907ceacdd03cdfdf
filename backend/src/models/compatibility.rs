//! Runway compatibility graph
//!
//! Describes which runways may be active at the same time as an adjacency
//! list keyed by runway designation. The graph is built once from the airport
//! description and never changes during a simulation.
//!
//! An absent graph means every runway is compatible with every other one.
//!
//! # Example
//!
//! Parallel runways 09L/09R with a crossing runway 18 that must operate alone:
//!
//! ```
//! use airport_capacity_core_rs::RunwayCompatibility;
//!
//! let compat = RunwayCompatibility::from_edges(["09L", "09R", "18"], [("09L", "09R")]);
//! assert!(compat.is_compatible("09L", "09R"));
//! assert!(!compat.is_compatible("09L", "18"));
//! assert!(compat.is_compatible("18", "18"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// Errors detected while validating a compatibility graph
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompatibilityError {
    #[error("compatibility graph references non-existent runway: {0}")]
    UnknownRunway(String),

    #[error("runway {runway} references non-existent compatible runway: {compatible}")]
    UnknownCompatibleRunway { runway: String, compatible: String },

    #[error("asymmetric compatibility: {runway} lists {compatible} as compatible, but {compatible} has no compatibility list")]
    MissingReverseEntry { runway: String, compatible: String },

    #[error("asymmetric compatibility: {runway} lists {compatible} as compatible, but {compatible} does not list {runway}")]
    Asymmetric { runway: String, compatible: String },

    #[error("runway {0} is not in the compatibility graph")]
    MissingRunway(String),
}

/// Adjacency list of runways that may operate simultaneously
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunwayCompatibility {
    graph: Option<BTreeMap<String, Vec<String>>>,
}

impl RunwayCompatibility {
    /// A graph in which every runway is compatible with every other
    pub fn all_compatible() -> Self {
        Self { graph: None }
    }

    /// Wrap an explicit adjacency list
    pub fn new(graph: BTreeMap<String, Vec<String>>) -> Self {
        Self { graph: Some(graph) }
    }

    /// Build a symmetric graph from a runway list and undirected edges
    ///
    /// Every runway gets an entry, even when it has no compatible partner.
    pub fn from_edges<I, S, E, A, B>(runways: I, edges: E) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut graph: BTreeMap<String, Vec<String>> = runways
            .into_iter()
            .map(|id| (id.into(), Vec::new()))
            .collect();

        for (a, b) in edges {
            let (a, b) = (a.into(), b.into());
            if a == b {
                continue;
            }
            let forward = graph.entry(a.clone()).or_default();
            if !forward.contains(&b) {
                forward.push(b.clone());
            }
            let reverse = graph.entry(b).or_default();
            if !reverse.contains(&a) {
                reverse.push(a);
            }
        }

        Self::new(graph)
    }

    /// Whether an explicit graph is present
    pub fn is_defined(&self) -> bool {
        self.graph.is_some()
    }

    /// Borrow the adjacency list, if any
    pub fn graph(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        self.graph.as_ref()
    }

    /// Check symmetry, referential integrity and completeness
    ///
    /// Self-references are ignored. An absent graph is always valid.
    pub fn validate(&self, runway_ids: &[String]) -> Result<(), CompatibilityError> {
        let Some(graph) = &self.graph else {
            return Ok(());
        };

        let valid: BTreeSet<&str> = runway_ids.iter().map(String::as_str).collect();

        for (runway, compatible_list) in graph {
            if !valid.contains(runway.as_str()) {
                return Err(CompatibilityError::UnknownRunway(runway.clone()));
            }

            for compatible in compatible_list {
                if compatible == runway {
                    continue;
                }
                if !valid.contains(compatible.as_str()) {
                    return Err(CompatibilityError::UnknownCompatibleRunway {
                        runway: runway.clone(),
                        compatible: compatible.clone(),
                    });
                }
                let Some(reverse) = graph.get(compatible) else {
                    return Err(CompatibilityError::MissingReverseEntry {
                        runway: runway.clone(),
                        compatible: compatible.clone(),
                    });
                };
                if !reverse.contains(runway) {
                    return Err(CompatibilityError::Asymmetric {
                        runway: runway.clone(),
                        compatible: compatible.clone(),
                    });
                }
            }
        }

        for id in runway_ids {
            if !graph.contains_key(id) {
                return Err(CompatibilityError::MissingRunway(id.clone()));
            }
        }

        Ok(())
    }

    /// Whether two runways may be active at the same time
    pub fn is_compatible(&self, a: &str, b: &str) -> bool {
        let Some(graph) = &self.graph else {
            return true;
        };
        if a == b {
            return true;
        }
        graph
            .get(a)
            .map(|list| list.iter().any(|id| id == b))
            .unwrap_or(false)
    }

    /// Runways compatible with `runway` (never including itself)
    ///
    /// Returns an owned copy of the stored list with any self-reference
    /// filtered out; with no graph, every other id in `all_runways`.
    pub fn compatible_with(&self, runway: &str, all_runways: &[String]) -> Vec<String> {
        match &self.graph {
            None => all_runways
                .iter()
                .filter(|id| id.as_str() != runway)
                .cloned()
                .collect(),
            Some(graph) => graph
                .get(runway)
                .map(|list| list.iter().filter(|id| id.as_str() != runway).cloned().collect())
                .unwrap_or_default(),
        }
    }
}

impl fmt::Display for RunwayCompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(graph) = &self.graph else {
            return write!(f, "RunwayCompatibility{{all runways compatible}}");
        };

        writeln!(f, "RunwayCompatibility{{")?;
        for (runway, list) in graph {
            let mut sorted = list.clone();
            sorted.sort();
            writeln!(f, "  {}: [{}]", runway, sorted.join(", "))?;
        }
        write!(f, "}}")
    }
}
