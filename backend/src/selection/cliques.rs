//! Maximal compatible runway sets (Bron–Kerbosch)
//!
//! A maximal clique of the compatibility graph is a set of mutually
//! compatible runways that cannot be extended by any other runway. The
//! selector only ever activates a subset of one of these sets.
//!
//! The classic three-set recursion is used: `r` is the clique being built,
//! `p` the remaining candidates, `x` the vertices already explored. Depth is
//! bounded by the runway count.

use crate::models::compatibility::RunwayCompatibility;
use std::collections::{BTreeMap, BTreeSet};

type Neighbours = BTreeMap<String, BTreeSet<String>>;

/// Enumerate every maximal clique over `runway_ids`
///
/// Each clique is returned sorted, and the list of cliques is sorted, so the
/// result is deterministic. With no compatibility graph the single clique
/// contains every runway.
///
/// # Example
/// ```
/// use airport_capacity_core_rs::RunwayCompatibility;
/// use airport_capacity_core_rs::selection::cliques::maximal_cliques;
///
/// let ids: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
/// let compat = RunwayCompatibility::from_edges(ids.clone(), [("A", "B"), ("B", "C")]);
///
/// let cliques = maximal_cliques(&ids, &compat);
/// assert_eq!(cliques, vec![vec!["A", "B"], vec!["B", "C"], vec!["D"]]);
/// ```
pub fn maximal_cliques(runway_ids: &[String], compatibility: &RunwayCompatibility) -> Vec<Vec<String>> {
    let vertices: BTreeSet<String> = runway_ids.iter().cloned().collect();
    if vertices.is_empty() {
        return Vec::new();
    }
    if !compatibility.is_defined() {
        return vec![vertices.into_iter().collect()];
    }

    let neighbours = build_neighbours(&vertices, compatibility);
    let mut result = Vec::new();
    bron_kerbosch(BTreeSet::new(), vertices, BTreeSet::new(), &neighbours, &mut result);
    result.sort();
    result
}

fn build_neighbours(vertices: &BTreeSet<String>, compatibility: &RunwayCompatibility) -> Neighbours {
    vertices
        .iter()
        .map(|v| {
            let adjacent = vertices
                .iter()
                .filter(|u| *u != v && compatibility.is_compatible(v, u))
                .cloned()
                .collect();
            (v.clone(), adjacent)
        })
        .collect()
}

fn bron_kerbosch(
    r: BTreeSet<String>,
    mut p: BTreeSet<String>,
    mut x: BTreeSet<String>,
    neighbours: &Neighbours,
    result: &mut Vec<Vec<String>>,
) {
    if p.is_empty() && x.is_empty() {
        result.push(r.into_iter().collect());
        return;
    }

    let empty = BTreeSet::new();
    for v in p.clone() {
        let adjacent = neighbours.get(&v).unwrap_or(&empty);

        let mut next_r = r.clone();
        next_r.insert(v.clone());
        let next_p = p.intersection(adjacent).cloned().collect();
        let next_x = x.intersection(adjacent).cloned().collect();
        bron_kerbosch(next_r, next_p, next_x, neighbours, result);

        p.remove(&v);
        x.insert(v);
    }
}
