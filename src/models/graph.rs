//! Conflict graph over flight occupancy windows.
//!
//! Vertices are flights; an undirected edge connects two flights whose
//! half-open windows overlap. Built pairwise in O(n²) — adequate at the
//! batch sizes this crate targets, and trivially exact. A sweep-line
//! replacement would have to produce the identical edge set.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::Flight;

/// Undirected conflict graph keyed by flight id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConflictGraph {
    adjacency: HashMap<String, HashSet<String>>,
}

impl ConflictGraph {
    /// Builds the graph from a flight list. Flights are not modified.
    pub fn build(flights: &[Flight]) -> Self {
        let mut adjacency: HashMap<String, HashSet<String>> = flights
            .iter()
            .map(|f| (f.id.clone(), HashSet::new()))
            .collect();

        for i in 0..flights.len() {
            for j in (i + 1)..flights.len() {
                if flights[i].overlaps(&flights[j]) {
                    adjacency
                        .entry(flights[i].id.clone())
                        .or_default()
                        .insert(flights[j].id.clone());
                    adjacency
                        .entry(flights[j].id.clone())
                        .or_default()
                        .insert(flights[i].id.clone());
                }
            }
        }

        Self { adjacency }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of conflicting pairs (undirected edges).
    pub fn conflict_count(&self) -> usize {
        self.adjacency.values().map(HashSet::len).sum::<usize>() / 2
    }

    /// Neighbors of a flight (empty set for unknown ids).
    pub fn neighbors(&self, flight_id: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(flight_id)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Conflict degree of a flight (0 for unknown ids).
    pub fn degree(&self, flight_id: &str) -> usize {
        self.adjacency.get(flight_id).map_or(0, HashSet::len)
    }

    /// Largest conflict degree in the graph.
    pub fn max_degree(&self) -> usize {
        self.adjacency.values().map(HashSet::len).max().unwrap_or(0)
    }

    /// All conflicting pairs, each reported once with ids ordered
    /// lexicographically within the pair.
    pub fn edges(&self) -> Vec<(String, String)> {
        let mut edges = Vec::new();
        for (id, neighbors) in &self.adjacency {
            for other in neighbors {
                if id.as_str() < other.as_str() {
                    edges.push((id.clone(), other.clone()));
                }
            }
        }
        edges.sort();
        edges
    }

    /// The adjacency sets, keyed by flight id.
    pub fn adjacency(&self) -> &HashMap<String, HashSet<String>> {
        &self.adjacency
    }
}
