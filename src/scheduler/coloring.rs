//! Minimum-runway scheduling via conflict-graph coloring.
//!
//! # Algorithm
//!
//! 1. Build the conflict graph (pairwise half-open overlap).
//! 2. Order vertices by the chosen heuristic.
//! 3. Assign each flight the smallest runway index not used by any
//!    already-colored neighbor.
//!
//! The heuristics differ only in vertex order; the conflict test and the
//! smallest-free-index rule are shared.
//!
//! # Complexity
//! O(n²) over the conflict graph for every heuristic.
//!
//! # References
//! - Welsh & Powell (1967), "An upper bound for the chromatic number of a
//!   graph and its application to timetabling problems"
//! - Brélaz (1979), "New methods to color the vertices of a graph"

use std::collections::{BTreeMap, HashMap, HashSet};
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::{ConflictGraph, Flight};
use crate::validation::{validate_flights, ValidationError, ValidationErrorKind};

/// Vertex-ordering heuristic for the coloring pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColoringHeuristic {
    /// Input order.
    Greedy,
    /// Conflict-degree descending, ties by input order (Welsh-Powell).
    DegreeOrdered,
    /// Highest saturation first, ties by degree then input order (DSatur).
    /// Typically uses the fewest runways; the recommended default.
    #[default]
    SaturationOrdered,
}

impl FromStr for ColoringHeuristic {
    type Err = ValidationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "greedy" => Ok(Self::Greedy),
            "degree" | "welsh_powell" => Ok(Self::DegreeOrdered),
            "saturation" | "dsatur" => Ok(Self::SaturationOrdered),
            other => Err(ValidationError::new(
                ValidationErrorKind::UnknownStrategy,
                format!("Unknown coloring heuristic: {other}"),
            )),
        }
    }
}

/// Result of a coloring run.
///
/// Every flight receives exactly one runway index; no two flights on the
/// same index overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColoringResult {
    /// Input flights with runway indices filled in.
    pub flights: Vec<Flight>,
    /// Flight id → runway index (0-based).
    pub assignments: HashMap<String, usize>,
    /// Number of distinct runways used.
    pub runway_count: usize,
    /// Number of conflicting pairs in the input.
    pub conflict_count: usize,
}

impl ColoringResult {
    /// Groups flights by assigned runway, each group sorted by start time.
    pub fn by_runway(&self) -> BTreeMap<usize, Vec<&Flight>> {
        let mut groups: BTreeMap<usize, Vec<&Flight>> = BTreeMap::new();
        for flight in &self.flights {
            if let Some(runway) = flight.runway {
                groups.entry(runway).or_default().push(flight);
            }
        }
        for flights in groups.values_mut() {
            flights.sort_by_key(|f| f.start_ms);
        }
        groups
    }
}

/// Minimum-runway scheduler.
///
/// # Example
///
/// ```
/// use flight_sched::models::{Flight, MINUTE_MS};
/// use flight_sched::scheduler::{ColoringHeuristic, RunwayScheduler};
///
/// let flights = vec![
///     Flight::new("A", 0, 15 * MINUTE_MS),
///     Flight::new("B", 10 * MINUTE_MS, 15 * MINUTE_MS),
/// ];
/// let result = RunwayScheduler::default().schedule(&flights).unwrap();
/// assert_eq!(result.runway_count, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunwayScheduler {
    heuristic: ColoringHeuristic,
}

impl RunwayScheduler {
    /// Creates a scheduler with the given heuristic.
    pub fn new(heuristic: ColoringHeuristic) -> Self {
        Self { heuristic }
    }

    /// Colors the flight batch, minimizing the runway count.
    ///
    /// # Errors
    /// Rejects the whole batch on malformed input (non-positive occupancy,
    /// out-of-range priority, duplicate ids).
    pub fn schedule(&self, flights: &[Flight]) -> Result<ColoringResult, Vec<ValidationError>> {
        validate_flights(flights)?;

        let graph = ConflictGraph::build(flights);
        let conflict_count = graph.conflict_count();

        let assignments = match self.heuristic {
            ColoringHeuristic::Greedy => color_in_order(flights, &graph, 0..flights.len()),
            ColoringHeuristic::DegreeOrdered => {
                let mut order: Vec<usize> = (0..flights.len()).collect();
                // Stable sort keeps input order on equal degrees
                order.sort_by_key(|&i| std::cmp::Reverse(graph.degree(&flights[i].id)));
                color_in_order(flights, &graph, order)
            }
            ColoringHeuristic::SaturationOrdered => color_by_saturation(flights, &graph),
        };

        let runway_count = assignments.values().max().map_or(0, |&max| max + 1);
        debug!(
            "colored {} flights onto {} runways ({} conflicts, {:?})",
            flights.len(),
            runway_count,
            conflict_count,
            self.heuristic
        );

        let flights: Vec<Flight> = flights
            .iter()
            .map(|f| {
                let mut scheduled = f.clone();
                scheduled.runway = assignments.get(&f.id).copied();
                scheduled
            })
            .collect();

        Ok(ColoringResult {
            flights,
            assignments,
            runway_count,
            conflict_count,
        })
    }
}

/// Greedy coloring pass over a fixed vertex order.
fn color_in_order(
    flights: &[Flight],
    graph: &ConflictGraph,
    order: impl IntoIterator<Item = usize>,
) -> HashMap<String, usize> {
    let mut colors: HashMap<String, usize> = HashMap::new();

    for idx in order {
        let id = &flights[idx].id;
        let used: HashSet<usize> = graph
            .neighbors(id)
            .filter_map(|n| colors.get(n).copied())
            .collect();
        colors.insert(id.clone(), smallest_free(&used));
    }

    colors
}

/// DSatur: repeatedly color the uncolored vertex with the most distinct
/// neighbor colors, breaking ties by degree, then by input order.
fn color_by_saturation(flights: &[Flight], graph: &ConflictGraph) -> HashMap<String, usize> {
    let mut colors: HashMap<String, usize> = HashMap::new();
    let mut saturation: Vec<HashSet<usize>> = vec![HashSet::new(); flights.len()];
    let mut uncolored: Vec<usize> = (0..flights.len()).collect();

    let index_of: HashMap<&str, usize> = flights
        .iter()
        .enumerate()
        .map(|(i, f)| (f.id.as_str(), i))
        .collect();

    loop {
        // Ties fall to raw degree, then to the earliest input position
        let best = uncolored
            .iter()
            .enumerate()
            .max_by_key(|(_, &i)| {
                (
                    saturation[i].len(),
                    graph.degree(&flights[i].id),
                    std::cmp::Reverse(i),
                )
            })
            .map(|(pos, &i)| (pos, i));
        let Some((pos, selected)) = best else {
            break;
        };

        let id = &flights[selected].id;
        let used: HashSet<usize> = graph
            .neighbors(id)
            .filter_map(|n| colors.get(n).copied())
            .collect();
        let color = smallest_free(&used);
        colors.insert(id.clone(), color);
        uncolored.remove(pos);

        for neighbor in graph.neighbors(id) {
            if let Some(&n_idx) = index_of.get(neighbor) {
                if !colors.contains_key(neighbor) {
                    saturation[n_idx].insert(color);
                }
            }
        }
    }

    colors
}

fn smallest_free(used: &HashSet<usize>) -> usize {
    let mut color = 0;
    while used.contains(&color) {
        color += 1;
    }
    color
}

/// Bounds on the minimum runway count for a flight batch.
///
/// Lower bound: the maximum number of simultaneously open windows (the
/// largest clique in an interval graph). Upper bound: max degree + 1, by
/// the greedy coloring theorem. Empty input yields (0, 0).
pub fn runway_bounds(flights: &[Flight]) -> (usize, usize) {
    if flights.is_empty() {
        return (0, 0);
    }

    // Sweep over window boundaries; ends sort before starts at the same
    // instant because touching windows do not conflict
    let mut events: Vec<(i64, i32)> = Vec::with_capacity(flights.len() * 2);
    for f in flights {
        events.push((f.start_ms, 1));
        events.push((f.end_ms(), -1));
    }
    events.sort();

    let mut open = 0i32;
    let mut peak = 0i32;
    for (_, delta) in events {
        open += delta;
        peak = peak.max(open);
    }

    let graph = ConflictGraph::build(flights);
    (peak.max(1) as usize, graph.max_degree() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MINUTE_MS;
    use crate::validation::validate_runways;

    fn flight(id: &str, start_min: i64, occupancy_min: i64) -> Flight {
        Flight::new(id, start_min * MINUTE_MS, occupancy_min * MINUTE_MS)
    }

    fn rush_hour() -> Vec<Flight> {
        vec![
            flight("FL001", 0, 15),
            flight("FL002", 5, 15),
            flight("FL003", 10, 15),
            flight("FL004", 30, 10),
            flight("FL005", 35, 10),
            flight("FL006", 60, 15),
        ]
    }

    const ALL: [ColoringHeuristic; 3] = [
        ColoringHeuristic::Greedy,
        ColoringHeuristic::DegreeOrdered,
        ColoringHeuristic::SaturationOrdered,
    ];

    #[test]
    fn test_no_conflicting_pair_shares_a_runway() {
        for heuristic in ALL {
            let result = RunwayScheduler::new(heuristic).schedule(&rush_hour()).unwrap();
            assert!(
                validate_runways(&result.flights).is_valid,
                "{heuristic:?} produced a conflicting assignment"
            );
        }
    }

    #[test]
    fn test_every_flight_gets_exactly_one_runway() {
        for heuristic in ALL {
            let result = RunwayScheduler::new(heuristic).schedule(&rush_hour()).unwrap();
            assert_eq!(result.assignments.len(), 6);
            assert!(result.flights.iter().all(|f| f.runway.is_some()));
        }
    }

    #[test]
    fn test_disjoint_flights_need_one_runway() {
        let flights = vec![flight("A", 0, 10), flight("B", 20, 10), flight("C", 40, 10)];
        for heuristic in ALL {
            let result = RunwayScheduler::new(heuristic).schedule(&flights).unwrap();
            assert_eq!(result.runway_count, 1, "{heuristic:?}");
        }
    }

    #[test]
    fn test_mutually_overlapping_flights_need_one_each() {
        let flights: Vec<Flight> = (0..5)
            .map(|i| flight(&format!("F{i}"), i, 120))
            .collect();
        for heuristic in ALL {
            let result = RunwayScheduler::new(heuristic).schedule(&flights).unwrap();
            assert_eq!(result.runway_count, 5, "{heuristic:?}");
        }
    }

    #[test]
    fn test_empty_batch() {
        let result = RunwayScheduler::default().schedule(&[]).unwrap();
        assert_eq!(result.runway_count, 0);
        assert_eq!(result.conflict_count, 0);
        assert!(result.flights.is_empty());
    }

    #[test]
    fn test_saturation_never_worse_than_greedy() {
        // A crown-like pattern where naive orders overshoot
        let flights = vec![
            flight("A", 0, 20),
            flight("B", 10, 20),
            flight("C", 25, 20),
            flight("D", 40, 20),
            flight("E", 50, 20),
            flight("F", 15, 40),
        ];
        let greedy = RunwayScheduler::new(ColoringHeuristic::Greedy)
            .schedule(&flights)
            .unwrap();
        let dsatur = RunwayScheduler::new(ColoringHeuristic::SaturationOrdered)
            .schedule(&flights)
            .unwrap();
        assert!(dsatur.runway_count <= greedy.runway_count);
    }

    #[test]
    fn test_conflict_count_reported() {
        let result = RunwayScheduler::default().schedule(&rush_hour()).unwrap();
        // FL001-FL002, FL001-FL003, FL002-FL003, FL004-FL005
        assert_eq!(result.conflict_count, 4);
    }

    #[test]
    fn test_by_runway_grouping() {
        let result = RunwayScheduler::default().schedule(&rush_hour()).unwrap();
        let groups = result.by_runway();

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, 6);
        for flights in groups.values() {
            for pair in flights.windows(2) {
                assert!(pair[0].start_ms <= pair[1].start_ms);
            }
        }
    }

    #[test]
    fn test_heuristic_names() {
        assert_eq!(
            "dsatur".parse::<ColoringHeuristic>().unwrap(),
            ColoringHeuristic::SaturationOrdered
        );
        assert_eq!(
            "WELSH_POWELL".parse::<ColoringHeuristic>().unwrap(),
            ColoringHeuristic::DegreeOrdered
        );
        assert_eq!(
            "greedy".parse::<ColoringHeuristic>().unwrap(),
            ColoringHeuristic::Greedy
        );
        assert!("simulated_annealing".parse::<ColoringHeuristic>().is_err());
    }

    #[test]
    fn test_malformed_batch_rejected() {
        let flights = vec![flight("A", 0, 0)];
        assert!(RunwayScheduler::default().schedule(&flights).is_err());
    }

    #[test]
    fn test_runway_bounds() {
        assert_eq!(runway_bounds(&[]), (0, 0));

        let flights = rush_hour();
        let (lower, upper) = runway_bounds(&flights);
        assert_eq!(lower, 3); // FL001..FL003 all open at t=10min
        assert!(upper >= lower);

        let result = RunwayScheduler::default().schedule(&flights).unwrap();
        assert!(result.runway_count >= lower);
        assert!(result.runway_count <= upper);
    }
}
