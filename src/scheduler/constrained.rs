//! Fixed-capacity runway scheduling with delays.
//!
//! # Algorithm
//!
//! 1. Order flights by the configured policy (higher score first).
//! 2. For each flight, probe delays of 0, 1, 2, … increments up to the
//!    ceiling; at each step scan every runway for a conflict-free slot at
//!    the delayed window and bind the first hit.
//! 3. If the ceiling is exhausted, force-place the flight on the runway
//!    whose occupied intervals clear soonest — after everything already
//!    there, so forced placements never overlap either.
//!
//! Every flight is always placed; heavy delay is reported, never dropped.
//! Each probe works on a fresh delayed copy of the flight, so retry loops
//! cannot leave half-shifted windows behind.
//!
//! # Complexity
//! O(n · r · d) where n = flights, r = runways, d = ceiling/increment.

use std::collections::BTreeMap;
use std::str::FromStr;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::models::{Flight, MINUTE_MS};
use crate::validation::{validate_flights, ValidationError, ValidationErrorKind};

/// Weights for the hybrid ordering policy. Must describe how much each
/// normalized attribute contributes; the defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridWeights {
    /// Weight of normalized priority.
    pub priority: f64,
    /// Weight of normalized passenger count.
    pub passengers: f64,
    /// Weight of normalized route distance.
    pub distance: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            priority: 0.40,
            passengers: 0.35,
            distance: 0.25,
        }
    }
}

/// Flight-ordering policy: which flights get first pick of the runways.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum OrderingPolicy {
    /// Priority value, higher first.
    #[default]
    Priority,
    /// Passenger count, higher first.
    PassengerFirst,
    /// Route distance, higher first.
    DistanceFirst,
    /// Weighted sum of min-max normalized priority, passengers, and
    /// distance (normalization is per batch).
    Hybrid(HybridWeights),
}

impl FromStr for OrderingPolicy {
    type Err = ValidationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "priority" | "priority_based" => Ok(Self::Priority),
            "passengers" | "passenger_first" => Ok(Self::PassengerFirst),
            "distance" | "distance_first" => Ok(Self::DistanceFirst),
            "hybrid" => Ok(Self::Hybrid(HybridWeights::default())),
            other => Err(ValidationError::new(
                ValidationErrorKind::UnknownStrategy,
                format!("Unknown ordering policy: {other}"),
            )),
        }
    }
}

/// Delay knobs for the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayPolicy {
    /// Step between successive delay probes (ms).
    pub increment_ms: i64,
    /// Largest probed delay (ms); beyond it the flight is force-placed.
    pub ceiling_ms: i64,
}

impl Default for DelayPolicy {
    /// 15-minute steps up to a 4-hour ceiling.
    fn default() -> Self {
        Self {
            increment_ms: 15 * MINUTE_MS,
            ceiling_ms: 240 * MINUTE_MS,
        }
    }
}

impl DelayPolicy {
    /// Creates a custom delay policy.
    pub fn new(increment_ms: i64, ceiling_ms: i64) -> Self {
        Self {
            increment_ms,
            ceiling_ms,
        }
    }
}

/// Result of a fixed-capacity run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstrainedResult {
    /// Flights with realized start times, delays, and runway indices,
    /// in processing order.
    pub flights: Vec<Flight>,
    /// Size of the runway pool.
    pub capacity: usize,
    /// IDs of flights that did not depart at their requested time.
    pub delayed: Vec<String>,
    /// Sum of realized delays (ms).
    pub total_delay_ms: i64,
    /// Fraction of flights with zero delay.
    pub on_time_ratio: f64,
}

impl ConstrainedResult {
    /// Groups flights by runway, each group sorted by realized start time.
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

    /// Mean delay over the delayed flights (ms). Zero when none.
    pub fn avg_delay_ms(&self) -> f64 {
        if self.delayed.is_empty() {
            return 0.0;
        }
        self.total_delay_ms as f64 / self.delayed.len() as f64
    }

    /// Largest single delay (ms).
    pub fn max_delay_ms(&self) -> i64 {
        self.flights.iter().map(|f| f.delay_ms).max().unwrap_or(0)
    }
}

/// Runway scheduler with a fixed pool size.
///
/// # Example
///
/// ```
/// use flight_sched::models::{Flight, MINUTE_MS};
/// use flight_sched::scheduler::ConstrainedScheduler;
///
/// let flights = vec![
///     Flight::new("A", 0, 15 * MINUTE_MS),
///     Flight::new("B", 0, 15 * MINUTE_MS),
/// ];
/// let result = ConstrainedScheduler::new(1).schedule(&flights).unwrap();
/// assert_eq!(result.delayed.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ConstrainedScheduler {
    capacity: usize,
    policy: OrderingPolicy,
    delay: DelayPolicy,
}

impl ConstrainedScheduler {
    /// Creates a scheduler over `capacity` runways with default policy
    /// and delay knobs.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policy: OrderingPolicy::default(),
            delay: DelayPolicy::default(),
        }
    }

    /// Sets the ordering policy.
    pub fn with_policy(mut self, policy: OrderingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the delay knobs.
    pub fn with_delay_policy(mut self, delay: DelayPolicy) -> Self {
        self.delay = delay;
        self
    }

    /// Schedules the batch onto the fixed pool, delaying where needed.
    ///
    /// # Errors
    /// Rejects malformed batches and a zero-sized pool (when there is
    /// anything to place).
    pub fn schedule(&self, flights: &[Flight]) -> Result<ConstrainedResult, Vec<ValidationError>> {
        validate_flights(flights)?;
        if self.capacity == 0 && !flights.is_empty() {
            return Err(vec![ValidationError::new(
                ValidationErrorKind::EmptyResourcePool,
                "Cannot schedule onto zero runways",
            )]);
        }
        if self.delay.increment_ms <= 0 {
            return Err(vec![ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!(
                    "Delay increment must be positive: {}ms",
                    self.delay.increment_ms
                ),
            )]);
        }

        let order = self.processing_order(flights);

        // Realized occupancy per runway
        let mut occupied: Vec<Vec<(i64, i64)>> = vec![Vec::new(); self.capacity];
        let mut placed: Vec<Flight> = Vec::with_capacity(flights.len());
        let mut delayed: Vec<String> = Vec::new();
        let mut total_delay_ms = 0;

        for idx in order {
            let mut base = flights[idx].clone();
            base.runway = None;
            base.delay_ms = 0;

            let flight = match self.probe_slots(&base, &occupied) {
                Some(flight) => flight,
                None => self.force_place(&base, &occupied),
            };

            let runway = flight.runway.unwrap_or(0);
            occupied[runway].push((flight.start_ms, flight.end_ms()));
            if flight.delay_ms > 0 {
                trace!("{} delayed {}min", flight.id, flight.delay_ms / MINUTE_MS);
                delayed.push(flight.id.clone());
                total_delay_ms += flight.delay_ms;
            }
            placed.push(flight);
        }

        let on_time = placed.len() - delayed.len();
        let on_time_ratio = if placed.is_empty() {
            1.0
        } else {
            on_time as f64 / placed.len() as f64
        };
        debug!(
            "placed {} flights on {} runways: {} on time, {}min total delay",
            placed.len(),
            self.capacity,
            on_time,
            total_delay_ms / MINUTE_MS
        );

        Ok(ConstrainedResult {
            flights: placed,
            capacity: self.capacity,
            delayed,
            total_delay_ms,
            on_time_ratio,
        })
    }

    /// Indices sorted by descending policy score; ties go to the earlier
    /// start, then to input order.
    fn processing_order(&self, flights: &[Flight]) -> Vec<usize> {
        let scores = self.scores(flights);
        let mut order: Vec<usize> = (0..flights.len()).collect();
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| flights[a].start_ms.cmp(&flights[b].start_ms))
                .then_with(|| a.cmp(&b))
        });
        order
    }

    fn scores(&self, flights: &[Flight]) -> Vec<f64> {
        match self.policy {
            OrderingPolicy::Priority => flights.iter().map(|f| f.priority as f64).collect(),
            OrderingPolicy::PassengerFirst => {
                flights.iter().map(|f| f.passengers as f64).collect()
            }
            OrderingPolicy::DistanceFirst => flights.iter().map(|f| f.distance_km).collect(),
            OrderingPolicy::Hybrid(weights) => {
                let priority = Scale::over(flights.iter().map(|f| f.priority as f64));
                let passengers = Scale::over(flights.iter().map(|f| f.passengers as f64));
                let distance = Scale::over(flights.iter().map(|f| f.distance_km));
                flights
                    .iter()
                    .map(|f| {
                        weights.priority * priority.normalize(f.priority as f64)
                            + weights.passengers * passengers.normalize(f.passengers as f64)
                            + weights.distance * distance.normalize(f.distance_km)
                    })
                    .collect()
            }
        }
    }

    /// Probes delays of 0..=ceiling in increment steps and returns the
    /// first conflict-free placement, or `None` when the ceiling is
    /// exhausted.
    fn probe_slots(&self, base: &Flight, occupied: &[Vec<(i64, i64)>]) -> Option<Flight> {
        let mut delay = 0;
        while delay <= self.delay.ceiling_ms {
            let candidate = base.delayed_by(delay);
            for (runway, intervals) in occupied.iter().enumerate() {
                if !conflicts(&candidate, intervals) {
                    let mut placed = candidate;
                    placed.runway = Some(runway);
                    return Some(placed);
                }
            }
            delay += self.delay.increment_ms;
        }
        None
    }

    /// Places a ceiling-exhausted flight after the runway whose occupancy
    /// clears soonest (ties to the lowest index). Never overlaps.
    fn force_place(&self, base: &Flight, occupied: &[Vec<(i64, i64)>]) -> Flight {
        let mut best_runway = 0;
        let mut best_clear = i64::MAX;

        for (runway, intervals) in occupied.iter().enumerate() {
            let clear = intervals
                .iter()
                .filter(|&&(_, end)| end > base.start_ms)
                .map(|&(_, end)| end)
                .max()
                .unwrap_or(base.start_ms);
            if clear < best_clear {
                best_clear = clear;
                best_runway = runway;
            }
        }

        let mut placed = base.delayed_by(best_clear.max(base.start_ms) - base.start_ms);
        placed.runway = Some(best_runway);
        placed
    }
}

/// Per-run min-max scaling.
struct Scale {
    min: f64,
    max: f64,
}

impl Scale {
    fn over(values: impl Iterator<Item = f64>) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            min = min.min(v);
            max = max.max(v);
        }
        Self { min, max }
    }

    fn normalize(&self, value: f64) -> f64 {
        if self.max > self.min {
            (value - self.min) / (self.max - self.min)
        } else {
            0.5
        }
    }
}

fn conflicts(flight: &Flight, intervals: &[(i64, i64)]) -> bool {
    intervals
        .iter()
        .any(|&(start, end)| flight.start_ms < end && start < flight.end_ms())
}
