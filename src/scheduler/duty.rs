//! Duty-compliant pilot assignment.
//!
//! # Algorithm
//!
//! 1. Sort flights chronologically (mandatory: eligibility depends on each
//!    pilot's running duty state, which is only meaningful in time order).
//! 2. For each flight, compute the eligible pilots — added duty within the
//!    period limit, rest gap since the last assignment covered.
//! 3. Select one eligible pilot per the configured strategy and record the
//!    assignment, mutating that pilot's duty state.
//!
//! A flight with no eligible pilot is reported unassigned and never
//! retried; there is no backtracking. The pool is passed by value and
//! handed back inside the result, so concurrent runs cannot share state.
//! Duty state already on the pool is honored, which is what lets the
//! multi-period wrapper carry rest pointers across days.
//!
//! # Complexity
//! O(n log n + n · p) where n = flights, p = pilots.

use std::collections::HashMap;
use std::str::FromStr;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::models::{DutyAssignment, Flight, Pilot};
use crate::validation::{
    validate_assignments, validate_duty_input, ValidationError, ValidationErrorKind,
};

/// Pilot-selection strategy applied to the eligible subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionStrategy {
    /// Fewest duty hours so far, ties by pilot id. Maximizes fairness;
    /// the default.
    #[default]
    LeastBusy,
    /// Most duty headroom left, ties by pilot id.
    MostAvailable,
    /// Cyclic pointer over the pool; skips ineligible pilots without
    /// resetting.
    RoundRobin,
}

impl FromStr for SelectionStrategy {
    type Err = ValidationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "least_busy" => Ok(Self::LeastBusy),
            "most_available" => Ok(Self::MostAvailable),
            "round_robin" => Ok(Self::RoundRobin),
            other => Err(ValidationError::new(
                ValidationErrorKind::UnknownStrategy,
                format!("Unknown selection strategy: {other}"),
            )),
        }
    }
}

/// Result of a duty-compliant assignment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyScheduleResult {
    /// Successful pilot-flight bindings.
    pub assignments: Vec<DutyAssignment>,
    /// Flights no pilot could legally take, in chronological order.
    pub unassigned: Vec<Flight>,
    /// Pilot id → fraction of the period duty limit consumed, for pilots
    /// with at least one assignment.
    pub utilization: HashMap<String, f64>,
    /// Assigned flights / total flights × 100.
    pub compliance_rate: f64,
    /// Pilots with at least one assignment.
    pub pilots_used: usize,
    /// Whether the self-check found no violations (always true for this
    /// scheduler's own output).
    pub is_valid: bool,
    /// Self-check violation descriptions.
    pub violations: Vec<String>,
    /// The pool after the run, duty state updated.
    pub pilots: Vec<Pilot>,
}

/// Duty- and rest-compliant pilot scheduler.
///
/// # Example
///
/// ```
/// use flight_sched::models::{DutyLimits, Flight, Pilot, HOUR_MS};
/// use flight_sched::scheduler::DutyScheduler;
///
/// let flights = vec![Flight::new("FL001", 0, 2 * HOUR_MS)];
/// let pool = Pilot::pool(2, DutyLimits::default());
/// let result = DutyScheduler::default().schedule(&flights, pool).unwrap();
/// assert_eq!(result.assignments.len(), 1);
/// assert!((result.compliance_rate - 100.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DutyScheduler {
    strategy: SelectionStrategy,
}

impl DutyScheduler {
    /// Creates a scheduler with the given selection strategy.
    pub fn new(strategy: SelectionStrategy) -> Self {
        Self { strategy }
    }

    /// Assigns pilots to flights under duty and rest constraints.
    ///
    /// # Errors
    /// Rejects malformed flight batches and an empty pool when there are
    /// flights to assign.
    pub fn schedule(
        &self,
        flights: &[Flight],
        mut pilots: Vec<Pilot>,
    ) -> Result<DutyScheduleResult, Vec<ValidationError>> {
        validate_duty_input(flights, &pilots)?;

        // Chronological sweep; equal starts keep input order
        let mut order: Vec<usize> = (0..flights.len()).collect();
        order.sort_by_key(|&i| flights[i].start_ms);

        let mut assignments = Vec::new();
        let mut unassigned = Vec::new();
        let mut cursor = 0usize;

        for idx in order {
            let flight = &flights[idx];
            let duration = flight.occupancy_ms;

            let selected = self.select(&pilots, flight.start_ms, duration, &mut cursor);
            match selected {
                Some(p) => {
                    let pilot = &mut pilots[p];
                    pilot.record(flight.id.clone(), flight.end_ms(), duration);
                    trace!("{} -> {}", pilot.id, flight.id);
                    assignments.push(
                        DutyAssignment::new(&pilot.id, &flight.id, flight.start_ms, flight.end_ms())
                            .with_day(flight.day),
                    );
                }
                None => {
                    trace!("no eligible pilot for {}", flight.id);
                    unassigned.push(flight.clone());
                }
            }
        }

        let compliance_rate = if flights.is_empty() {
            100.0
        } else {
            assignments.len() as f64 / flights.len() as f64 * 100.0
        };
        debug!(
            "assigned {}/{} flights across {} pilots ({:?})",
            assignments.len(),
            flights.len(),
            pilots.len(),
            self.strategy
        );

        let utilization: HashMap<String, f64> = pilots
            .iter()
            .filter(|p| p.has_assignments())
            .map(|p| (p.id.clone(), p.utilization()))
            .collect();
        let pilots_used = utilization.len();

        // Self-check with each pilot's own limits
        let mut violations = Vec::new();
        for pilot in &pilots {
            let own: Vec<DutyAssignment> = assignments
                .iter()
                .filter(|a| a.pilot_id == pilot.id)
                .cloned()
                .collect();
            violations.extend(validate_assignments(&own, &pilot.limits).violations);
        }

        Ok(DutyScheduleResult {
            assignments,
            unassigned,
            utilization,
            compliance_rate,
            pilots_used,
            is_valid: violations.is_empty(),
            violations,
            pilots,
        })
    }

    /// Picks an eligible pilot index per the strategy, or `None` when the
    /// eligible subset is empty.
    fn select(
        &self,
        pilots: &[Pilot],
        start_ms: i64,
        duration_ms: i64,
        cursor: &mut usize,
    ) -> Option<usize> {
        match self.strategy {
            SelectionStrategy::LeastBusy => (0..pilots.len())
                .filter(|&i| pilots[i].can_take(start_ms, duration_ms))
                .min_by_key(|&i| (pilots[i].duty_ms, &pilots[i].id)),
            SelectionStrategy::MostAvailable => (0..pilots.len())
                .filter(|&i| pilots[i].can_take(start_ms, duration_ms))
                .min_by_key(|&i| (std::cmp::Reverse(pilots[i].remaining_ms()), &pilots[i].id)),
            SelectionStrategy::RoundRobin => {
                for step in 0..pilots.len() {
                    let i = (*cursor + step) % pilots.len();
                    if pilots[i].can_take(start_ms, duration_ms) {
                        *cursor = (i + 1) % pilots.len();
                        return Some(i);
                    }
                }
                None
            }
        }
    }
}
