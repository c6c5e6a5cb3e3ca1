//! Multi-day duty scheduling.
//!
//! Wraps the single-period duty scheduler per operating day. At each day
//! boundary every pilot's duty counter resets, but the rest pointer carries
//! over unmodified: duty-hour limits are per day, rest requirements span
//! days. A pilot landing late on day 0 is still resting at the start of
//! day 1.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::models::{DutyAssignment, Flight, Pilot};
use crate::scheduler::duty::{DutyScheduleResult, DutyScheduler, SelectionStrategy};
use crate::validation::{validate_assignments, validate_duty_input, ValidationError};

/// Aggregated result of a multi-day run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiPeriodResult {
    /// Day index → that day's single-period result.
    pub periods: BTreeMap<u32, DutyScheduleResult>,
    /// All assignments across days, in scheduling order.
    pub assignments: Vec<DutyAssignment>,
    /// All unassigned flights across days.
    pub unassigned: Vec<Flight>,
    /// Assigned flights / total flights × 100, across the whole horizon
    /// (equivalently: per-day compliance weighted by day flight count).
    pub overall_compliance_rate: f64,
    /// Pilots with at least one assignment on any day.
    pub pilots_used: usize,
    /// Whether the cross-day self-check found no violations.
    pub is_valid: bool,
    /// Self-check violations across all days (duty sums per day, rest gaps
    /// across day boundaries).
    pub violations: Vec<String>,
    /// The pool after the final day.
    pub pilots: Vec<Pilot>,
}

/// Day-partitioned duty scheduler.
///
/// Flights without a day tag are treated as day 0.
#[derive(Debug, Clone, Default)]
pub struct MultiPeriodScheduler {
    strategy: SelectionStrategy,
}

impl MultiPeriodScheduler {
    /// Creates a scheduler with the given per-day selection strategy.
    pub fn new(strategy: SelectionStrategy) -> Self {
        Self { strategy }
    }

    /// Schedules a day-tagged batch, resetting duty counters at each day
    /// boundary while rest pointers carry over.
    ///
    /// # Errors
    /// Rejects malformed batches and an empty pool when there are flights
    /// to assign.
    pub fn schedule(
        &self,
        flights: &[Flight],
        mut pilots: Vec<Pilot>,
    ) -> Result<MultiPeriodResult, Vec<ValidationError>> {
        validate_duty_input(flights, &pilots)?;

        let mut by_day: BTreeMap<u32, Vec<Flight>> = BTreeMap::new();
        for flight in flights {
            by_day
                .entry(flight.day.unwrap_or(0))
                .or_default()
                .push(flight.clone());
        }

        let scheduler = DutyScheduler::new(self.strategy);
        let mut periods: BTreeMap<u32, DutyScheduleResult> = BTreeMap::new();
        let mut assignments = Vec::new();
        let mut unassigned = Vec::new();

        for (day, day_flights) in by_day {
            for pilot in &mut pilots {
                pilot.reset_period();
            }

            let result = scheduler.schedule(&day_flights, pilots)?;
            debug!(
                "day {day}: {}/{} assigned",
                result.assignments.len(),
                day_flights.len()
            );

            pilots = result.pilots.clone();
            assignments.extend(result.assignments.iter().cloned());
            unassigned.extend(result.unassigned.iter().cloned());
            periods.insert(day, result);
        }

        let overall_compliance_rate = if flights.is_empty() {
            100.0
        } else {
            assignments.len() as f64 / flights.len() as f64 * 100.0
        };
        let pilots_used = pilots.iter().filter(|p| p.has_assignments()).count();

        // Cross-day self-check: duty sums group by day tag, rest gaps run
        // across the whole horizon
        let mut violations = Vec::new();
        for pilot in &pilots {
            let own: Vec<DutyAssignment> = assignments
                .iter()
                .filter(|a| a.pilot_id == pilot.id)
                .cloned()
                .collect();
            violations.extend(validate_assignments(&own, &pilot.limits).violations);
        }

        Ok(MultiPeriodResult {
            periods,
            assignments,
            unassigned,
            overall_compliance_rate,
            pilots_used,
            is_valid: violations.is_empty(),
            violations,
            pilots,
        })
    }
}
