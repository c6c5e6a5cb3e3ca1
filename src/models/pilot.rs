//! Pilot (human resource) model.
//!
//! Pilots carry regulatory duty-time state: cumulative on-duty time in the
//! current accounting period and the end of their last assignment. The two
//! eligibility predicates defined here (`can_take`) are the same ones the
//! compliance validator re-derives, so a scheduler's own output always
//! validates clean.

use serde::{Deserialize, Serialize};

use super::flight::HOUR_MS;

/// Duty-time limits over one accounting period (an operating day).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DutyLimits {
    /// Maximum cumulative on-duty time per period (ms).
    pub max_duty_ms: i64,
    /// Minimum rest between the end of one assignment and the start of the
    /// next (ms). Spans period boundaries.
    pub min_rest_ms: i64,
}

impl Default for DutyLimits {
    /// FAA-style defaults: 8 hours of duty per day, 10 hours of rest.
    fn default() -> Self {
        Self {
            max_duty_ms: 8 * HOUR_MS,
            min_rest_ms: 10 * HOUR_MS,
        }
    }
}

impl DutyLimits {
    /// Creates custom limits.
    pub fn new(max_duty_ms: i64, min_rest_ms: i64) -> Self {
        Self {
            max_duty_ms,
            min_rest_ms,
        }
    }
}

/// A pilot available for flight assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pilot {
    /// Unique pilot identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Certification tag (e.g., "ATP", "Commercial").
    pub certification: String,
    /// Configured duty/rest limits.
    pub limits: DutyLimits,
    /// IDs of flights assigned in the current run.
    pub assigned_flights: Vec<String>,
    /// End instant of the last assignment (ms). Carries across periods.
    pub last_duty_end_ms: Option<i64>,
    /// Cumulative on-duty time in the current period (ms).
    pub duty_ms: i64,
}

impl Pilot {
    /// Creates a pilot with default limits and no duty history.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            certification: "ATP".to_string(),
            limits: DutyLimits::default(),
            assigned_flights: Vec::new(),
            last_duty_end_ms: None,
            duty_ms: 0,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the certification tag.
    pub fn with_certification(mut self, certification: impl Into<String>) -> Self {
        self.certification = certification.into();
        self
    }

    /// Sets the duty/rest limits.
    pub fn with_limits(mut self, limits: DutyLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Generates a pool of `count` pilots with sequential ids, sized by the
    /// caller. All pilots share the given limits.
    pub fn pool(count: usize, limits: DutyLimits) -> Vec<Pilot> {
        const SURNAMES: [&str; 20] = [
            "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
            "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson",
            "Thomas", "Taylor", "Moore", "Jackson", "Martin",
        ];

        (0..count)
            .map(|i| {
                let mut name = format!("Capt. {}", SURNAMES[i % SURNAMES.len()]);
                if i >= SURNAMES.len() {
                    name.push_str(&format!(" {}", i / SURNAMES.len() + 1));
                }
                Pilot::new(format!("P{:03}", i + 1))
                    .with_name(name)
                    .with_limits(limits)
            })
            .collect()
    }

    /// Whether this pilot can take a flight starting at `start_ms` and
    /// lasting `duration_ms` without breaching either limit.
    ///
    /// Two predicates: the added duty must fit the period limit, and the
    /// gap since the last assignment end must cover the rest minimum.
    /// A pilot with no prior assignment is always rest-eligible.
    pub fn can_take(&self, start_ms: i64, duration_ms: i64) -> bool {
        if self.duty_ms + duration_ms > self.limits.max_duty_ms {
            return false;
        }
        match self.last_duty_end_ms {
            None => true,
            Some(last_end) => start_ms - last_end >= self.limits.min_rest_ms,
        }
    }

    /// Records a successful assignment, updating duty state in place.
    pub fn record(&mut self, flight_id: impl Into<String>, end_ms: i64, duration_ms: i64) {
        self.assigned_flights.push(flight_id.into());
        self.last_duty_end_ms = Some(end_ms);
        self.duty_ms += duration_ms;
    }

    /// Duty time still available in the current period (ms), floored at zero.
    pub fn remaining_ms(&self) -> i64 {
        (self.limits.max_duty_ms - self.duty_ms).max(0)
    }

    /// Earliest instant this pilot is rest-eligible again, or `None` if
    /// immediately available.
    pub fn rest_available_at(&self) -> Option<i64> {
        self.last_duty_end_ms
            .map(|end| end + self.limits.min_rest_ms)
    }

    /// Fraction of the period duty limit consumed (0.0..1.0+).
    pub fn utilization(&self) -> f64 {
        if self.limits.max_duty_ms <= 0 {
            return 0.0;
        }
        self.duty_ms as f64 / self.limits.max_duty_ms as f64
    }

    /// Whether this pilot has at least one assignment in the current run.
    pub fn has_assignments(&self) -> bool {
        !self.assigned_flights.is_empty()
    }

    /// Starts a new accounting period: the duty counter resets, the rest
    /// pointer carries over unmodified.
    pub fn reset_period(&mut self) {
        self.duty_ms = 0;
    }

    /// Clears all duty state for a fresh run.
    pub fn reset_all(&mut self) {
        self.duty_ms = 0;
        self.last_duty_end_ms = None;
        self.assigned_flights.clear();
    }
}
