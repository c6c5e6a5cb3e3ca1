//! Input validation and independent compliance checking.
//!
//! Two concerns live here. Input validation checks structural integrity of
//! a scheduling request before any scheduler runs — a malformed request is
//! rejected whole, nothing is silently skipped. Compliance validation
//! re-derives duty and rest constraints from a finished assignment list,
//! independent of the scheduler that produced it, so externally constructed
//! or hand-edited schedules can be checked too.
//!
//! Infeasible placements are never reported here: an unassigned or delayed
//! flight is a normal scheduler outcome, not an error.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{DutyAssignment, DutyLimits, Flight, Pilot, HOUR_MS};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A flight's occupancy duration is zero or negative.
    NonPositiveDuration,
    /// A flight's priority is outside 1..=10.
    PriorityOutOfRange,
    /// Two entities share the same ID.
    DuplicateId,
    /// Assignment was requested against an empty resource pool.
    EmptyResourcePool,
    /// A selector name did not match any known strategy.
    UnknownStrategy,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a flight batch.
///
/// Checks:
/// 1. Every occupancy duration is positive (the end instant is derived, so
///    this is the only way a window can degenerate).
/// 2. Every priority is within 1..=10.
/// 3. No duplicate flight IDs.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_flights(flights: &[Flight]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for flight in flights {
        if flight.occupancy_ms <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!(
                    "Flight '{}' has non-positive occupancy: {}ms",
                    flight.id, flight.occupancy_ms
                ),
            ));
        }

        if !(1..=10).contains(&flight.priority) {
            errors.push(ValidationError::new(
                ValidationErrorKind::PriorityOutOfRange,
                format!(
                    "Flight '{}' priority {} outside 1..=10",
                    flight.id, flight.priority
                ),
            ));
        }

        if !seen.insert(flight.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate flight ID: {}", flight.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a duty-scheduling request: the flight batch plus its pilot pool.
///
/// On top of [`validate_flights`], rejects an empty pool when there are
/// flights to assign, and duplicate pilot IDs.
pub fn validate_duty_input(flights: &[Flight], pilots: &[Pilot]) -> ValidationResult {
    let mut errors = match validate_flights(flights) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };

    if pilots.is_empty() && !flights.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyResourcePool,
            "Cannot assign pilots from an empty pool",
        ));
    }

    let mut seen = HashSet::new();
    for pilot in pilots {
        if !seen.insert(pilot.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate pilot ID: {}", pilot.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Outcome of a compliance check.
///
/// Violations are a documented outcome, not an error: a report with
/// `is_valid == false` describes a breach of duty or conflict rules in an
/// otherwise well-formed schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Whether no violations were found.
    pub is_valid: bool,
    /// Human-readable violation descriptions.
    pub violations: Vec<String>,
}

impl ComplianceReport {
    fn from_violations(violations: Vec<String>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            violations,
        }
    }
}

fn hours(ms: i64) -> f64 {
    ms as f64 / HOUR_MS as f64
}

/// Re-checks a finished pilot assignment list against duty and rest limits.
///
/// Independently re-derives, per pilot, the cumulative duty per accounting
/// period and the rest gaps between consecutive assignments sorted by start
/// instant. Uses the same two predicates as the duty scheduler's
/// eligibility test, so a scheduler's own output always validates clean.
/// Rest gaps are checked across period boundaries; duty sums are not.
pub fn validate_assignments(
    assignments: &[DutyAssignment],
    limits: &DutyLimits,
) -> ComplianceReport {
    let mut by_pilot: HashMap<&str, Vec<&DutyAssignment>> = HashMap::new();
    for assignment in assignments {
        by_pilot
            .entry(assignment.pilot_id.as_str())
            .or_default()
            .push(assignment);
    }

    let mut pilot_ids: Vec<&str> = by_pilot.keys().copied().collect();
    pilot_ids.sort_unstable();

    let mut violations = Vec::new();

    for pilot_id in pilot_ids {
        let mut own = by_pilot.remove(pilot_id).unwrap_or_default();
        own.sort_by_key(|a| a.start_ms);

        // Duty sums, per accounting period
        let mut duty_by_day: HashMap<Option<u32>, i64> = HashMap::new();
        for a in &own {
            *duty_by_day.entry(a.day).or_insert(0) += a.duration_ms();
        }
        let mut days: Vec<Option<u32>> = duty_by_day.keys().copied().collect();
        days.sort_unstable();
        for day in days {
            let total = duty_by_day[&day];
            if total > limits.max_duty_ms {
                let scope = match day {
                    Some(d) => format!(" on day {d}"),
                    None => String::new(),
                };
                violations.push(format!(
                    "Pilot {pilot_id} exceeds max duty{scope}: {:.1}h > {:.1}h",
                    hours(total),
                    hours(limits.max_duty_ms)
                ));
            }
        }

        // Rest gaps, across the whole horizon
        for pair in own.windows(2) {
            let gap = pair[1].start_ms - pair[0].end_ms;
            if gap < limits.min_rest_ms {
                violations.push(format!(
                    "Pilot {pilot_id}: insufficient rest between {} and {}: {:.1}h < {:.1}h",
                    pair[0].flight_id,
                    pair[1].flight_id,
                    hours(gap),
                    hours(limits.min_rest_ms)
                ));
            }
        }
    }

    ComplianceReport::from_violations(violations)
}

/// Re-checks a runway schedule for same-runway conflicts at realized times.
///
/// Flights without a runway assignment are ignored.
pub fn validate_runways(flights: &[Flight]) -> ComplianceReport {
    let mut violations = Vec::new();

    for i in 0..flights.len() {
        for j in (i + 1)..flights.len() {
            let (a, b) = (&flights[i], &flights[j]);
            if let (Some(ra), Some(rb)) = (a.runway, b.runway) {
                if ra == rb && a.overlaps(b) {
                    violations.push(format!(
                        "Conflict: {} and {} both assigned to runway {ra}",
                        a.id, b.id
                    ));
                }
            }
        }
    }

    ComplianceReport::from_violations(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MINUTE_MS;

    #[test]
    fn test_valid_flight_batch() {
        let flights = vec![
            Flight::new("A", 0, 15 * MINUTE_MS),
            Flight::new("B", 10 * MINUTE_MS, 15 * MINUTE_MS),
        ];
        assert!(validate_flights(&flights).is_ok());
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        let flights = vec![Flight::new("A", 0, 0)];
        let errors = validate_flights(&flights).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveDuration));
    }

    #[test]
    fn test_priority_out_of_range_rejected() {
        let flights = vec![Flight::new("A", 0, MINUTE_MS).with_priority(11)];
        let errors = validate_flights(&flights).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::PriorityOutOfRange));
    }

    #[test]
    fn test_duplicate_flight_id_rejected() {
        let flights = vec![
            Flight::new("A", 0, MINUTE_MS),
            Flight::new("A", 5 * MINUTE_MS, MINUTE_MS),
        ];
        let errors = validate_flights(&flights).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let flights = vec![
            Flight::new("A", 0, -1),
            Flight::new("A", 0, MINUTE_MS).with_priority(0),
        ];
        let errors = validate_flights(&flights).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_empty_pool_rejected_when_flights_present() {
        let flights = vec![Flight::new("A", 0, MINUTE_MS)];
        let errors = validate_duty_input(&flights, &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyResourcePool));
    }

    #[test]
    fn test_empty_pool_fine_without_flights() {
        assert!(validate_duty_input(&[], &[]).is_ok());
    }

    #[test]
    fn test_duplicate_pilot_id_rejected() {
        let flights = vec![Flight::new("A", 0, MINUTE_MS)];
        let pilots = vec![Pilot::new("P001"), Pilot::new("P001")];
        let errors = validate_duty_input(&flights, &pilots).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("pilot")));
    }

    #[test]
    fn test_clean_assignments_validate() {
        let limits = DutyLimits::default();
        let assignments = vec![
            DutyAssignment::new("P001", "FL001", 0, 2 * HOUR_MS),
            DutyAssignment::new("P001", "FL002", 12 * HOUR_MS, 14 * HOUR_MS),
        ];
        let report = validate_assignments(&assignments, &limits);
        assert!(report.is_valid);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn test_duty_breach_detected() {
        let limits = DutyLimits::default();
        // 9h on one day for one pilot, rest gap fine
        let assignments = vec![
            DutyAssignment::new("P001", "FL001", 0, 5 * HOUR_MS),
            DutyAssignment::new("P001", "FL002", 15 * HOUR_MS, 19 * HOUR_MS),
        ];
        let report = validate_assignments(&assignments, &limits);
        assert!(!report.is_valid);
        assert!(report.violations[0].contains("max duty"));
    }

    #[test]
    fn test_rest_breach_detected() {
        let limits = DutyLimits::default();
        let assignments = vec![
            DutyAssignment::new("P001", "FL001", 0, 2 * HOUR_MS),
            DutyAssignment::new("P001", "FL002", 5 * HOUR_MS, 7 * HOUR_MS),
        ];
        let report = validate_assignments(&assignments, &limits);
        assert!(!report.is_valid);
        assert!(report.violations[0].contains("insufficient rest"));
    }

    #[test]
    fn test_rest_checked_across_day_boundary() {
        let limits = DutyLimits::default();
        // Duty resets per day, but only 4h of rest across the boundary
        let assignments = vec![
            DutyAssignment::new("P001", "FL001", 18 * HOUR_MS, 22 * HOUR_MS).with_day(Some(0)),
            DutyAssignment::new("P001", "FL002", 26 * HOUR_MS, 28 * HOUR_MS).with_day(Some(1)),
        ];
        let report = validate_assignments(&assignments, &limits);
        assert!(!report.is_valid);
        assert!(report.violations[0].contains("insufficient rest"));
    }

    #[test]
    fn test_duty_sums_reset_per_day() {
        let limits = DutyLimits::new(8 * HOUR_MS, HOUR_MS);
        // 6h each day: over the limit if summed, fine per period
        let assignments = vec![
            DutyAssignment::new("P001", "FL001", 0, 6 * HOUR_MS).with_day(Some(0)),
            DutyAssignment::new("P001", "FL002", 24 * HOUR_MS, 30 * HOUR_MS).with_day(Some(1)),
        ];
        let report = validate_assignments(&assignments, &limits);
        assert!(report.is_valid);
    }

    #[test]
    fn test_violations_cover_multiple_pilots() {
        let limits = DutyLimits::default();
        let assignments = vec![
            DutyAssignment::new("P001", "FL001", 0, 9 * HOUR_MS),
            DutyAssignment::new("P002", "FL002", 0, 2 * HOUR_MS),
            DutyAssignment::new("P002", "FL003", 3 * HOUR_MS, 5 * HOUR_MS),
        ];
        let report = validate_assignments(&assignments, &limits);
        assert_eq!(report.violations.len(), 2);
    }

    #[test]
    fn test_runway_conflict_detected() {
        let mut a = Flight::new("A", 0, 15 * MINUTE_MS);
        let mut b = Flight::new("B", 10 * MINUTE_MS, 15 * MINUTE_MS);
        a.runway = Some(0);
        b.runway = Some(0);

        let report = validate_runways(&[a, b]);
        assert!(!report.is_valid);
        assert!(report.violations[0].contains("runway 0"));
    }

    #[test]
    fn test_runway_separation_is_clean() {
        let mut a = Flight::new("A", 0, 15 * MINUTE_MS);
        let mut b = Flight::new("B", 10 * MINUTE_MS, 15 * MINUTE_MS);
        a.runway = Some(0);
        b.runway = Some(1);

        assert!(validate_runways(&[a, b]).is_valid);
    }

    #[test]
    fn test_unassigned_flights_ignored_by_runway_check() {
        let a = Flight::new("A", 0, 15 * MINUTE_MS);
        let b = Flight::new("B", 10 * MINUTE_MS, 15 * MINUTE_MS);
        assert!(validate_runways(&[a, b]).is_valid);
    }
}
