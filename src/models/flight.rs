//! Flight (task) model.
//!
//! A flight is the unit of work to be scheduled: it occupies one scarce
//! resource (a runway, a pilot) for a contiguous time window. The overlap
//! predicate defined here is the single conflict test shared by every
//! scheduler in the crate.
//!
//! # Time Representation
//! All times are in milliseconds relative to a scheduling epoch (t=0).
//! The consumer defines what t=0 means (e.g., start of the operating day,
//! midnight UTC).

use serde::{Deserialize, Serialize};

/// Milliseconds per minute.
pub const MINUTE_MS: i64 = 60 * 1000;

/// Milliseconds per hour.
pub const HOUR_MS: i64 = 60 * MINUTE_MS;

/// A flight to be scheduled.
///
/// Occupies the half-open window `[start_ms, end_ms())`. The end instant is
/// always derived from start and occupancy, so delaying a flight can never
/// leave a stale window behind.
///
/// # Priority Convention
/// `priority` is bounded 1..=10 and higher means more urgent: schedulers
/// that order by priority process larger values first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    /// Unique flight identifier.
    pub id: String,
    /// Origin airport code (opaque label, not resolved here).
    pub origin: String,
    /// Destination airport code (opaque label).
    pub destination: String,
    /// Scheduled start of occupancy (ms).
    pub start_ms: i64,
    /// Time needed to land and clear the runway (ms). Must be positive.
    pub occupancy_ms: i64,
    /// Urgency, 1..=10 (higher = more urgent).
    pub priority: i32,
    /// Passenger count. Weighting input for capacity-constrained ordering.
    pub passengers: u32,
    /// Route length in kilometres. Weighting input.
    pub distance_km: f64,
    /// Assigned runway index (0-based). `None` until scheduled.
    pub runway: Option<usize>,
    /// Delay accumulated against the originally requested start (ms).
    pub delay_ms: i64,
    /// Operating-day tag for multi-day runs.
    pub day: Option<u32>,
}

impl Flight {
    /// Creates a new flight occupying `[start_ms, start_ms + occupancy_ms)`.
    pub fn new(id: impl Into<String>, start_ms: i64, occupancy_ms: i64) -> Self {
        Self {
            id: id.into(),
            origin: String::new(),
            destination: String::new(),
            start_ms,
            occupancy_ms,
            priority: 5,
            passengers: 0,
            distance_km: 0.0,
            runway: None,
            delay_ms: 0,
            day: None,
        }
    }

    /// Sets the origin and destination labels.
    pub fn with_route(mut self, origin: impl Into<String>, destination: impl Into<String>) -> Self {
        self.origin = origin.into();
        self.destination = destination.into();
        self
    }

    /// Sets the priority (1..=10, higher = more urgent).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the passenger count.
    pub fn with_passengers(mut self, passengers: u32) -> Self {
        self.passengers = passengers;
        self
    }

    /// Sets the route length in kilometres.
    pub fn with_distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = distance_km;
        self
    }

    /// Tags the flight with an operating day.
    pub fn with_day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    /// End of occupancy (ms). Always `start_ms + occupancy_ms`.
    #[inline]
    pub fn end_ms(&self) -> i64 {
        self.start_ms + self.occupancy_ms
    }

    /// Whether the occupancy windows of two flights intersect.
    ///
    /// Half-open interval semantics: `[a, b)` and `[c, d)` overlap iff
    /// `a < d && c < b`. Touching boundaries (one ends exactly when the
    /// other starts) do not conflict.
    #[inline]
    pub fn overlaps(&self, other: &Flight) -> bool {
        self.start_ms < other.end_ms() && other.start_ms < self.end_ms()
    }

    /// Overlap length with another flight (ms). Zero when disjoint.
    pub fn overlap_ms(&self, other: &Flight) -> i64 {
        if !self.overlaps(other) {
            return 0;
        }
        self.end_ms().min(other.end_ms()) - self.start_ms.max(other.start_ms)
    }

    /// Returns a copy of this flight pushed `extra_ms` further into the
    /// future, with the delay accumulated.
    ///
    /// The original value is untouched; retry loops thread the returned
    /// flight through successive attempts instead of mutating in place.
    pub fn delayed_by(&self, extra_ms: i64) -> Self {
        let mut delayed = self.clone();
        delayed.start_ms += extra_ms;
        delayed.delay_ms += extra_ms;
        delayed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_builder() {
        let f = Flight::new("FL001", 0, 15 * MINUTE_MS)
            .with_route("JFK", "LHR")
            .with_priority(8)
            .with_passengers(320)
            .with_distance_km(5540.0)
            .with_day(2);

        assert_eq!(f.id, "FL001");
        assert_eq!(f.origin, "JFK");
        assert_eq!(f.destination, "LHR");
        assert_eq!(f.priority, 8);
        assert_eq!(f.passengers, 320);
        assert_eq!(f.day, Some(2));
        assert_eq!(f.runway, None);
        assert_eq!(f.delay_ms, 0);
    }

    #[test]
    fn test_end_is_derived() {
        let f = Flight::new("FL001", 10 * MINUTE_MS, 15 * MINUTE_MS);
        assert_eq!(f.end_ms(), 25 * MINUTE_MS);
    }

    #[test]
    fn test_overlap_basic() {
        let a = Flight::new("A", 0, 15 * MINUTE_MS);
        let b = Flight::new("B", 10 * MINUTE_MS, 15 * MINUTE_MS);
        let c = Flight::new("C", 40 * MINUTE_MS, 15 * MINUTE_MS);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_windows_do_not_overlap() {
        let a = Flight::new("A", 0, 15 * MINUTE_MS);
        let b = Flight::new("B", 15 * MINUTE_MS, 15 * MINUTE_MS);

        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert_eq!(a.overlap_ms(&b), 0);
    }

    #[test]
    fn test_overlap_duration() {
        let a = Flight::new("A", 0, 15 * MINUTE_MS);
        let b = Flight::new("B", 10 * MINUTE_MS, 15 * MINUTE_MS);

        assert_eq!(a.overlap_ms(&b), 5 * MINUTE_MS);
        assert_eq!(b.overlap_ms(&a), 5 * MINUTE_MS);
    }

    #[test]
    fn test_containment_overlap() {
        let outer = Flight::new("outer", 0, 60 * MINUTE_MS);
        let inner = Flight::new("inner", 20 * MINUTE_MS, 10 * MINUTE_MS);

        assert!(outer.overlaps(&inner));
        assert_eq!(outer.overlap_ms(&inner), 10 * MINUTE_MS);
    }

    #[test]
    fn test_delayed_by_accumulates() {
        let f = Flight::new("FL001", 0, 15 * MINUTE_MS);
        let once = f.delayed_by(15 * MINUTE_MS);
        let twice = once.delayed_by(15 * MINUTE_MS);

        // Original untouched
        assert_eq!(f.start_ms, 0);
        assert_eq!(f.delay_ms, 0);

        assert_eq!(once.start_ms, 15 * MINUTE_MS);
        assert_eq!(once.delay_ms, 15 * MINUTE_MS);
        assert_eq!(twice.start_ms, 30 * MINUTE_MS);
        assert_eq!(twice.delay_ms, 30 * MINUTE_MS);
        // End window follows the shifted start
        assert_eq!(twice.end_ms(), 45 * MINUTE_MS);
    }

    #[test]
    fn test_serde_round_trip() {
        let f = Flight::new("FL001", 0, 15 * MINUTE_MS).with_route("JFK", "LHR");
        let json = serde_json::to_string(&f).unwrap();
        let back: Flight = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "FL001");
        assert_eq!(back.end_ms(), f.end_ms());
    }
}
