//! Pilot-flight assignment record.

use serde::{Deserialize, Serialize};

/// A binding of one pilot to one flight.
///
/// The flight's window is copied at binding time, not referenced, so later
/// mutation of the flight list cannot corrupt historical assignments or the
/// rest-gap computations derived from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyAssignment {
    /// Assigned pilot ID.
    pub pilot_id: String,
    /// Assigned flight ID.
    pub flight_id: String,
    /// Scheduler clock when the binding was made (ms).
    pub assigned_at_ms: i64,
    /// Copied flight start (ms).
    pub start_ms: i64,
    /// Copied flight end (ms).
    pub end_ms: i64,
    /// Operating-day tag, when scheduled in a multi-day run.
    pub day: Option<u32>,
}

impl DutyAssignment {
    /// Creates a new assignment covering `[start_ms, end_ms)`.
    pub fn new(
        pilot_id: impl Into<String>,
        flight_id: impl Into<String>,
        start_ms: i64,
        end_ms: i64,
    ) -> Self {
        Self {
            pilot_id: pilot_id.into(),
            flight_id: flight_id.into(),
            assigned_at_ms: start_ms,
            start_ms,
            end_ms,
            day: None,
        }
    }

    /// Tags the assignment with an operating day.
    pub fn with_day(mut self, day: Option<u32>) -> Self {
        self.day = day;
        self
    }

    /// On-duty time this assignment contributes (ms).
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }
}
