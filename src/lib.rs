//! Flight scheduling core.
//!
//! Assigns scarce, time-windowed resources — runways and pilots — to
//! flights under hard constraints (no double-booking, duty-hour and rest
//! limits) while optimizing a secondary objective (minimum runway count,
//! minimum delay, fair crew workload). All algorithms are greedy
//! heuristics over a shared conflict core: half-open interval overlap,
//! heuristic resource selection, constraint validation.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Flight`, `Pilot`, `DutyLimits`,
//!   `DutyAssignment`, `ConflictGraph`
//! - **`scheduler`**: The three engines — `RunwayScheduler` (coloring),
//!   `ConstrainedScheduler` (fixed pool with delays), `DutyScheduler` /
//!   `MultiPeriodScheduler` (crew assignment)
//! - **`validation`**: Input integrity checks and independent duty/runway
//!   compliance validators
//! - **`generator`**: Random flight batches for simulation
//!
//! # Architecture
//!
//! The crate is a pure function library: one flight batch in, one result
//! out, no I/O and no hidden shared state. Resource pools are values passed
//! into and returned from each call, so concurrent invocations need no
//! coordination. Route planning, transport layers, and data loading live in
//! the surrounding services that consume this crate.
//!
//! Malformed input rejects the whole request; an unplaceable flight is a
//! reported outcome, never an error.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Kolen et al. (2007), "Interval scheduling: a survey"
//! - Brélaz (1979), "New methods to color the vertices of a graph"

pub mod generator;
pub mod models;
pub mod scheduler;
pub mod validation;
