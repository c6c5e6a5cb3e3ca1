//! Scheduling engines.
//!
//! Three schedulers over one conceptual core (half-open interval conflicts,
//! greedy resource selection, constraint checks):
//!
//! - [`RunwayScheduler`]: minimum-runway assignment via conflict-graph
//!   coloring, unconstrained pool.
//! - [`ConstrainedScheduler`]: fixed runway pool, delays flights instead of
//!   growing the pool; every flight is eventually placed.
//! - [`DutyScheduler`] / [`MultiPeriodScheduler`]: pilot assignment under
//!   duty-hour and rest-gap regulations, single day or rolling multi-day.
//!
//! All are greedy heuristics, not exact solvers, and all run as pure batch
//! computations: one flight list in, one result out, no I/O.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Kolen et al. (2007), "Interval scheduling: a survey"

pub mod coloring;
pub mod constrained;
pub mod duty;
pub mod multi_period;

pub use coloring::{runway_bounds, ColoringHeuristic, ColoringResult, RunwayScheduler};
pub use constrained::{
    ConstrainedResult, ConstrainedScheduler, DelayPolicy, HybridWeights, OrderingPolicy,
};
pub use duty::{DutyScheduleResult, DutyScheduler, SelectionStrategy};
pub use multi_period::{MultiPeriodResult, MultiPeriodScheduler};
