//! Anytime branch-and-bound search.
//!
//! The engine enumerates (task, processor) placements depth-first on cloned
//! [`ScheduleState`](crate::models::ScheduleState)s, prunes every node whose
//! tardiness already reaches the incumbent, and polls a [`Cutoff`] at every
//! node. The incumbent starts as the greedy baseline, so a complete valid
//! schedule is available whenever the cutoff fires.
//!
//! # Pruning
//!
//! | Check | When | Sound because |
//! |-------|------|---------------|
//! | Bound | node and child cost `>=` incumbent | cost never decreases with depth |
//! | Lookahead | unscheduled predecessor cannot finish in time | no processor end ever moves back |
//! | Partial validity | a placed predecessor ends after its successor starts | start times are fixed once placed |
//!
//! # Reference
//! Land & Doig (1960), "An Automatic Method of Solving Discrete Programming Problems"

mod config;
mod cutoff;
mod solver;

pub use config::{SearchConfig, DEFAULT_TIME_BUDGET};
pub use cutoff::{Cutoff, NoCutoff, NodeLimit, TimeBudget};
pub use solver::{solve, BranchAndBound, Incumbent, SearchOutcome, SearchStats, SearchStatus};
