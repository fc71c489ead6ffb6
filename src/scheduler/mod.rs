//! Greedy baseline scheduler and KPI evaluation.
//!
//! # Algorithm
//!
//! `GreedyScheduler` is a precedence-aware list scheduler. It is not
//! optimal, but it always returns a complete, valid schedule; the search
//! engine uses it as the starting incumbent so that a schedule can be
//! reported at any cutoff.
//!
//! # KPI
//!
//! `ScheduleKpi` computes standard scheduling metrics: makespan, tardiness,
//! on-time rate, utilization, and flow time.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod greedy;
mod kpi;

pub use greedy::GreedyScheduler;
pub use kpi::ScheduleKpi;
