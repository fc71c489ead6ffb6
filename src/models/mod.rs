//! Scheduling domain models.
//!
//! Provides the core data types for the tardiness problem: immutable
//! tasks and their precedence graph, the mutable per-branch search state,
//! and the read-only schedule handed back to callers.
//!
//! # Lifecycle
//!
//! | Type | Built | Mutated |
//! |------|-------|---------|
//! | `Task` / `TaskGraph` | once, from validated input | never |
//! | `ScheduleState` | at the search root, cloned per branch | by its owning node |
//! | `Schedule` | from a finished state | never |

mod graph;
mod instance;
mod schedule;
mod state;
mod task;

pub use graph::TaskGraph;
pub use instance::Instance;
pub use schedule::{Assignment, Schedule, Violation, ViolationType};
pub use state::{ScheduleState, ScheduledRecord, TimelineEntry};
pub use task::{Task, TaskId, Time};
