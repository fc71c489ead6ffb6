//! Task model.
//!
//! A task is a single, non-preemptive unit of work with a processing
//! duration, a due date, and a set of predecessor tasks that must finish
//! before it may start.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

use serde::{Deserialize, Serialize};

/// Task identifier. Valid identifiers are `1..=n` for an `n`-task instance.
pub type TaskId = usize;

/// Time value in abstract integer units (start, end, duration, deadline).
pub type Time = i64;

/// A task to be placed on one of the identical processors.
///
/// # Time Representation
/// All times are integer units relative to the scheduling epoch (t=0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier (1-based).
    pub id: TaskId,
    /// Processing time. Must be positive.
    pub duration: Time,
    /// Due date. Completion after it accrues tardiness.
    pub deadline: Time,
    /// Tasks that must complete before this one starts (sorted, deduplicated).
    pub predecessors: Vec<TaskId>,
}

impl Task {
    /// Creates a task without predecessors.
    pub fn new(id: TaskId, duration: Time, deadline: Time) -> Self {
        Self {
            id,
            duration,
            deadline,
            predecessors: Vec::new(),
        }
    }

    /// Adds a single predecessor.
    pub fn with_predecessor(mut self, predecessor: TaskId) -> Self {
        if let Err(pos) = self.predecessors.binary_search(&predecessor) {
            self.predecessors.insert(pos, predecessor);
        }
        self
    }

    /// Adds several predecessors.
    pub fn with_predecessors(self, predecessors: impl IntoIterator<Item = TaskId>) -> Self {
        predecessors
            .into_iter()
            .fold(self, |task, p| task.with_predecessor(p))
    }

    /// Tardiness if the task completes at `end`.
    #[inline]
    pub fn tardiness(&self, end: Time) -> Time {
        (end - self.deadline).max(0)
    }

    /// Whether `other` must complete before this task starts.
    pub fn depends_on(&self, other: TaskId) -> bool {
        self.predecessors.binary_search(&other).is_ok()
    }

    /// Whether this task has no predecessors.
    pub fn is_source(&self) -> bool {
        self.predecessors.is_empty()
    }
}
