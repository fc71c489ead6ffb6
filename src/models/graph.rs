//! Immutable precedence graph.

use super::{Task, TaskId, Time};
use crate::validation::{validate_tasks, ValidationError};

/// Validated, read-only task graph.
///
/// Tasks are stored by ID (slot `id - 1`) together with a successor index
/// derived from the predecessor lists. Construction rejects every structural
/// defect, so a `TaskGraph` is always a DAG over IDs `1..=n`.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    successors: Vec<Vec<TaskId>>,
}

impl TaskGraph {
    /// Builds a graph from tasks given in any order.
    ///
    /// # Errors
    /// Returns all validation errors found by [`validate_tasks`].
    pub fn new(mut tasks: Vec<Task>) -> Result<Self, Vec<ValidationError>> {
        validate_tasks(&tasks)?;
        tasks.sort_by_key(|t| t.id);

        let mut successors = vec![Vec::new(); tasks.len()];
        for task in &tasks {
            for &pred in &task.predecessors {
                successors[pred - 1].push(task.id);
            }
        }

        Ok(Self { tasks, successors })
    }

    /// Number of tasks.
    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the graph has no tasks. Always false for a validated graph.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task.
    ///
    /// # Panics
    /// Panics if `id` is not in `1..=n`.
    #[inline]
    pub fn task(&self, id: TaskId) -> &Task {
        &self.tasks[id - 1]
    }

    /// Looks up a task, returning `None` for unknown IDs.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        id.checked_sub(1).and_then(|slot| self.tasks.get(slot))
    }

    #[inline]
    pub fn duration(&self, id: TaskId) -> Time {
        self.task(id).duration
    }

    #[inline]
    pub fn deadline(&self, id: TaskId) -> Time {
        self.task(id).deadline
    }

    #[inline]
    pub fn predecessors(&self, id: TaskId) -> &[TaskId] {
        &self.task(id).predecessors
    }

    /// Tasks that list `id` as a predecessor, in ascending ID order.
    #[inline]
    pub fn successors(&self, id: TaskId) -> &[TaskId] {
        &self.successors[id - 1]
    }

    /// Iterates tasks in ascending ID order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Iterates task IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.tasks.iter().map(|t| t.id)
    }

    /// Sum of all durations. An upper bound on any no-idle makespan.
    pub fn total_duration(&self) -> Time {
        self.tasks.iter().map(|t| t.duration).sum()
    }
}
