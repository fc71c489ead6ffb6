//! Schedule (solution) model.
//!
//! A schedule is the read-only projection of a finished search state:
//! every task placed on a processor with a start and end time. It is the
//! value handed to formatters, KPI calculation and schedule auditing.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};

use super::{TaskGraph, TaskId, Time};

/// A complete or partial schedule on identical processors.
///
/// Assignments are grouped by processor and, within a processor, kept in
/// the order they were committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Number of processors, including idle ones.
    pub processor_count: usize,
    /// Task-processor-time assignments.
    pub assignments: Vec<Assignment>,
}

/// A task-processor-time assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned task.
    pub task_id: TaskId,
    /// Processor index (0-based).
    pub processor: usize,
    /// Start time.
    pub start: Time,
    /// End time.
    pub end: Time,
}

/// A broken fact found when auditing a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Task the violation is reported against.
    pub task_id: TaskId,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A task of the instance has no assignment.
    MissingTask,
    /// A task is assigned more than once.
    DuplicateTask,
    /// An assignment refers to a task outside the instance.
    UnknownTask,
    /// End minus start differs from the task duration.
    DurationMismatch,
    /// A start differs from the end of the previous task on its processor.
    TimelineGap,
    /// A task starts before one of its predecessors ends.
    PrecedenceViolation,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(task_id: TaskId, processor: usize, start: Time, end: Time) -> Self {
        Self {
            task_id,
            processor,
            start,
            end,
        }
    }

    /// End minus start.
    #[inline]
    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

impl Violation {
    fn new(violation_type: ViolationType, task_id: TaskId, message: impl Into<String>) -> Self {
        Self {
            violation_type,
            task_id,
            message: message.into(),
        }
    }

    pub fn missing_task(task_id: TaskId, message: impl Into<String>) -> Self {
        Self::new(ViolationType::MissingTask, task_id, message)
    }

    pub fn duplicate_task(task_id: TaskId, message: impl Into<String>) -> Self {
        Self::new(ViolationType::DuplicateTask, task_id, message)
    }

    pub fn unknown_task(task_id: TaskId, message: impl Into<String>) -> Self {
        Self::new(ViolationType::UnknownTask, task_id, message)
    }

    pub fn duration_mismatch(task_id: TaskId, message: impl Into<String>) -> Self {
        Self::new(ViolationType::DurationMismatch, task_id, message)
    }

    pub fn timeline_gap(task_id: TaskId, message: impl Into<String>) -> Self {
        Self::new(ViolationType::TimelineGap, task_id, message)
    }

    pub fn precedence_violation(task_id: TaskId, message: impl Into<String>) -> Self {
        Self::new(ViolationType::PrecedenceViolation, task_id, message)
    }
}

impl Schedule {
    /// Creates an empty schedule over `processor_count` processors.
    pub fn with_processors(processor_count: usize) -> Self {
        Self {
            processor_count,
            assignments: Vec::new(),
        }
    }

    /// Adds an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Makespan: latest end time across all assignments.
    pub fn makespan(&self) -> Time {
        self.assignments.iter().map(|a| a.end).max().unwrap_or(0)
    }

    /// Finds the assignment for a given task.
    pub fn assignment_for_task(&self, task_id: TaskId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.task_id == task_id)
    }

    /// Returns the assignments of one processor in scheduling order.
    pub fn assignments_for_processor(&self, processor: usize) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.processor == processor)
            .collect()
    }

    /// Task IDs of one processor in scheduling order.
    pub fn sequence(&self, processor: usize) -> Vec<TaskId> {
        self.assignments_for_processor(processor)
            .iter()
            .map(|a| a.task_id)
            .collect()
    }

    /// Computes processor utilization: busy_time / horizon.
    ///
    /// Returns `None` if `horizon` is not positive.
    pub fn processor_utilization(&self, processor: usize, horizon: Time) -> Option<f64> {
        if horizon <= 0 {
            return None;
        }
        let busy: Time = self
            .assignments_for_processor(processor)
            .iter()
            .map(|a| a.duration())
            .sum();
        Some(busy as f64 / horizon as f64)
    }

    /// Utilization of every processor, using makespan as the horizon.
    ///
    /// Empty if the schedule has no positive makespan.
    pub fn all_utilizations(&self) -> Vec<f64> {
        let horizon = self.makespan();
        (0..self.processor_count)
            .filter_map(|p| self.processor_utilization(p, horizon))
            .collect()
    }

    /// Completion time for a task.
    pub fn task_completion_time(&self, task_id: TaskId) -> Option<Time> {
        self.assignment_for_task(task_id).map(|a| a.end)
    }

    /// Total tardiness of the assigned tasks.
    pub fn total_tardiness(&self, graph: &TaskGraph) -> Time {
        self.assignments
            .iter()
            .filter_map(|a| graph.get(a.task_id).map(|t| t.tardiness(a.end)))
            .sum()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}
