//! Input validation and schedule auditing.
//!
//! Checks structural integrity of an instance before any search starts.
//! Detects:
//! - Empty instances and missing processors
//! - Duplicate or out-of-range task IDs
//! - Non-positive durations and negative deadlines
//! - Self-dependencies and unknown predecessor references
//! - Circular precedence dependencies (DAG validation)
//! - Durations too large for end times and tardiness sums to stay in range
//!
//! [`verify_schedule`] audits a finished schedule against its task graph,
//! reporting every broken timeline or precedence fact.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::models::{Schedule, Task, TaskGraph, TaskId, Time, Violation};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The instance contains no tasks.
    EmptyInstance,
    /// The processor count is zero.
    NoProcessors,
    /// Two tasks share the same ID.
    DuplicateId,
    /// A task ID lies outside `1..=n`.
    IdOutOfRange,
    /// A task has zero or negative duration.
    NonPositiveDuration,
    /// A task has a negative deadline.
    NegativeDeadline,
    /// A task lists itself as a predecessor.
    SelfDependency,
    /// A task references a predecessor that doesn't exist.
    InvalidPredecessor,
    /// Precedence graph contains a cycle.
    CyclicDependency,
    /// Task count times total duration does not fit in [`Time`].
    HorizonOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the tasks of an instance.
///
/// Checks:
/// 1. At least one task
/// 2. No duplicate task IDs, every ID in `1..=n`
/// 3. Positive durations, non-negative deadlines
/// 4. No task lists itself as a predecessor
/// 5. All predecessor references point to existing tasks
/// 6. No circular precedence dependencies
/// 7. `n * sum(durations)` fits in [`Time`], so no end time or tardiness
///    sum can overflow during search
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    if tasks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            "Instance has no tasks",
        ));
    }

    let n = tasks.len();
    let mut task_ids = HashSet::new();

    for task in tasks {
        if !task_ids.insert(task.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }

        if task.id == 0 || task.id > n {
            errors.push(ValidationError::new(
                ValidationErrorKind::IdOutOfRange,
                format!("Task ID {} is outside 1..={n}", task.id),
            ));
        }

        if task.duration <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!("Task {} has non-positive duration {}", task.id, task.duration),
            ));
        }

        if task.deadline < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDeadline,
                format!("Task {} has negative deadline {}", task.id, task.deadline),
            ));
        }
    }

    // Check predecessor references
    for task in tasks {
        for &pred in &task.predecessors {
            if pred == task.id {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfDependency,
                    format!("Task {} lists itself as a predecessor", task.id),
                ));
            } else if !task_ids.contains(&pred) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPredecessor,
                    format!("Task {} references unknown predecessor {pred}", task.id),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(tasks) {
        errors.push(cycle_err);
    }

    if tardiness_bound(tasks).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            format!("Total duration of {n} tasks overflows the time range when summed into tardiness"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on any end time or total tardiness, `None` on overflow.
///
/// Without idle time every end is at most the sum of durations, and with
/// non-negative deadlines every tardiness is at most its end, so the cost
/// never exceeds `n * sum`. Non-positive durations are reported elsewhere
/// and left out.
fn tardiness_bound(tasks: &[Task]) -> Option<Time> {
    let total = tasks
        .iter()
        .filter(|t| t.duration > 0)
        .try_fold(0 as Time, |acc, t| acc.checked_add(t.duration))?;
    Time::try_from(tasks.len()).ok()?.checked_mul(total)
}

/// Validates the processor count of an instance.
pub fn validate_processors(processors: usize) -> ValidationResult {
    if processors == 0 {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::NoProcessors,
            "Processor count must be at least 1",
        )]);
    }
    Ok(())
}

/// Detects cycles with an iterative Kahn peel.
///
/// Edges from unknown predecessors and self-loops are reported elsewhere and
/// skipped here. Tasks left after the peel sit on a cycle or downstream of
/// one; the error names them in ascending order.
///
/// # Reference
/// Kahn (1962), "Topological sorting of large networks"
fn detect_cycles(tasks: &[Task]) -> Option<ValidationError> {
    let known: HashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
    let mut in_degree: HashMap<TaskId, usize> = HashMap::with_capacity(tasks.len());
    let mut successors: HashMap<TaskId, Vec<TaskId>> = HashMap::new();

    for task in tasks {
        let edges = task
            .predecessors
            .iter()
            .filter(|&&pred| pred != task.id && known.contains(&pred));
        let mut count = 0;
        for &pred in edges {
            successors.entry(pred).or_default().push(task.id);
            count += 1;
        }
        *in_degree.entry(task.id).or_default() += count;
    }

    let mut ready: Vec<TaskId> = in_degree
        .iter()
        .filter(|&(_, &d)| d == 0)
        .map(|(&id, _)| id)
        .collect();
    while let Some(id) = ready.pop() {
        in_degree.remove(&id);
        for next in successors.get(&id).into_iter().flatten() {
            if let Some(d) = in_degree.get_mut(next) {
                *d -= 1;
                if *d == 0 {
                    ready.push(*next);
                }
            }
        }
    }

    if in_degree.is_empty() {
        return None;
    }
    let mut blocked: Vec<TaskId> = in_degree.into_keys().collect();
    blocked.sort_unstable();
    let listed: Vec<String> = blocked.iter().map(ToString::to_string).collect();
    Some(ValidationError::new(
        ValidationErrorKind::CyclicDependency,
        format!("Circular dependency blocks tasks {}", listed.join(", ")),
    ))
}

/// Audits a schedule against its task graph.
///
/// Reports tasks placed zero or several times, unknown tasks, wrong
/// durations, timeline gaps or overlaps (every start must equal the end of
/// the previous task on the same processor, or 0), and precedence breaks.
/// An empty result means the schedule is complete and valid.
pub fn verify_schedule(schedule: &Schedule, graph: &TaskGraph) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen: HashMap<TaskId, usize> = HashMap::new();

    for processor in 0..schedule.processor_count {
        let mut expected_start = 0;
        for a in schedule.assignments_for_processor(processor) {
            *seen.entry(a.task_id).or_insert(0) += 1;

            match graph.get(a.task_id) {
                Some(task) if a.duration() != task.duration => {
                    violations.push(Violation::duration_mismatch(
                        a.task_id,
                        format!(
                            "Task {} runs for {} instead of {}",
                            a.task_id,
                            a.duration(),
                            task.duration
                        ),
                    ));
                }
                Some(_) => {}
                None => violations.push(Violation::unknown_task(
                    a.task_id,
                    format!("Task {} is not part of the instance", a.task_id),
                )),
            }

            if a.start != expected_start {
                violations.push(Violation::timeline_gap(
                    a.task_id,
                    format!(
                        "Task {} starts at {} on processor {processor}, expected {expected_start}",
                        a.task_id, a.start
                    ),
                ));
            }
            expected_start = a.end;
        }
    }

    for task in graph.tasks() {
        match seen.get(&task.id).copied().unwrap_or(0) {
            0 => violations.push(Violation::missing_task(
                task.id,
                format!("Task {} is not scheduled", task.id),
            )),
            1 => {}
            count => violations.push(Violation::duplicate_task(
                task.id,
                format!("Task {} is scheduled {count} times", task.id),
            )),
        }
    }

    for task in graph.tasks() {
        let Some(a) = schedule.assignment_for_task(task.id) else {
            continue;
        };
        for &pred in &task.predecessors {
            if let Some(p) = schedule.assignment_for_task(pred) {
                if p.end > a.start {
                    violations.push(Violation::precedence_violation(
                        task.id,
                        format!(
                            "Task {} starts at {} before predecessor {pred} ends at {}",
                            task.id, a.start, p.end
                        ),
                    ));
                }
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, ViolationType};

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new(1, 2, 5),
            Task::new(2, 3, 4).with_predecessor(1),
            Task::new(3, 1, 10),
        ]
    }

    fn sample_graph() -> TaskGraph {
        TaskGraph::new(sample_tasks()).unwrap()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_tasks(&sample_tasks()).is_ok());
    }

    #[test]
    fn test_empty_instance() {
        let errors = validate_tasks(&[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyInstance));
    }

    #[test]
    fn test_no_processors() {
        assert!(validate_processors(1).is_ok());
        let errors = validate_processors(0).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NoProcessors);
    }

    #[test]
    fn test_duplicate_task_id() {
        let tasks = vec![Task::new(1, 1, 0), Task::new(1, 1, 0)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_id_out_of_range() {
        let tasks = vec![Task::new(1, 1, 0), Task::new(7, 1, 0)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::IdOutOfRange && e.message.contains('7')));
    }

    #[test]
    fn test_non_positive_duration_and_negative_deadline() {
        let tasks = vec![Task::new(1, 0, 5), Task::new(2, 3, -1)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveDuration));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeDeadline));
    }

    #[test]
    fn test_self_dependency() {
        let tasks = vec![Task::new(1, 1, 0).with_predecessor(1)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::SelfDependency);
    }

    #[test]
    fn test_invalid_predecessor() {
        let tasks = vec![Task::new(1, 1, 0).with_predecessor(9)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidPredecessor));
    }

    #[test]
    fn test_two_task_cycle() {
        let tasks = vec![
            Task::new(1, 1, 0).with_predecessor(2),
            Task::new(2, 1, 0).with_predecessor(1),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_long_cycle() {
        // 1 → 2 → 3 → 1
        let tasks = vec![
            Task::new(1, 1, 0).with_predecessor(3),
            Task::new(2, 1, 0).with_predecessor(1),
            Task::new(3, 1, 0).with_predecessor(2),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_cycle_message_names_blocked_tasks() {
        // 2 ⇄ 3, and 4 waits on the cycle; 1 is free
        let tasks = vec![
            Task::new(1, 1, 0),
            Task::new(2, 1, 0).with_predecessors([1, 3]),
            Task::new(3, 1, 0).with_predecessor(2),
            Task::new(4, 1, 0).with_predecessor(3),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Circular dependency blocks tasks 2, 3, 4");
    }

    #[test]
    fn test_long_chain_is_not_a_cycle() {
        let tasks: Vec<Task> = (1..=50_000)
            .map(|id| {
                let task = Task::new(id, 1, 0);
                if id > 1 {
                    task.with_predecessor(id - 1)
                } else {
                    task
                }
            })
            .collect();
        assert!(validate_tasks(&tasks).is_ok());
    }

    #[test]
    fn test_rejects_durations_that_overflow_the_horizon() {
        let big = i64::MAX / 2 + 1;
        let tasks = vec![Task::new(1, big, 0), Task::new(2, big, 0)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::HorizonOverflow);
    }

    #[test]
    fn test_rejects_when_tardiness_sum_overflows() {
        // the durations add up, but n times their sum does not
        let third = i64::MAX / 3;
        let tasks = vec![Task::new(1, third, 0), Task::new(2, third, 0), Task::new(3, 1, 0)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::HorizonOverflow));
    }

    #[test]
    fn test_accepts_large_durations_within_horizon() {
        let quarter = i64::MAX / 4;
        assert!(validate_tasks(&[Task::new(1, quarter, 0), Task::new(2, quarter, 0)]).is_ok());
    }

    #[test]
    fn test_no_cycle_in_diamond() {
        let tasks = vec![
            Task::new(1, 1, 0),
            Task::new(2, 1, 0).with_predecessor(1),
            Task::new(3, 1, 0).with_predecessor(1),
            Task::new(4, 1, 0).with_predecessors([2, 3]),
        ];
        assert!(validate_tasks(&tasks).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![Task::new(1, -2, 0).with_predecessor(5)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors.len() >= 2);
    }

    #[test]
    fn test_verify_valid_schedule() {
        let graph = sample_graph();
        let mut s = Schedule::with_processors(1);
        s.add_assignment(Assignment::new(1, 0, 0, 2));
        s.add_assignment(Assignment::new(2, 0, 2, 5));
        s.add_assignment(Assignment::new(3, 0, 5, 6));

        assert!(verify_schedule(&s, &graph).is_empty());
    }

    #[test]
    fn test_verify_reports_precedence_break() {
        let graph = sample_graph();
        let mut s = Schedule::with_processors(2);
        s.add_assignment(Assignment::new(1, 0, 0, 2));
        s.add_assignment(Assignment::new(2, 1, 0, 3));
        s.add_assignment(Assignment::new(3, 0, 2, 3));

        let violations = verify_schedule(&s, &graph);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].violation_type,
            ViolationType::PrecedenceViolation
        );
        assert_eq!(violations[0].task_id, 2);
    }

    #[test]
    fn test_verify_reports_gap_missing_and_duration() {
        let graph = sample_graph();
        let mut s = Schedule::with_processors(1);
        s.add_assignment(Assignment::new(1, 0, 1, 3)); // idle gap before task 1
        s.add_assignment(Assignment::new(2, 0, 3, 4)); // wrong duration

        let kinds: Vec<ViolationType> = verify_schedule(&s, &graph)
            .into_iter()
            .map(|v| v.violation_type)
            .collect();
        assert!(kinds.contains(&ViolationType::TimelineGap));
        assert!(kinds.contains(&ViolationType::DurationMismatch));
        assert!(kinds.contains(&ViolationType::MissingTask));
    }
}
