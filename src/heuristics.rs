//! Search heuristics: topological layering, candidate ordering, lookahead.
//!
//! All functions are pure in the (graph, state) pair. None of them affects
//! which schedules are feasible; layering only changes the order in which
//! branches are tried, and the lookahead only discards branches that
//! [`ScheduleState::is_valid_partial`] would reject further down anyway.
//!
//! # Reference
//! Kahn (1962), "Topological sorting of large networks"

use std::collections::VecDeque;

use crate::dispatching::{RuleEngine, SchedulingContext};
use crate::models::{ScheduleState, TaskGraph, TaskId};

/// Topological layer of every unscheduled task, slot `id - 1`.
///
/// Runs a Kahn peel over the sub-DAG induced by the unscheduled tasks:
/// in-degrees count only unscheduled predecessors, sources get layer 0, and
/// every other task gets `1 + max(layer of its unscheduled predecessors)`.
/// Slots of scheduled tasks are left at 0.
pub fn topological_layers(graph: &TaskGraph, state: &ScheduleState) -> Vec<usize> {
    let mut in_degree = vec![0usize; graph.len()];
    let mut layers = vec![0usize; graph.len()];

    for &id in state.unscheduled() {
        in_degree[id - 1] = graph
            .predecessors(id)
            .iter()
            .filter(|&&pred| !state.is_scheduled(pred))
            .count();
    }

    let mut queue: VecDeque<TaskId> = state
        .unscheduled()
        .iter()
        .copied()
        .filter(|&id| in_degree[id - 1] == 0)
        .collect();

    while let Some(u) = queue.pop_front() {
        for &v in graph.successors(u) {
            if state.is_scheduled(v) {
                continue;
            }
            layers[v - 1] = layers[v - 1].max(layers[u - 1] + 1);
            in_degree[v - 1] -= 1;
            if in_degree[v - 1] == 0 {
                queue.push_back(v);
            }
        }
    }

    layers
}

/// Builds the rule context for the current node.
///
/// The clock is the earliest processor end, the time at which the next
/// placement could start at the soonest.
pub fn candidate_context(graph: &TaskGraph, state: &ScheduleState) -> SchedulingContext {
    let current_time = (0..state.processor_count())
        .map(|p| state.processor_end(p))
        .min()
        .unwrap_or(0);

    let mut context =
        SchedulingContext::at_time(current_time).with_layers(topological_layers(graph, state));

    let pending = state.unscheduled();
    if !pending.is_empty() {
        let total: i64 = pending.iter().map(|&id| graph.duration(id)).sum();
        context = context.with_average_processing_time(total as f64 / pending.len() as f64);
    }
    context
}

/// Unscheduled tasks sorted by `engine`.
pub fn order_candidates(graph: &TaskGraph, state: &ScheduleState, engine: &RuleEngine) -> Vec<TaskId> {
    let context = candidate_context(graph, state);
    engine.sort_ids(state.unscheduled(), graph, &context)
}

/// Lookahead check for a task that has just been committed.
///
/// For every predecessor of `task` that is still unscheduled, some processor
/// must be able to run it right after its current last task and finish by
/// the start of `task`. If one predecessor has no such processor, no
/// extension of `state` can become valid.
///
/// Returns `true` when `task` is not scheduled in `state`.
pub fn is_consistent(graph: &TaskGraph, state: &ScheduleState, task: TaskId) -> bool {
    let Some(record) = state.record(task) else {
        return true;
    };

    graph
        .predecessors(task)
        .iter()
        .filter(|&&pred| !state.is_scheduled(pred))
        .all(|&pred| {
            let duration = graph.duration(pred);
            (0..state.processor_count())
                .any(|p| state.processor_end(p) + duration <= record.start)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;

    /// 1 → 2 → 4, 3 → 4, 5 isolated.
    fn sample_graph() -> TaskGraph {
        TaskGraph::new(vec![
            Task::new(1, 2, 10),
            Task::new(2, 1, 10).with_predecessor(1),
            Task::new(3, 4, 3),
            Task::new(4, 1, 20).with_predecessors([2, 3]),
            Task::new(5, 3, 1),
        ])
        .unwrap()
    }

    #[test]
    fn test_layers_at_root() {
        let graph = sample_graph();
        let state = ScheduleState::new(&graph, 2);
        assert_eq!(topological_layers(&graph, &state), vec![0, 1, 0, 2, 0]);
    }

    #[test]
    fn test_layers_ignore_scheduled_tasks() {
        let graph = sample_graph();
        let mut state = ScheduleState::new(&graph, 2);
        state.schedule_task(&graph, 0, 1);
        let layers = topological_layers(&graph, &state);
        // 2 becomes a source; 4 still waits on 2 and 3
        assert_eq!(layers[1], 0);
        assert_eq!(layers[3], 1);
    }

    #[test]
    fn test_order_candidates() {
        let graph = sample_graph();
        let state = ScheduleState::new(&graph, 2);
        let order = order_candidates(&graph, &state, &RuleEngine::layered());
        // layer 0 by deadline: 5 (1), 3 (3), 1 (10); then 2; then 4
        assert_eq!(order, vec![5, 3, 1, 2, 4]);
    }

    #[test]
    fn test_candidate_context() {
        let graph = sample_graph();
        let mut state = ScheduleState::new(&graph, 2);
        state.schedule_task(&graph, 0, 3);
        let ctx = candidate_context(&graph, &state);
        assert_eq!(ctx.current_time, 0); // processor 1 still empty
        // pending durations 2 + 1 + 1 + 3 over 4 tasks
        assert!((ctx.average_processing_time.unwrap() - 1.75).abs() < 1e-10);
    }

    #[test]
    fn test_consistent_when_predecessors_fit() {
        let graph = sample_graph();
        let mut state = ScheduleState::new(&graph, 2);
        state.schedule_task(&graph, 0, 3); // 0..4
        state.schedule_task(&graph, 0, 2); // 4..5, predecessor 1 unscheduled
        // processor 1 is empty: 0 + 2 <= 4
        assert!(is_consistent(&graph, &state, 2));
    }

    #[test]
    fn test_inconsistent_when_no_processor_can_finish_predecessor() {
        let graph = sample_graph();
        let mut state = ScheduleState::new(&graph, 1);
        state.schedule_task(&graph, 0, 2); // starts at 0, predecessor 1 needs 2 units
        assert!(!is_consistent(&graph, &state, 2));
    }

    #[test]
    fn test_consistency_ignores_scheduled_predecessors_and_unplaced_task() {
        let graph = sample_graph();
        let mut state = ScheduleState::new(&graph, 1);
        assert!(is_consistent(&graph, &state, 2));
        state.schedule_task(&graph, 0, 1);
        state.schedule_task(&graph, 0, 2);
        assert!(is_consistent(&graph, &state, 2));
    }
}
