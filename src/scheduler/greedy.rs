//! Precedence-aware greedy list scheduler.
//!
//! # Algorithm
//!
//! 1. Collect the ready tasks (every predecessor already placed).
//! 2. Pick the best ready task with the rule engine.
//! 3. Place it on the earliest-ending processor among those whose current
//!    end is at or after the end of all of its predecessors.
//! 4. Repeat until every task is placed.
//!
//! The processor running the latest-ending predecessor always qualifies in
//! step 3, so the result is complete and valid for every acyclic instance.
//! It is not optimal; it seeds the branch-and-bound incumbent.
//!
//! # Complexity
//! O(n² log n + n·p) where n=tasks, p=processors.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use tracing::debug;

use crate::dispatching::RuleEngine;
use crate::heuristics::candidate_context;
use crate::models::{Instance, Schedule, ScheduleState, TaskId};

/// Greedy list scheduler for tardiness instances.
///
/// # Example
///
/// ```
/// use u_tardiness::models::{Instance, Task};
/// use u_tardiness::scheduler::GreedyScheduler;
///
/// let instance = Instance::new(
///     vec![Task::new(1, 2, 5), Task::new(2, 3, 4).with_predecessor(1)],
///     2,
/// ).unwrap();
///
/// let schedule = GreedyScheduler::new().schedule(&instance);
/// assert_eq!(schedule.assignment_count(), 2);
/// assert_eq!(schedule.assignment_for_task(2).unwrap().start, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler {
    rule_engine: RuleEngine,
}

impl GreedyScheduler {
    /// Creates a scheduler with the layered rule chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule engine used to pick among ready tasks.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Builds a complete, valid state.
    pub fn schedule_state(&self, instance: &Instance) -> ScheduleState {
        let graph = &instance.graph;
        let mut state = ScheduleState::new(graph, instance.processors);

        while !state.is_final() {
            let ready: Vec<TaskId> = state
                .unscheduled()
                .iter()
                .copied()
                .filter(|&id| graph.predecessors(id).iter().all(|&p| state.is_scheduled(p)))
                .collect();

            let context = candidate_context(graph, &state);
            let Some(&task) = self.rule_engine.sort_ids(&ready, graph, &context).first() else {
                // Unreachable for an acyclic graph: some unscheduled task is always ready.
                break;
            };

            let processor = self.select_processor(instance, &state, task);
            state.schedule_task(graph, processor, task);
        }

        let makespan = (0..state.processor_count())
            .map(|p| state.processor_end(p))
            .max()
            .unwrap_or(0);
        debug!(cost = state.cost(graph), makespan, "greedy baseline built");
        state
    }

    /// Builds a complete, valid schedule.
    pub fn schedule(&self, instance: &Instance) -> Schedule {
        self.schedule_state(instance).to_schedule()
    }

    /// Earliest-ending processor that does not start `task` before its
    /// predecessors end; falls back to the processor of the latest-ending
    /// predecessor.
    fn select_processor(&self, instance: &Instance, state: &ScheduleState, task: TaskId) -> usize {
        let latest_pred = instance
            .graph
            .predecessors(task)
            .iter()
            .filter_map(|&p| state.record(p))
            .max_by_key(|r| r.end);

        let ready_at = latest_pred.map_or(0, |r| r.end);
        let anchor = latest_pred.map_or(0, |r| r.processor);

        (0..instance.processors)
            .filter(|&p| state.processor_end(p) >= ready_at)
            .min_by_key(|&p| (state.processor_end(p), p))
            .unwrap_or(anchor)
    }
}
