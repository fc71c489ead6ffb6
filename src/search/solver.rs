//! Depth-first branch-and-bound over (task, processor) placements.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, trace};

use super::{Cutoff, SearchConfig, TimeBudget};
use crate::dispatching::RuleEngine;
use crate::heuristics::{is_consistent, order_candidates};
use crate::models::{Instance, Schedule, ScheduleState, TaskGraph, Time};
use crate::scheduler::GreedyScheduler;

/// How the search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchStatus {
    /// The whole tree was explored; the incumbent is optimal among
    /// schedules without idle time.
    Exhausted,
    /// The cutoff fired first; the incumbent is the best found so far.
    TimedOut,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes entered (cutoff polls that did not stop the search).
    pub nodes: u64,
    /// Times the incumbent was replaced by a cheaper schedule.
    pub improvements: u64,
    /// Children discarded because their cost reached the incumbent.
    pub pruned_by_bound: u64,
    /// Children discarded by the lookahead check.
    pub pruned_by_lookahead: u64,
    /// Children discarded for breaking a precedence edge.
    pub pruned_invalid: u64,
    /// Complete states rejected by the final validity check.
    pub rejected_final: u64,
}

/// Best complete, valid schedule seen so far.
///
/// Owns an independent copy of the state that produced it, so it outlives
/// the search node that found it.
#[derive(Debug, Clone)]
pub struct Incumbent {
    cost: Time,
    state: ScheduleState,
}

impl Incumbent {
    pub fn new(state: ScheduleState, cost: Time) -> Self {
        Self { cost, state }
    }

    #[inline]
    pub fn cost(&self) -> Time {
        self.cost
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    /// Replaces the incumbent if `cost` is strictly lower.
    pub fn offer(&mut self, state: &ScheduleState, cost: Time) -> bool {
        if cost < self.cost {
            self.cost = cost;
            self.state = state.clone();
            true
        } else {
            false
        }
    }
}

/// Result of a search run.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Best schedule found. Always complete and valid.
    pub schedule: Schedule,
    /// Total tardiness of `schedule`.
    pub cost: Time,
    /// Total tardiness of the greedy starting schedule.
    pub baseline_cost: Time,
    pub status: SearchStatus,
    pub stats: SearchStats,
    /// Wall-clock time spent, greedy baseline included.
    pub elapsed: Duration,
}

/// Anytime branch-and-bound solver for total tardiness.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use u_tardiness::models::{Instance, Task};
/// use u_tardiness::search::{BranchAndBound, SearchConfig, SearchStatus};
///
/// let instance = Instance::new(
///     vec![
///         Task::new(1, 2, 5),
///         Task::new(2, 3, 4).with_predecessor(1),
///         Task::new(3, 1, 10),
///     ],
///     1,
/// ).unwrap();
///
/// let config = SearchConfig::default().with_time_budget(Duration::from_secs(5));
/// let outcome = BranchAndBound::new(&instance, config).solve();
/// assert_eq!(outcome.cost, 1);
/// assert_eq!(outcome.status, SearchStatus::Exhausted);
/// assert_eq!(outcome.schedule.sequence(0), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct BranchAndBound<'a> {
    instance: &'a Instance,
    config: SearchConfig,
    rule_engine: RuleEngine,
}

impl<'a> BranchAndBound<'a> {
    /// Uses the layered rule chain with the configured priority.
    pub fn new(instance: &'a Instance, config: SearchConfig) -> Self {
        let rule_engine = RuleEngine::layered_by(config.priority);
        Self {
            instance,
            config,
            rule_engine,
        }
    }

    /// Sets the rule engine used for candidate ordering and the baseline.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Searches until the configured time budget expires or the tree is
    /// exhausted. The budget clock starts here.
    pub fn solve(&self) -> SearchOutcome {
        let budget = TimeBudget::new(self.config.time_budget);
        self.solve_with(&budget)
    }

    /// Searches until `cutoff` says stop or the tree is exhausted.
    pub fn solve_with(&self, cutoff: &dyn Cutoff) -> SearchOutcome {
        let started = Instant::now();
        let graph = &self.instance.graph;

        let baseline = GreedyScheduler::new()
            .with_rule_engine(self.rule_engine.clone())
            .schedule_state(self.instance);
        debug_assert!(baseline.is_valid_final(graph));
        let baseline_cost = baseline.cost(graph);

        let mut incumbent = Incumbent::new(baseline, baseline_cost);
        let mut stats = SearchStats::default();
        let root = ScheduleState::new(graph, self.instance.processors);

        let status = match self.explore(root, &mut incumbent, cutoff, &mut stats) {
            ControlFlow::Continue(()) => SearchStatus::Exhausted,
            ControlFlow::Break(()) => SearchStatus::TimedOut,
        };

        let elapsed = started.elapsed();
        info!(
            cost = incumbent.cost(),
            baseline_cost,
            status = ?status,
            nodes = stats.nodes,
            improvements = stats.improvements,
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );

        SearchOutcome {
            schedule: incumbent.state().to_schedule(),
            cost: incumbent.cost(),
            baseline_cost,
            status,
            stats,
            elapsed,
        }
    }

    /// Explores one node. `Break` aborts the entire search.
    fn explore(
        &self,
        mut state: ScheduleState,
        incumbent: &mut Incumbent,
        cutoff: &dyn Cutoff,
        stats: &mut SearchStats,
    ) -> ControlFlow<()> {
        if cutoff.must_stop() {
            return ControlFlow::Break(());
        }
        stats.nodes += 1;

        let graph = &self.instance.graph;

        if state.is_final() {
            self.close_leaf(&state, incumbent, stats);
            return ControlFlow::Continue(());
        }

        if self.config.layering {
            let order = order_candidates(graph, &state, &self.rule_engine);
            state.set_unscheduled_order(order);
        }
        if self.config.processor_sort {
            state.canonicalize_processor_order();
        }

        let node_cost = state.cost(graph);
        let candidates = state.unscheduled().to_vec();

        for task in candidates {
            for processor in 0..state.processor_count() {
                // Cost only grows with depth, so nothing below can improve.
                if node_cost >= incumbent.cost() {
                    return ControlFlow::Continue(());
                }

                let mut child = state.clone();
                child.schedule_task(graph, processor, task);

                if self.config.lookahead && !is_consistent(graph, &child, task) {
                    stats.pruned_by_lookahead += 1;
                    trace!(task, processor, "lookahead rejected placement");
                    continue;
                }
                if child.cost(graph) >= incumbent.cost() {
                    stats.pruned_by_bound += 1;
                    continue;
                }
                if !child.is_valid_partial(graph) {
                    stats.pruned_invalid += 1;
                    continue;
                }

                self.explore(child, incumbent, cutoff, stats)?;
            }
        }

        ControlFlow::Continue(())
    }

    fn close_leaf(&self, state: &ScheduleState, incumbent: &mut Incumbent, stats: &mut SearchStats) {
        let graph: &TaskGraph = &self.instance.graph;
        if !state.is_valid_final(graph) {
            stats.rejected_final += 1;
            return;
        }
        let cost = state.cost(graph);
        if incumbent.offer(state, cost) {
            stats.improvements += 1;
            debug!(cost, nodes = stats.nodes, "new incumbent");
        }
    }
}

/// Solves `instance` with `config`. Shorthand for [`BranchAndBound::solve`].
pub fn solve(instance: &Instance, config: SearchConfig) -> SearchOutcome {
    BranchAndBound::new(instance, config).solve()
}
