//! Rule engine: turns a rule chain into a candidate order.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule, Priority, RuleScore, SchedulingContext};
use crate::models::{Task, TaskGraph, TaskId};

/// Last resort once every rule ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep the incoming order.
    #[default]
    NextRule,
    /// Ascending task ID.
    ById,
}

/// Orders candidate tasks by a chain of dispatching rules.
///
/// Scores are computed once per task and compared lexicographically: a
/// later rule only decides when every earlier rule ties.
///
/// # Example
/// ```
/// use u_tardiness::dispatching::{RuleEngine, SchedulingContext};
/// use u_tardiness::models::Task;
///
/// let a = Task::new(1, 4, 10);
/// let b = Task::new(2, 1, 10).with_predecessor(1);
/// let c = Task::new(3, 2, 3);
/// let ctx = SchedulingContext::at_time(0).with_layer(2, 1);
///
/// // layer, then deadline, then duration
/// let order = RuleEngine::layered().sort_indices(&[&a, &b, &c], &ctx);
/// assert_eq!(order, vec![2, 0, 1]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// An engine without rules. Every order it produces is the input order.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::NextRule,
            epsilon: 1e-9,
        }
    }

    /// Topological layer, then EDD, then SPT, then task ID.
    pub fn layered() -> Self {
        Self::layered_by(Priority::Edd)
    }

    /// Topological layer, then `priority`, then EDD and SPT, then task ID.
    pub fn layered_by(priority: Priority) -> Self {
        let engine = Self::new().with_rule(rules::Layer);
        let engine = match priority {
            Priority::Edd => engine,
            Priority::Slack => engine.with_tie_breaker(rules::Mst),
            Priority::Atc => engine.with_tie_breaker(rules::Atc::default()),
            Priority::Spt => engine.with_tie_breaker(rules::Spt),
            Priority::Lpt => engine.with_tie_breaker(rules::Lpt),
        };
        engine
            .with_tie_breaker(rules::Edd)
            .with_tie_breaker(rules::Spt)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Appends a rule to the chain.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Same as [`with_rule`](Self::with_rule); reads better for rules that
    /// exist to separate ties.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// What to do when every rule ties.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Indices of `tasks`, highest priority first. Stable.
    pub fn sort_indices(&self, tasks: &[&Task], context: &SchedulingContext) -> Vec<usize> {
        let keys: Vec<Vec<RuleScore>> = tasks
            .iter()
            .map(|t| self.rules.iter().map(|r| r.evaluate(t, context)).collect())
            .collect();

        let mut indices: Vec<usize> = (0..tasks.len()).collect();
        indices.sort_by(|&a, &b| {
            self.compare_keys(&keys[a], &keys[b])
                .then_with(|| self.final_tie_break(tasks[a], tasks[b]))
        });
        indices
    }

    /// Sorts task IDs of `graph`, highest priority first.
    pub fn sort_ids(&self, ids: &[TaskId], graph: &TaskGraph, context: &SchedulingContext) -> Vec<TaskId> {
        let tasks: Vec<&Task> = ids.iter().map(|&id| graph.task(id)).collect();
        self.sort_indices(&tasks, context)
            .into_iter()
            .map(|i| ids[i])
            .collect()
    }

    fn compare_keys(&self, a: &[RuleScore], b: &[RuleScore]) -> Ordering {
        a.iter()
            .zip(b)
            .find(|(x, y)| (*x - *y).abs() > self.epsilon)
            .map_or(Ordering::Equal, |(x, y)| x.total_cmp(y))
    }

    fn final_tie_break(&self, a: &Task, b: &Task) -> Ordering {
        match self.tie_breaker {
            TieBreaker::NextRule => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::layered()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rules: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("RuleEngine")
            .field("rules", &rules)
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
