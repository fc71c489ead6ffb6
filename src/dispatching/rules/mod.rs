//! Built-in dispatching rules.
//!
//! | Rule | Score (lower first) |
//! |------|---------------------|
//! | LAYER | topological layer in the remaining graph |
//! | SPT / LPT | duration / negated duration |
//! | EDD | deadline |
//! | MST | deadline - clock - duration |
//! | ATC | negated apparent tardiness cost |
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Vepsalainen & Morton (1987), "Priority Rules for Job Shops with
//!   Weighted Tardiness Costs"

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::Task;

/// Topological layer. Sources of the remaining graph come first.
#[derive(Debug, Clone, Copy)]
pub struct Layer;

impl DispatchingRule for Layer {
    fn name(&self) -> &'static str {
        "LAYER"
    }

    fn evaluate(&self, task: &Task, context: &SchedulingContext) -> RuleScore {
        context.layer(task.id) as f64
    }

    fn description(&self) -> &'static str {
        "Topological Layer"
    }
}

/// Shortest Processing Time.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, task: &Task, _context: &SchedulingContext) -> RuleScore {
        task.duration as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Longest Processing Time. Front-loads long tasks so processors level out.
#[derive(Debug, Clone, Copy)]
pub struct Lpt;

impl DispatchingRule for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn evaluate(&self, task: &Task, _context: &SchedulingContext) -> RuleScore {
        -(task.duration as f64)
    }

    fn description(&self) -> &'static str {
        "Longest Processing Time"
    }
}

/// Earliest Due Date.
///
/// Optimal for maximum lateness on one machine (Jackson, 1955).
#[derive(Debug, Clone, Copy)]
pub struct Edd;

impl DispatchingRule for Edd {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(&self, task: &Task, _context: &SchedulingContext) -> RuleScore {
        task.deadline as f64
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}

/// Minimum Slack Time: time left before the deadline once the task has run.
/// Negative slack means the task is already late.
#[derive(Debug, Clone, Copy)]
pub struct Mst;

impl DispatchingRule for Mst {
    fn name(&self) -> &'static str {
        "MST"
    }

    fn evaluate(&self, task: &Task, context: &SchedulingContext) -> RuleScore {
        (task.deadline - context.current_time - task.duration) as f64
    }

    fn description(&self) -> &'static str {
        "Minimum Slack Time"
    }
}

/// Apparent Tardiness Cost with unit weights.
///
/// `ATC = exp(-max(0, slack) / (k * p_avg)) / p`. Behaves like SPT for
/// tasks that are already late and decays towards zero for tasks with a
/// lot of slack. `p_avg` comes from the context and falls back to the
/// task's own duration.
#[derive(Debug, Clone, Copy)]
pub struct Atc {
    /// Look-ahead scaling (default 2.0).
    pub k: f64,
}

impl Default for Atc {
    fn default() -> Self {
        Self { k: 2.0 }
    }
}

impl Atc {
    pub fn with_k(k: f64) -> Self {
        Self { k }
    }
}

impl DispatchingRule for Atc {
    fn name(&self) -> &'static str {
        "ATC"
    }

    fn evaluate(&self, task: &Task, context: &SchedulingContext) -> RuleScore {
        let p = task.duration as f64;
        if p <= 0.0 {
            return f64::MAX;
        }

        let slack = ((task.deadline - context.current_time) as f64 - p).max(0.0);
        let p_avg = context.average_processing_time.unwrap_or(p).max(1.0);
        let cost = (-slack / (self.k * p_avg)).exp() / p;

        -cost
    }

    fn description(&self) -> &'static str {
        "Apparent Tardiness Cost"
    }
}
