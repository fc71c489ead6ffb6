//! Dispatching rules and rule engine for candidate ordering.
//!
//! The search engine and the greedy baseline both decide *which task to try
//! next* through a [`RuleEngine`]. The default chain is topological layer,
//! then earliest due date, then shortest processing time, then task ID.
//!
//! # Usage
//!
//! ```
//! use u_tardiness::dispatching::{RuleEngine, SchedulingContext};
//! use u_tardiness::dispatching::rules;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Edd)
//!     .with_tie_breaker(rules::Spt);
//!
//! let context = SchedulingContext::at_time(0);
//! assert!(engine.sort_indices(&[], &context).is_empty());
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::{RuleEngine, TieBreaker};

use std::fmt::{self, Debug};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (tried first).
pub type RuleScore = f64;

/// A dispatching rule that evaluates task priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for tasks that should be tried first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "EDD").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a task given the current scheduling context.
    fn evaluate(&self, task: &Task, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Urgency criterion tried right after the topological layer.
///
/// ```
/// use u_tardiness::dispatching::Priority;
///
/// assert_eq!("slack".parse::<Priority>(), Ok(Priority::Slack));
/// assert_eq!(Priority::Atc.to_string(), "atc");
/// assert!("fifo".parse::<Priority>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Earliest due date.
    #[default]
    Edd,
    /// Minimum slack against the current clock.
    Slack,
    /// Apparent tardiness cost.
    Atc,
    /// Shortest processing time.
    Spt,
    /// Longest processing time.
    Lpt,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::Edd,
        Priority::Slack,
        Priority::Atc,
        Priority::Spt,
        Priority::Lpt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Priority::Edd => "edd",
            Priority::Slack => "slack",
            Priority::Atc => "atc",
            Priority::Spt => "spt",
            Priority::Lpt => "lpt",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = Priority::ALL.iter().map(|p| p.name()).collect();
                format!("unknown priority `{s}` (expected one of: {})", known.join(", "))
            })
    }
}
