//! Search configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dispatching::Priority;

/// Budget used when none is given.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(10);

/// Branch-and-bound settings.
///
/// The three strategy toggles only change how fast good schedules are
/// found; none of them changes which schedules are feasible or their cost.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use u_tardiness::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_time_budget(Duration::from_millis(500))
///     .with_lookahead(false);
/// assert!(!config.lookahead);
/// assert!(config.layering);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Wall-clock budget, measured from the start of `solve`.
    pub time_budget: Duration,
    /// Reject placements whose unscheduled predecessors can no longer fit.
    pub lookahead: bool,
    /// Reorder candidates by (layer, deadline, duration) at every node.
    pub layering: bool,
    /// Sort processors by end time at every node to merge symmetric branches.
    pub processor_sort: bool,
    /// Urgency rule applied after the topological layer when ordering candidates.
    pub priority: Priority,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_budget: DEFAULT_TIME_BUDGET,
            lookahead: true,
            layering: true,
            processor_sort: true,
            priority: Priority::Edd,
        }
    }
}

impl SearchConfig {
    /// Plain enumeration: every strategy toggle off.
    pub fn exhaustive() -> Self {
        Self {
            lookahead: false,
            layering: false,
            processor_sort: false,
            ..Self::default()
        }
    }

    /// Sets the wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Enables or disables the lookahead consistency check.
    pub fn with_lookahead(mut self, enabled: bool) -> Self {
        self.lookahead = enabled;
        self
    }

    /// Enables or disables topological candidate ordering.
    pub fn with_layering(mut self, enabled: bool) -> Self {
        self.layering = enabled;
        self
    }

    /// Enables or disables processor canonicalization.
    pub fn with_processor_sort(mut self, enabled: bool) -> Self {
        self.processor_sort = enabled;
        self
    }

    /// Sets the urgency rule used for candidate ordering.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.time_budget, DEFAULT_TIME_BUDGET);
        assert!(config.lookahead && config.layering && config.processor_sort);

        let plain = SearchConfig::exhaustive();
        assert!(!plain.lookahead && !plain.layering && !plain.processor_sort);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"lookahead": false}"#).unwrap();
        assert!(!config.lookahead);
        assert!(config.layering);
        assert_eq!(config.time_budget, DEFAULT_TIME_BUDGET);
        assert_eq!(config.priority, Priority::Edd);
    }

    #[test]
    fn test_priority_from_json() {
        let config: SearchConfig = serde_json::from_str(r#"{"priority": "atc"}"#).unwrap();
        assert_eq!(config.priority, Priority::Atc);
        assert!(serde_json::from_str::<SearchConfig>(r#"{"priority": "fifo"}"#).is_err());
    }
}
