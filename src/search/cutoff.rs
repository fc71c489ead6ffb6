//! Cooperative stopping criteria.
//!
//! The engine polls its cutoff once at the top of every search node. When
//! the cutoff says stop, the whole search unwinds and the incumbent is
//! reported.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Decides when the search must stop.
pub trait Cutoff {
    /// Polled at every node; `true` aborts the whole search.
    fn must_stop(&self) -> bool;
}

/// Never stops; the search runs until the tree is exhausted.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoCutoff;

impl Cutoff for NoCutoff {
    fn must_stop(&self) -> bool {
        false
    }
}

/// Stops once a wall-clock budget has elapsed.
///
/// The deadline is fixed when the budget is created. A zero budget stops at
/// the first poll; a budget too large to represent never expires.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    deadline: Option<Instant>,
}

impl TimeBudget {
    pub fn new(budget: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(budget),
        }
    }
}

impl Cutoff for TimeBudget {
    fn must_stop(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Stops after a fixed number of polls. Deterministic, unlike [`TimeBudget`].
#[derive(Debug, Clone)]
pub struct NodeLimit {
    limit: usize,
    polled: Cell<usize>,
}

impl NodeLimit {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            polled: Cell::new(0),
        }
    }
}

impl Cutoff for NodeLimit {
    fn must_stop(&self) -> bool {
        let polled = self.polled.get();
        self.polled.set(polled + 1);
        polled >= self.limit
    }
}
