//! Scheduling context for dispatching rule evaluation.

use crate::models::{TaskId, Time};

/// Runtime state passed to dispatching rules.
///
/// Carries the current clock, the topological layer of each task in the
/// remaining sub-DAG, and the average processing time used by ATC.
#[derive(Debug, Clone, Default)]
pub struct SchedulingContext {
    /// Current time, usually the earliest processor end.
    pub current_time: Time,
    /// Topological layer per task, slot `id - 1`.
    pub layers: Vec<usize>,
    /// Average processing time across candidate tasks (for ATC normalization).
    pub average_processing_time: Option<f64>,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: Time) -> Self {
        Self {
            current_time,
            ..Default::default()
        }
    }

    /// Sets the full layer table.
    pub fn with_layers(mut self, layers: Vec<usize>) -> Self {
        self.layers = layers;
        self
    }

    /// Sets the layer of a single task.
    pub fn with_layer(mut self, task_id: TaskId, layer: usize) -> Self {
        if self.layers.len() < task_id {
            self.layers.resize(task_id, 0);
        }
        self.layers[task_id - 1] = layer;
        self
    }

    /// Sets the average processing time.
    pub fn with_average_processing_time(mut self, avg: f64) -> Self {
        self.average_processing_time = Some(avg);
        self
    }

    /// Layer of a task; tasks without an entry are treated as sources.
    pub fn layer(&self, task_id: TaskId) -> usize {
        task_id
            .checked_sub(1)
            .and_then(|slot| self.layers.get(slot))
            .copied()
            .unwrap_or(0)
    }
}
