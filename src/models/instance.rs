//! Problem instance: a task graph on a fixed pool of identical processors.

use super::{Task, TaskGraph};
use crate::error::Result;
use crate::validation::validate_processors;

/// A validated scheduling instance.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Precedence graph.
    pub graph: TaskGraph,
    /// Number of identical processors (at least 1).
    pub processors: usize,
}

impl Instance {
    /// Validates tasks and processor count and builds the instance.
    ///
    /// # Errors
    /// [`Error::Rejected`](crate::Error::Rejected) with every structural
    /// problem found in either part.
    pub fn new(tasks: Vec<Task>, processors: usize) -> Result<Self> {
        let processor_errors = validate_processors(processors).err().unwrap_or_default();
        match TaskGraph::new(tasks) {
            Ok(graph) if processor_errors.is_empty() => Ok(Self { graph, processors }),
            Ok(_) => Err(processor_errors.into()),
            Err(mut errors) => {
                errors.extend(processor_errors);
                Err(errors.into())
            }
        }
    }

    /// Number of tasks.
    pub fn task_count(&self) -> usize {
        self.graph.len()
    }
}
