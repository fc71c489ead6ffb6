//! Random instance generator.
//!
//! Produces acyclic instances by only drawing predecessors among lower ids.
//! Deadlines are spread over a horizon derived from the total work divided
//! by the processor count, scaled by `tightness`: values below 1.0 make most
//! tasks late, values above 1.0 leave room to meet them.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Instance, Task, TaskId, Time};

/// Shape of generated instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    pub tasks: usize,
    pub processors: usize,
    pub min_duration: Time,
    pub max_duration: Time,
    /// Chance that a lower-id task becomes a predecessor.
    pub edge_probability: f64,
    pub max_predecessors: usize,
    /// Deadline horizon factor.
    pub tightness: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            tasks: 10,
            processors: 2,
            min_duration: 1,
            max_duration: 10,
            edge_probability: 0.2,
            max_predecessors: 3,
            tightness: 0.8,
        }
    }
}

impl GeneratorParams {
    pub fn new(tasks: usize, processors: usize) -> Self {
        Self {
            tasks,
            processors,
            ..Self::default()
        }
    }

    pub fn with_durations(mut self, min: Time, max: Time) -> Self {
        self.min_duration = min;
        self.max_duration = max;
        self
    }

    pub fn with_edge_probability(mut self, probability: f64) -> Self {
        self.edge_probability = unit_probability(probability);
        self
    }

    pub fn with_max_predecessors(mut self, max: usize) -> Self {
        self.max_predecessors = max;
        self
    }

    pub fn with_tightness(mut self, tightness: f64) -> Self {
        self.tightness = tightness.max(0.0);
        self
    }
}

/// Draws an instance from `rng`.
///
/// Durations are clamped to at least 1. The instance still goes through
/// validation, so zero tasks or zero processors are rejected.
pub fn generate<R: Rng + ?Sized>(params: &GeneratorParams, rng: &mut R) -> Result<Instance> {
    let min_duration = params.min_duration.max(1);
    let max_duration = params.max_duration.max(min_duration);
    let probability = unit_probability(params.edge_probability);

    let durations: Vec<Time> = (0..params.tasks)
        .map(|_| rng.random_range(min_duration..=max_duration))
        .collect();

    let total: Time = durations.iter().copied().fold(0, Time::saturating_add);
    let horizon = (total as f64 / params.processors.max(1) as f64 * params.tightness).ceil() as Time;

    let mut tasks = Vec::with_capacity(params.tasks);
    for (index, &duration) in durations.iter().enumerate() {
        let id: TaskId = index + 1;
        let mut predecessors = Vec::new();
        for candidate in 1..id {
            if predecessors.len() >= params.max_predecessors {
                break;
            }
            if rng.random_bool(probability) {
                predecessors.push(candidate);
            }
        }
        let deadline = rng.random_range(0..=horizon.max(0));
        tasks.push(Task::new(id, duration, deadline).with_predecessors(predecessors));
    }

    Instance::new(tasks, params.processors)
}

/// Clamps to `0.0..=1.0`; NaN and infinities become 0.0.
fn unit_probability(p: f64) -> f64 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Deterministic variant of [`generate`].
///
/// # Example
/// ```
/// use u_tardiness::generator::{generate_seeded, GeneratorParams};
///
/// let params = GeneratorParams::new(8, 3);
/// let a = generate_seeded(&params, 7).unwrap();
/// let b = generate_seeded(&params, 7).unwrap();
/// assert!(a.graph.tasks().eq(b.graph.tasks()));
/// assert_eq!(a.processors, 3);
/// ```
pub fn generate_seeded(params: &GeneratorParams, seed: u64) -> Result<Instance> {
    let mut rng = SmallRng::seed_from_u64(seed);
    generate(params, &mut rng)
}
