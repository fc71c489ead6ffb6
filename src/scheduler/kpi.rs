//! Schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest completion time |
//! | Total Tardiness | Sum of max(0, completion - deadline) |
//! | Maximum Tardiness | Largest single delay |
//! | On-Time Rate | Fraction meeting deadlines |
//! | Avg Utilization | Mean processor busyness |
//! | Avg Flow Time | Mean completion time (all tasks released at 0) |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::Serialize;

use crate::models::{Schedule, TaskGraph, Time};

/// Schedule performance indicators.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleKpi {
    /// Latest completion time.
    pub makespan: Time,
    /// Sum of tardiness across all tasks.
    pub total_tardiness: Time,
    /// Maximum tardiness of any single task.
    pub max_tardiness: Time,
    /// Number of tasks completing after their deadline.
    pub tardy_tasks: usize,
    /// Fraction of tasks completing on time (0.0..1.0).
    pub on_time_rate: f64,
    /// Average processor utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Utilization per processor index.
    pub utilization_by_processor: Vec<f64>,
    /// Mean completion time.
    pub avg_flow_time: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and its task graph.
    ///
    /// Tasks of the graph missing from the schedule are ignored.
    pub fn calculate(schedule: &Schedule, graph: &TaskGraph) -> Self {
        let mut total_tardiness: Time = 0;
        let mut max_tardiness: Time = 0;
        let mut tardy_tasks: usize = 0;
        let mut total_flow_time: f64 = 0.0;
        let mut counted_tasks: usize = 0;

        for task in graph.tasks() {
            if let Some(completion) = schedule.task_completion_time(task.id) {
                counted_tasks += 1;
                total_flow_time += completion as f64;

                let tardiness = task.tardiness(completion);
                if tardiness > 0 {
                    tardy_tasks += 1;
                    total_tardiness += tardiness;
                    max_tardiness = max_tardiness.max(tardiness);
                }
            }
        }

        let utilization_by_processor = schedule.all_utilizations();
        let avg_utilization = if utilization_by_processor.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_processor.iter().sum();
            sum / utilization_by_processor.len() as f64
        };

        let (on_time_rate, avg_flow_time) = if counted_tasks == 0 {
            (1.0, 0.0)
        } else {
            (
                (counted_tasks - tardy_tasks) as f64 / counted_tasks as f64,
                total_flow_time / counted_tasks as f64,
            )
        };

        Self {
            makespan: schedule.makespan(),
            total_tardiness,
            max_tardiness,
            tardy_tasks,
            on_time_rate,
            avg_utilization,
            utilization_by_processor,
            avg_flow_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Task};

    fn graph() -> TaskGraph {
        TaskGraph::new(vec![Task::new(1, 2, 1), Task::new(2, 1, 5), Task::new(3, 2, 2)]).unwrap()
    }

    fn schedule() -> Schedule {
        let mut s = Schedule::with_processors(2);
        s.add_assignment(Assignment::new(1, 0, 0, 2)); // late by 1
        s.add_assignment(Assignment::new(2, 0, 2, 3)); // on time
        s.add_assignment(Assignment::new(3, 1, 0, 2)); // on time
        s
    }

    #[test]
    fn test_kpi_basic() {
        let kpi = ScheduleKpi::calculate(&schedule(), &graph());
        assert_eq!(kpi.makespan, 3);
        assert_eq!(kpi.total_tardiness, 1);
        assert_eq!(kpi.max_tardiness, 1);
        assert_eq!(kpi.tardy_tasks, 1);
        assert!((kpi.on_time_rate - 2.0 / 3.0).abs() < 1e-10);
        assert!((kpi.avg_flow_time - 7.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_utilization() {
        let kpi = ScheduleKpi::calculate(&schedule(), &graph());
        // P0: 3/3, P1: 2/3
        assert!((kpi.utilization_by_processor[0] - 1.0).abs() < 1e-10);
        assert!((kpi.utilization_by_processor[1] - 2.0 / 3.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 5.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_matches_schedule_tardiness() {
        let (s, g) = (schedule(), graph());
        assert_eq!(ScheduleKpi::calculate(&s, &g).total_tardiness, s.total_tardiness(&g));
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&Schedule::with_processors(1), &graph());
        assert_eq!(kpi.makespan, 0);
        assert_eq!(kpi.total_tardiness, 0);
        assert!((kpi.on_time_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.0).abs() < 1e-10);
    }
}
