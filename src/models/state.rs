//! Search-node state.
//!
//! A [`ScheduleState`] holds one timeline per processor, the scheduled record
//! of every placed task, and the ordered list of tasks still to place. The
//! search engine clones it on every branch, so siblings never share data.
//!
//! # No idle slack
//! A task always starts exactly when the previous task on its processor
//! ends (or at 0). A processor is never left idle to wait for a predecessor
//! running elsewhere.

use super::{Assignment, Schedule, TaskGraph, TaskId, Time};

/// One entry of a processor timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    pub task_id: TaskId,
    pub start: Time,
}

/// Where and when a placed task runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledRecord {
    pub start: Time,
    /// `start + duration`.
    pub end: Time,
    pub processor: usize,
}

/// Mutable payload of a search node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleState {
    timelines: Vec<Vec<TimelineEntry>>,
    /// Slot `id - 1`; `None` while unscheduled.
    records: Vec<Option<ScheduledRecord>>,
    unscheduled: Vec<TaskId>,
}

impl ScheduleState {
    /// Root state: empty timelines, every task unscheduled in ID order.
    pub fn new(graph: &TaskGraph, processors: usize) -> Self {
        Self {
            timelines: vec![Vec::new(); processors],
            records: vec![None; graph.len()],
            unscheduled: graph.ids().collect(),
        }
    }

    /// Appends `task` to `processor` at the processor's current end time.
    ///
    /// Performs no validity checks; callers probe and reject afterwards.
    ///
    /// # Panics
    /// Panics if `processor` or `task` is out of range.
    pub fn schedule_task(&mut self, graph: &TaskGraph, processor: usize, task: TaskId) {
        let start = self.processor_end(processor);
        let end = start + graph.duration(task);

        self.timelines[processor].push(TimelineEntry {
            task_id: task,
            start,
        });
        self.records[task - 1] = Some(ScheduledRecord {
            start,
            end,
            processor,
        });
        self.unscheduled.retain(|&t| t != task);
    }

    /// Total tardiness of the scheduled tasks.
    pub fn cost(&self, graph: &TaskGraph) -> Time {
        self.scheduled()
            .map(|(id, r)| graph.task(id).tardiness(r.end))
            .sum()
    }

    /// Whether every scheduled predecessor of every scheduled task ends
    /// no later than that task starts. Unscheduled predecessors are ignored.
    pub fn is_valid_partial(&self, graph: &TaskGraph) -> bool {
        self.scheduled().all(|(id, record)| {
            graph.predecessors(id).iter().all(|&pred| match self.record(pred) {
                Some(p) => p.end <= record.start,
                None => true,
            })
        })
    }

    /// Whether every task is scheduled and every precedence edge is respected.
    pub fn is_valid_final(&self, graph: &TaskGraph) -> bool {
        graph.tasks().all(|task| {
            let Some(record) = self.record(task.id) else {
                return false;
            };
            task.predecessors
                .iter()
                .all(|&pred| matches!(self.record(pred), Some(p) if p.end <= record.start))
        })
    }

    /// Reorders processors by the end time of their last task (empty first).
    ///
    /// Processors are identical, so the permutation changes neither cost nor
    /// feasibility; it only merges branches that differ by a relabeling.
    /// Record processor indices are rewritten to match.
    pub fn canonicalize_processor_order(&mut self) {
        let mut order: Vec<usize> = (0..self.timelines.len()).collect();
        order.sort_by_key(|&p| self.processor_end(p));

        let mut timelines = Vec::with_capacity(order.len());
        for (new_index, &old_index) in order.iter().enumerate() {
            let timeline = std::mem::take(&mut self.timelines[old_index]);
            for entry in &timeline {
                if let Some(record) = self.records[entry.task_id - 1].as_mut() {
                    record.processor = new_index;
                }
            }
            timelines.push(timeline);
        }
        self.timelines = timelines;
    }

    /// Number of processors.
    #[inline]
    pub fn processor_count(&self) -> usize {
        self.timelines.len()
    }

    /// End time of the last task on `processor`, or 0 if it is empty.
    pub fn processor_end(&self, processor: usize) -> Time {
        self.last_task_on(processor)
            .and_then(|t| self.record(t))
            .map_or(0, |r| r.end)
    }

    /// Last task committed to `processor`.
    pub fn last_task_on(&self, processor: usize) -> Option<TaskId> {
        self.timelines[processor].last().map(|e| e.task_id)
    }

    /// Timeline of one processor in commit order.
    pub fn timeline(&self, processor: usize) -> &[TimelineEntry] {
        &self.timelines[processor]
    }

    /// Record of a placed task.
    #[inline]
    pub fn record(&self, task: TaskId) -> Option<&ScheduledRecord> {
        self.records.get(task.wrapping_sub(1)).and_then(Option::as_ref)
    }

    #[inline]
    pub fn is_scheduled(&self, task: TaskId) -> bool {
        self.record(task).is_some()
    }

    /// Placed tasks with their records, in ascending ID order.
    pub fn scheduled(&self) -> impl Iterator<Item = (TaskId, &ScheduledRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(slot, r)| r.as_ref().map(|r| (slot + 1, r)))
    }

    pub fn scheduled_count(&self) -> usize {
        self.records.len() - self.unscheduled.len()
    }

    /// Tasks still to place, in candidate order.
    pub fn unscheduled(&self) -> &[TaskId] {
        &self.unscheduled
    }

    /// Replaces the candidate order.
    ///
    /// `order` must be a permutation of the current unscheduled set.
    pub fn set_unscheduled_order(&mut self, order: Vec<TaskId>) {
        debug_assert_eq!(order.len(), self.unscheduled.len());
        self.unscheduled = order;
    }

    /// Whether every task has been placed.
    #[inline]
    pub fn is_final(&self) -> bool {
        self.unscheduled.is_empty()
    }

    /// Projects the state onto a [`Schedule`], processor by processor.
    pub fn to_schedule(&self) -> Schedule {
        let mut schedule = Schedule::with_processors(self.processor_count());
        for (processor, timeline) in self.timelines.iter().enumerate() {
            for entry in timeline {
                if let Some(r) = self.record(entry.task_id) {
                    schedule.add_assignment(Assignment::new(
                        entry.task_id,
                        processor,
                        r.start,
                        r.end,
                    ));
                }
            }
        }
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;

    fn chain_graph() -> TaskGraph {
        TaskGraph::new(vec![
            Task::new(1, 2, 5),
            Task::new(2, 3, 4).with_predecessor(1),
            Task::new(3, 1, 10),
        ])
        .unwrap()
    }

    #[test]
    fn test_root_state() {
        let graph = chain_graph();
        let state = ScheduleState::new(&graph, 2);
        assert_eq!(state.processor_count(), 2);
        assert_eq!(state.unscheduled(), &[1, 2, 3]);
        assert_eq!(state.scheduled_count(), 0);
        assert_eq!(state.cost(&graph), 0);
        assert!(state.is_valid_partial(&graph));
        assert!(!state.is_valid_final(&graph));
    }

    #[test]
    fn test_schedule_task_appends_back_to_back() {
        let graph = chain_graph();
        let mut state = ScheduleState::new(&graph, 1);
        state.schedule_task(&graph, 0, 1);
        state.schedule_task(&graph, 0, 3);

        assert_eq!(
            state.timeline(0),
            &[
                TimelineEntry { task_id: 1, start: 0 },
                TimelineEntry { task_id: 3, start: 2 },
            ]
        );
        assert_eq!(
            state.record(3),
            Some(&ScheduledRecord {
                start: 2,
                end: 3,
                processor: 0
            })
        );
        assert_eq!(state.unscheduled(), &[2]);
        assert_eq!(state.processor_end(0), 3);
        assert_eq!(state.last_task_on(0), Some(3));
    }

    #[test]
    fn test_cost_is_total_tardiness() {
        let graph = chain_graph();
        let mut state = ScheduleState::new(&graph, 1);
        for t in [1, 3, 2] {
            state.schedule_task(&graph, 0, t);
        }
        // ends 2, 3, 6 → task 2 late by 2
        assert_eq!(state.cost(&graph), 2);
        assert_eq!(state.cost(&graph), state.cost(&graph));
    }

    #[test]
    fn test_cost_never_decreases() {
        let graph = chain_graph();
        let mut state = ScheduleState::new(&graph, 2);
        let mut last = state.cost(&graph);
        for (p, t) in [(0, 1), (0, 2), (1, 3)] {
            state.schedule_task(&graph, p, t);
            let cost = state.cost(&graph);
            assert!(cost >= last);
            last = cost;
        }
    }

    #[test]
    fn test_partial_validity() {
        let graph = chain_graph();
        let mut state = ScheduleState::new(&graph, 2);
        // Task 2 first: its predecessor is unscheduled, not a violation yet.
        state.schedule_task(&graph, 0, 2);
        assert!(state.is_valid_partial(&graph));
        // Task 1 now ends at 2 > start 0 of task 2.
        state.schedule_task(&graph, 1, 1);
        assert!(!state.is_valid_partial(&graph));
    }

    #[test]
    fn test_final_validity() {
        let graph = chain_graph();
        let mut state = ScheduleState::new(&graph, 2);
        state.schedule_task(&graph, 0, 1);
        state.schedule_task(&graph, 0, 2);
        assert!(!state.is_valid_final(&graph));
        state.schedule_task(&graph, 1, 3);
        assert!(state.is_final());
        assert!(state.is_valid_final(&graph));

        let mut bad = ScheduleState::new(&graph, 2);
        bad.schedule_task(&graph, 0, 1);
        bad.schedule_task(&graph, 1, 2);
        bad.schedule_task(&graph, 1, 3);
        assert!(bad.is_final());
        assert!(!bad.is_valid_final(&graph));
    }

    #[test]
    fn test_canonicalize_keeps_records_consistent() {
        let graph = chain_graph();
        let mut state = ScheduleState::new(&graph, 3);
        state.schedule_task(&graph, 0, 1); // end 2
        state.schedule_task(&graph, 0, 2); // end 5
        state.schedule_task(&graph, 1, 3); // end 1
        let cost = state.cost(&graph);

        state.canonicalize_processor_order();

        assert!(state.timeline(0).is_empty());
        assert_eq!(state.timeline(1)[0].task_id, 3);
        assert_eq!(state.timeline(2).len(), 2);
        assert_eq!(state.record(3).unwrap().processor, 1);
        assert_eq!(state.record(1).unwrap().processor, 2);
        assert_eq!(state.record(2).unwrap().processor, 2);
        assert_eq!(state.cost(&graph), cost);
    }

    #[test]
    fn test_clone_isolates_siblings() {
        let graph = chain_graph();
        let parent = ScheduleState::new(&graph, 1);
        let mut child = parent.clone();
        child.schedule_task(&graph, 0, 1);
        assert_eq!(parent.scheduled_count(), 0);
        assert_eq!(child.scheduled_count(), 1);
    }

    #[test]
    fn test_to_schedule() {
        let graph = chain_graph();
        let mut state = ScheduleState::new(&graph, 2);
        state.schedule_task(&graph, 0, 1);
        state.schedule_task(&graph, 1, 3);
        state.schedule_task(&graph, 0, 2);

        let schedule = state.to_schedule();
        assert_eq!(schedule.processor_count, 2);
        assert_eq!(schedule.sequence(0), vec![1, 2]);
        assert_eq!(schedule.sequence(1), vec![3]);
        assert_eq!(schedule.assignment_for_task(2).unwrap().start, 2);
    }
}
