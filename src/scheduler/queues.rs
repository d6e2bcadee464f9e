//! Ready queue set.
//!
//! One FIFO for jobs that have arrived but never run, plus one queue per
//! priority level for jobs that already consumed a quantum. The arrival
//! queue is never reordered; a level is re-sorted by the rule engine right
//! before a job is pulled from it.

use std::collections::VecDeque;

use crate::dispatching::RuleEngine;
use crate::models::{JobId, JobTable, QueueSelection};

/// Arrival queue plus leveled queues, with membership tracking.
#[derive(Debug, Clone)]
pub struct ReadyQueues {
    arrival: VecDeque<JobId>,
    levels: Vec<VecDeque<JobId>>,
    // Indexed by JobId; a job is in at most one queue.
    location: Vec<Option<QueueSelection>>,
}

impl ReadyQueues {
    /// Creates empty queues for `num_levels` levels and `num_jobs` jobs.
    pub fn new(num_levels: usize, num_jobs: usize) -> Self {
        Self {
            arrival: VecDeque::new(),
            levels: vec![VecDeque::new(); num_levels],
            location: vec![None; num_jobs],
        }
    }

    /// Appends a newly arrived job to the arrival queue.
    pub fn admit(&mut self, job: JobId) {
        self.mark(job, QueueSelection::Arrival);
        self.arrival.push_back(job);
    }

    /// Appends a job whose quantum expired to a leveled queue.
    pub fn requeue(&mut self, job: JobId, level: usize) {
        self.mark(job, QueueSelection::Level(level));
        self.levels[level].push_back(job);
    }

    fn mark(&mut self, job: JobId, target: QueueSelection) {
        let slot = &mut self.location[job];
        assert!(
            slot.is_none(),
            "job {job} already present in {:?}, cannot enter {target}",
            slot
        );
        *slot = Some(target);
    }

    /// Picks the queue to dispatch from.
    ///
    /// The arrival queue always wins; otherwise the lowest-numbered
    /// non-empty level. `None` when every queue is empty.
    pub fn select(&self) -> Option<QueueSelection> {
        if !self.arrival.is_empty() {
            return Some(QueueSelection::Arrival);
        }
        self.levels
            .iter()
            .position(|q| !q.is_empty())
            .map(QueueSelection::Level)
    }

    /// Removes the head of the selected queue.
    ///
    /// Leveled queues are sorted by `engine` first; the arrival queue is
    /// taken as is.
    pub fn pop(
        &mut self,
        selection: QueueSelection,
        engine: &RuleEngine,
        table: &JobTable,
    ) -> Option<JobId> {
        let job = match selection {
            QueueSelection::Arrival => self.arrival.pop_front(),
            QueueSelection::Level(level) => {
                let queue = &mut self.levels[level];
                engine.sort_queue(queue, table);
                queue.pop_front()
            }
        }?;

        let removed = self.location[job].take();
        debug_assert_eq!(removed, Some(selection), "job {job} membership out of sync");
        Some(job)
    }

    /// Contents of one queue, front first.
    pub fn queue(&self, selection: QueueSelection) -> &VecDeque<JobId> {
        match selection {
            QueueSelection::Arrival => &self.arrival,
            QueueSelection::Level(level) => &self.levels[level],
        }
    }

    /// Queue currently holding a job.
    pub fn location(&self, job: JobId) -> Option<QueueSelection> {
        self.location.get(job).copied().flatten()
    }

    /// Number of leveled queues.
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Total number of queued jobs.
    pub fn len(&self) -> usize {
        self.arrival.len() + self.levels.iter().map(VecDeque::len).sum::<usize>()
    }

    /// Whether every queue is empty.
    pub fn is_empty(&self) -> bool {
        self.arrival.is_empty() && self.levels.iter().all(VecDeque::is_empty)
    }
}
