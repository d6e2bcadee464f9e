//! Arrival calendar.
//!
//! Holds one arrival event per job, sorted by tick at construction. Each
//! tick the dispatcher drains exactly the events due at that tick.

use std::collections::VecDeque;

use crate::models::{Job, JobId, Tick};

/// A job becoming eligible to run at a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalEvent {
    /// Tick at which the job arrives.
    pub tick: Tick,
    /// Arriving job.
    pub job: JobId,
}

/// Pending arrivals in `(tick, job id)` order.
#[derive(Debug, Clone, Default)]
pub struct ArrivalCalendar {
    events: VecDeque<ArrivalEvent>,
}

impl ArrivalCalendar {
    /// Builds the calendar from the job list.
    ///
    /// Input order does not need to follow arrival order; ties on the same
    /// tick keep ascending job id.
    pub fn new(jobs: &[Job]) -> Self {
        let mut events: Vec<ArrivalEvent> = jobs
            .iter()
            .map(|job| ArrivalEvent {
                tick: job.arrival_tick,
                job: job.id,
            })
            .collect();
        events.sort_by(|a, b| a.tick.cmp(&b.tick).then_with(|| a.job.cmp(&b.job)));
        Self {
            events: events.into(),
        }
    }

    /// Removes and returns every event due at `now`.
    ///
    /// Events are drained in order, so an event for an earlier tick left
    /// at the front means a tick was skipped.
    pub fn drain_due(&mut self, now: Tick) -> Vec<JobId> {
        debug_assert!(
            self.events.front().map_or(true, |e| e.tick >= now),
            "arrival at tick {:?} was never admitted (now = {now})",
            self.events.front().map(|e| e.tick)
        );

        let due = self.events.iter().take_while(|e| e.tick == now).count();
        self.events.drain(..due).map(|e| e.job).collect()
    }

    /// Tick of the next pending arrival.
    pub fn next_tick(&self) -> Option<Tick> {
        self.events.front().map(|e| e.tick)
    }

    /// Events not yet admitted.
    pub fn pending(&self) -> &VecDeque<ArrivalEvent> {
        &self.events
    }

    /// Number of events not yet admitted.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether every event has been admitted.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
