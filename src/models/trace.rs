//! Simulation trace model.
//!
//! A trace is the tick-by-tick record of which job held the processor,
//! plus the execution spans the dispatcher closed along the way.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{JobId, Tick};

/// Output id for a tick with no running job.
pub const IDLE_SENTINEL: i64 = -1;

/// Which ready queue a job was dispatched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueSelection {
    /// The first-touch FIFO.
    Arrival,
    /// A leveled queue, 0 = highest precedence.
    Level(usize),
}

impl fmt::Display for QueueSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arrival => f.write_str("arrival"),
            Self::Level(level) => write!(f, "level {level}"),
        }
    }
}

/// Processor occupancy at one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Simulated tick.
    pub tick: Tick,
    /// Running job, `None` when idle.
    pub job: Option<JobId>,
}

impl TraceRecord {
    /// Job id as written to the output, [`IDLE_SENTINEL`] when idle.
    #[inline]
    pub fn output_id(&self) -> i64 {
        self.job.map_or(IDLE_SENTINEL, |id| id as i64)
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tick, self.output_id())
    }
}

/// One continuous execution of a job, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSpan {
    /// Job that ran.
    pub job: JobId,
    /// First tick of the span (inclusive).
    pub start: Tick,
    /// Expiry tick (exclusive).
    pub end: Tick,
    /// Queue the job was dispatched from.
    pub source: QueueSelection,
}

impl RunSpan {
    /// Service delivered during this span.
    #[inline]
    pub fn elapsed(&self) -> Tick {
        self.end - self.start
    }
}

/// A complete simulation trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// One record per tick, in tick order.
    pub records: Vec<TraceRecord>,
    /// Closed execution spans, in expiry order.
    pub spans: Vec<RunSpan>,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks recorded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Last simulated tick.
    pub fn last_tick(&self) -> Option<Tick> {
        self.records.last().map(|r| r.tick)
    }

    /// Running job at a tick.
    pub fn running_at(&self, tick: Tick) -> Option<JobId> {
        self.records
            .get(usize::try_from(tick).ok()?)
            .and_then(|r| r.job)
    }

    /// Spans of one job, in execution order.
    pub fn spans_for(&self, job: JobId) -> impl Iterator<Item = &RunSpan> {
        self.spans.iter().filter(move |s| s.job == job)
    }

    /// Total service delivered to a job.
    pub fn service_for(&self, job: JobId) -> Tick {
        self.spans_for(job).map(RunSpan::elapsed).sum()
    }

    /// Tick of a job's first dispatch.
    pub fn first_dispatch(&self, job: JobId) -> Option<Tick> {
        self.spans_for(job).map(|s| s.start).min()
    }

    /// Tick at which a job's last span ended.
    pub fn completion_tick(&self, job: JobId) -> Option<Tick> {
        self.spans_for(job).map(|s| s.end).max()
    }

    /// Ticks with a running job.
    pub fn busy_ticks(&self) -> usize {
        self.records.iter().filter(|r| r.job.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace() -> Trace {
        Trace {
            records: vec![
                TraceRecord { tick: 0, job: Some(0) },
                TraceRecord { tick: 1, job: Some(0) },
                TraceRecord { tick: 2, job: Some(1) },
                TraceRecord { tick: 3, job: Some(0) },
                TraceRecord { tick: 4, job: None },
            ],
            spans: vec![
                RunSpan { job: 0, start: 0, end: 2, source: QueueSelection::Arrival },
                RunSpan { job: 1, start: 2, end: 3, source: QueueSelection::Arrival },
                RunSpan { job: 0, start: 3, end: 4, source: QueueSelection::Level(0) },
            ],
        }
    }

    #[test]
    fn test_record_display() {
        assert_eq!(TraceRecord { tick: 7, job: Some(3) }.to_string(), "7 3");
        assert_eq!(TraceRecord { tick: 8, job: None }.to_string(), "8 -1");
    }

    #[test]
    fn test_span_queries() {
        let trace = sample_trace();
        assert_eq!(trace.service_for(0), 3);
        assert_eq!(trace.service_for(1), 1);
        assert_eq!(trace.first_dispatch(0), Some(0));
        assert_eq!(trace.completion_tick(0), Some(4));
        assert_eq!(trace.completion_tick(2), None);
    }

    #[test]
    fn test_record_queries() {
        let trace = sample_trace();
        assert_eq!(trace.len(), 5);
        assert_eq!(trace.last_tick(), Some(4));
        assert_eq!(trace.running_at(2), Some(1));
        assert_eq!(trace.running_at(4), None);
        assert_eq!(trace.running_at(99), None);
        assert_eq!(trace.busy_ticks(), 4);
    }

    #[test]
    fn test_selection_display() {
        assert_eq!(QueueSelection::Arrival.to_string(), "arrival");
        assert_eq!(QueueSelection::Level(1).to_string(), "level 1");
    }
}
