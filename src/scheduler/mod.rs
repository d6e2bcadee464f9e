//! MLFQ simulation core and KPI evaluation.
//!
//! # Algorithm
//!
//! Each tick the [`Dispatcher`] admits due arrivals, resolves quantum
//! expiry for the running job, dispatches a new job if the processor is
//! idle, and emits one trace record. Jobs get a first, generous quantum
//! from the arrival queue; once it expires they are requeued into a leveled
//! queue where the job nearest completion runs next.
//!
//! # KPI
//!
//! [`SimulationKpi`] computes wait, response, and turnaround metrics from a
//! finished trace.
//!
//! # References
//!
//! - Corbató et al. (1962), "An Experimental Time-Sharing System"
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 8

mod calendar;
mod dispatcher;
mod kpi;
mod queues;

pub use calendar::{ArrivalCalendar, ArrivalEvent};
pub use dispatcher::{simulate, DispatchState, Dispatcher};
pub use kpi::SimulationKpi;
pub use queues::ReadyQueues;

use std::collections::VecDeque;

use crate::error::Result;
use crate::models::{JobId, QueueSelection, TraceRecord};

/// State visible to a [`TraceSink`] after one tick.
#[derive(Debug, Clone, Copy)]
pub struct TickSnapshot<'a> {
    /// The tick's trace record.
    pub record: TraceRecord,
    /// Arrivals not yet admitted.
    pub pending: &'a VecDeque<ArrivalEvent>,
    /// Queue consulted by the most recent dispatch.
    pub active: QueueSelection,
    /// Contents of the active queue.
    pub active_queue: &'a VecDeque<JobId>,
}

/// Receives one snapshot per simulated tick.
pub trait TraceSink {
    /// Records one tick.
    fn record(&mut self, snapshot: &TickSnapshot<'_>) -> Result<()>;

    /// Flushes buffered output once the simulation ends.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _snapshot: &TickSnapshot<'_>) -> Result<()> {
        Ok(())
    }
}

impl<A: TraceSink, B: TraceSink> TraceSink for (A, B) {
    fn record(&mut self, snapshot: &TickSnapshot<'_>) -> Result<()> {
        self.0.record(snapshot)?;
        self.1.record(snapshot)
    }

    fn finish(&mut self) -> Result<()> {
        self.0.finish()?;
        self.1.finish()
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn record(&mut self, snapshot: &TickSnapshot<'_>) -> Result<()> {
        (**self).record(snapshot)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl<S: TraceSink> TraceSink for Option<S> {
    fn record(&mut self, snapshot: &TickSnapshot<'_>) -> Result<()> {
        match self {
            Some(sink) => sink.record(snapshot),
            None => Ok(()),
        }
    }

    fn finish(&mut self) -> Result<()> {
        match self {
            Some(sink) => sink.finish(),
            None => Ok(()),
        }
    }
}
