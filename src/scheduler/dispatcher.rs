//! Tick-driven MLFQ dispatcher.
//!
//! # Algorithm
//!
//! Per tick, in order:
//! 1. Admit every arrival due at this tick into the arrival queue.
//! 2. If the running job reached its timeout, charge the elapsed ticks and
//!    requeue it by the demotion policy, or drop it when no work is left.
//! 3. If idle, dispatch from the arrival queue, else from the lowest
//!    non-empty level (re-sorted by the rule engine). The quantum is the
//!    base allowance or the level quantum, capped by remaining work.
//! 4. Emit `(tick, running job)`.
//! 5. Stop once the calendar, every queue, and the processor are empty.
//!
//! A dispatched job is never preempted before its timeout.

use tracing::{debug, trace};

use super::{ArrivalCalendar, NullSink, ReadyQueues, TickSnapshot, TraceSink};
use crate::dispatching::RuleEngine;
use crate::error::{join_messages, MlfqError, Result};
use crate::models::{
    Job, JobId, JobTable, MlfqConfig, QueueSelection, RunSpan, Tick, Trace, TraceRecord,
};
use crate::validation::{validate_config, validate_jobs};

/// Processor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// No job running.
    Idle,
    /// A job holds the processor until `timeout`.
    Running {
        job: JobId,
        started: Tick,
        timeout: Tick,
        source: QueueSelection,
    },
}

/// Single-processor MLFQ simulation.
///
/// Owns every piece of simulation state; nothing is shared.
///
/// # Example
///
/// ```
/// use u_mlfq::models::{Job, MlfqConfig};
/// use u_mlfq::scheduler::Dispatcher;
///
/// let jobs = vec![Job::new(0, "A").with_service(5)];
/// let mut dispatcher = Dispatcher::new(jobs, MlfqConfig::default()).unwrap();
/// let trace = dispatcher.run_to_end();
/// assert_eq!(trace.len(), 6); // ticks 0..=4 running, tick 5 idle
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: MlfqConfig,
    engine: RuleEngine,
    table: JobTable,
    calendar: ArrivalCalendar,
    queues: ReadyQueues,
    state: DispatchState,
    now: Tick,
    active: QueueSelection,
    spans: Vec<RunSpan>,
    finished: bool,
}

impl Dispatcher {
    /// Validates the input and builds the initial simulation state.
    pub fn new(jobs: Vec<Job>, config: MlfqConfig) -> Result<Self> {
        validate_config(&config)
            .map_err(|errors| MlfqError::Config(join_messages(&errors)))?;
        validate_jobs(&jobs, &config).map_err(MlfqError::Invalid)?;

        let calendar = ArrivalCalendar::new(&jobs);
        let queues = ReadyQueues::new(config.num_levels, jobs.len());
        Ok(Self {
            engine: RuleEngine::default(),
            table: JobTable::new(jobs),
            calendar,
            queues,
            config,
            state: DispatchState::Idle,
            now: 0,
            active: QueueSelection::Arrival,
            spans: Vec::new(),
            finished: false,
        })
    }

    /// Replaces the ordering used for leveled queues.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Simulates the current tick and returns its trace record.
    ///
    /// # Panics
    /// If called after the simulation finished.
    pub fn step(&mut self) -> TraceRecord {
        assert!(!self.finished, "simulation already finished at tick {}", self.now);
        let now = self.now;

        self.admit_arrivals(now);
        self.resolve_expiry(now);
        if self.state == DispatchState::Idle {
            self.dispatch_next(now);
        }

        let record = TraceRecord {
            tick: now,
            job: self.running(),
        };

        self.finished = self.calendar.is_empty()
            && self.queues.is_empty()
            && self.state == DispatchState::Idle;
        if !self.finished {
            self.now += 1;
        }
        record
    }

    /// Runs to termination, forwarding every tick to `sink`.
    pub fn run<S: TraceSink + ?Sized>(&mut self, sink: &mut S) -> Result<Trace> {
        let mut trace = Trace::new();
        while !self.finished {
            let record = self.step();
            trace.records.push(record);
            sink.record(&self.snapshot(record))?;
        }
        sink.finish()?;
        trace.spans = self.spans.clone();
        Ok(trace)
    }

    /// Runs to termination without a sink.
    pub fn run_to_end(&mut self) -> Trace {
        let mut trace = Trace::new();
        while !self.finished {
            trace.records.push(self.step());
        }
        trace.spans = self.spans.clone();
        trace
    }

    /// View of the state after the last step.
    pub fn snapshot(&self, record: TraceRecord) -> TickSnapshot<'_> {
        TickSnapshot {
            record,
            pending: self.calendar.pending(),
            active: self.active,
            active_queue: self.queues.queue(self.active),
        }
    }

    fn admit_arrivals(&mut self, now: Tick) {
        for job in self.calendar.drain_due(now) {
            trace!(tick = now, job, "arrival admitted");
            self.queues.admit(job);
        }
    }

    fn resolve_expiry(&mut self, now: Tick) {
        let DispatchState::Running {
            job,
            started,
            timeout,
            source,
        } = self.state
        else {
            return;
        };
        if now != timeout {
            return;
        }

        let elapsed = now - started;
        let state = self.table.state_mut(job);
        assert!(
            elapsed <= state.remaining,
            "job {job} ran {elapsed} ticks with only {} remaining",
            state.remaining
        );
        state.remaining -= elapsed;
        state.run_started_at = None;
        let remaining = state.remaining;

        self.spans.push(RunSpan {
            job,
            start: started,
            end: now,
            source,
        });
        self.state = DispatchState::Idle;

        if remaining > 0 {
            let level = self
                .config
                .demotion
                .target_level(self.table.job(job).priority_class);
            debug!(tick = now, job, level, remaining, "quantum expired, job requeued");
            self.queues.requeue(job, level);
        } else {
            debug!(tick = now, job, "job complete");
        }
    }

    fn dispatch_next(&mut self, now: Tick) {
        let Some(source) = self.queues.select() else {
            self.active = QueueSelection::Arrival;
            return;
        };
        let Some(job) = self.queues.pop(source, &self.engine, &self.table) else {
            return;
        };

        let allowance = match source {
            QueueSelection::Arrival => self.config.base_time_allowance,
            QueueSelection::Level(level) => self.config.level_quantum(level),
        };
        let state = self.table.state_mut(job);
        let quantum = allowance.min(state.remaining);
        state.run_started_at = Some(now);

        debug!(
            tick = now,
            job,
            queue = %source,
            quantum,
            remaining = state.remaining,
            "job dispatched"
        );
        self.active = source;
        self.state = DispatchState::Running {
            job,
            started: now,
            timeout: now + quantum,
            source,
        };
    }

    /// Currently running job.
    pub fn running(&self) -> Option<JobId> {
        match self.state {
            DispatchState::Idle => None,
            DispatchState::Running { job, .. } => Some(job),
        }
    }

    /// Processor state.
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Tick the next call to [`step`](Self::step) simulates, or the final
    /// tick once finished.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Whether the simulation reached its termination condition.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Job table.
    pub fn table(&self) -> &JobTable {
        &self.table
    }

    /// Arrival calendar.
    pub fn calendar(&self) -> &ArrivalCalendar {
        &self.calendar
    }

    /// Ready queues.
    pub fn queues(&self) -> &ReadyQueues {
        &self.queues
    }

    /// Configuration in use.
    pub fn config(&self) -> &MlfqConfig {
        &self.config
    }
}

/// Validates, simulates, and returns the full trace.
pub fn simulate(jobs: Vec<Job>, config: MlfqConfig) -> Result<Trace> {
    Dispatcher::new(jobs, config)?.run(&mut NullSink)
}
