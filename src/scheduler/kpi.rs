//! Simulation quality metrics (KPIs).
//!
//! Computes standard scheduling performance indicators from a finished
//! trace and its input jobs.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Response | First dispatch - arrival |
//! | Turnaround | Completion - arrival |
//! | Wait | Turnaround - service |
//! | Switches | Dispatches of a job other than the last one to run |
//! | Makespan | Latest completion tick |
//! | Utilization | Busy ticks / simulated ticks |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Job, Tick, Trace};

/// Simulation performance indicators.
///
/// All time values are in ticks. Jobs that never completed are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationKpi {
    /// Jobs with a completion tick in the trace.
    pub completed_jobs: usize,
    /// Total wait per priority class.
    pub wait_by_class: BTreeMap<usize, Tick>,
    /// Total wait across all jobs.
    pub total_wait: Tick,
    /// Longest time any job waited for its first dispatch.
    pub max_response: Tick,
    /// Number of times the processor switched to a different job.
    pub switches: usize,
    /// Latest completion tick.
    pub makespan: Tick,
    /// Ticks with a running job.
    pub busy_ticks: usize,
    /// Busy ticks / simulated ticks (0.0..1.0).
    pub utilization: f64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
}

impl SimulationKpi {
    /// Computes KPIs from a trace and its input jobs.
    pub fn calculate(jobs: &[Job], trace: &Trace) -> Self {
        let mut wait_by_class: BTreeMap<usize, Tick> = BTreeMap::new();
        let mut total_wait: Tick = 0;
        let mut max_response: Tick = 0;
        let mut makespan: Tick = 0;
        let mut total_turnaround: f64 = 0.0;
        let mut completed_jobs = 0;

        for job in jobs {
            let (Some(first), Some(completion)) =
                (trace.first_dispatch(job.id), trace.completion_tick(job.id))
            else {
                continue;
            };
            completed_jobs += 1;

            let turnaround = completion.saturating_sub(job.arrival_tick);
            let wait = turnaround.saturating_sub(job.service);
            *wait_by_class.entry(job.priority_class).or_default() += wait;
            total_wait += wait;
            max_response = max_response.max(first.saturating_sub(job.arrival_tick));
            makespan = makespan.max(completion);
            total_turnaround += turnaround as f64;
        }

        let busy_ticks = trace.busy_ticks();
        let utilization = if trace.is_empty() {
            0.0
        } else {
            busy_ticks as f64 / trace.len() as f64
        };
        let avg_turnaround = if completed_jobs == 0 {
            0.0
        } else {
            total_turnaround / completed_jobs as f64
        };

        Self {
            completed_jobs,
            wait_by_class,
            total_wait,
            max_response,
            switches: count_switches(trace),
            makespan,
            busy_ticks,
            utilization,
            avg_turnaround,
        }
    }

    /// Total wait of one priority class (0 if the class has no jobs).
    pub fn wait_for_class(&self, class: usize) -> Tick {
        self.wait_by_class.get(&class).copied().unwrap_or(0)
    }
}

/// Counts ticks where a job starts running that differs from the last job
/// seen on the processor. Idle gaps do not reset the comparison.
fn count_switches(trace: &Trace) -> usize {
    let mut last = None;
    let mut switches = 0;
    for job in trace.records.iter().filter_map(|r| r.job) {
        if last.is_some_and(|prev| prev != job) {
            switches += 1;
        }
        last = Some(job);
    }
    switches
}
