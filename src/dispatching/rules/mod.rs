//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Remaining work**: SRT, LRT
//! - **Arrival**: FIFO
//!
//! # Score Convention
//! All rules return lower scores for higher priority jobs.

use super::{DispatchingRule, RuleScore};
use crate::models::{Job, JobState};

/// Shortest Remaining Time.
///
/// Prioritizes jobs closest to completion. The default ordering for
/// leveled queues.
///
/// # Reference
/// Schrage (1968), optimal for minimizing mean flow time with preemption.
#[derive(Debug, Clone, Copy)]
pub struct Srt;

impl DispatchingRule for Srt {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn evaluate(&self, _job: &Job, state: &JobState) -> RuleScore {
        RuleScore::from(state.remaining)
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time"
    }
}

/// Longest Remaining Time.
///
/// Prioritizes jobs with the most work left.
#[derive(Debug, Clone, Copy)]
pub struct Lrt;

impl DispatchingRule for Lrt {
    fn name(&self) -> &'static str {
        "LRT"
    }

    fn evaluate(&self, _job: &Job, state: &JobState) -> RuleScore {
        -RuleScore::from(state.remaining)
    }

    fn description(&self) -> &'static str {
        "Longest Remaining Time"
    }
}

/// First In, First Out by arrival tick.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, job: &Job, _state: &JobState) -> RuleScore {
        RuleScore::from(job.arrival_tick)
    }

    fn description(&self) -> &'static str {
        "First In, First Out"
    }
}
