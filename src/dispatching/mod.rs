//! Dispatching rules and rule engine for leveled queues.
//!
//! Jobs that have already consumed a quantum wait in leveled queues. Before
//! a job is pulled from a level, the level is re-sorted by a [`RuleEngine`];
//! the default engine prefers the job nearest completion and breaks ties
//! by job id.
//!
//! # Usage
//!
//! ```
//! use u_mlfq::dispatching::{rules, RuleEngine, TieBreaker};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Srt)
//!     .with_final_tie_breaker(TieBreaker::ById);
//! ```
//!
//! # References
//!
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 8 (MLFQ)
//! - Schrage (1968), "A Proof of the Optimality of the Shortest Remaining
//!   Processing Time Discipline"

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::models::{Job, JobState};
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first). Wide enough to hold
/// any [`Tick`](crate::models::Tick) and its negation.
pub type RuleScore = i128;

/// A dispatching rule that evaluates job priority within a level.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for jobs that should run first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SRT", "FIFO").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a job given its runtime state.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, job: &Job, state: &JobState) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
