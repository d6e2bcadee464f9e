//! Simulation domain models.
//!
//! Provides the data types shared by the scheduler, the I/O adapters, and
//! the KPI layer.
//!
//! # Domain Mappings
//!
//! | u-mlfq | OS scheduling | Service desk |
//! |--------|---------------|--------------|
//! | Job | Process | Customer |
//! | Tick | Timer interrupt | Time slot |
//! | Level | Priority queue | Service tier |
//! | Trace | Gantt chart | Slot log |

mod config;
mod job;
mod trace;

pub use config::{
    DemotionPolicy, MlfqConfig, DEFAULT_BASE_TIME_ALLOWANCE, DEFAULT_NUM_LEVELS,
};
pub use job::{Job, JobId, JobState, JobTable, Tick};
pub use trace::{QueueSelection, RunSpan, Trace, TraceRecord, IDLE_SENTINEL};
