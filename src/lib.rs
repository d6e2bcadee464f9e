//! Discrete-time multi-level feedback queue (MLFQ) simulator.
//!
//! Consumes a static job list and produces a tick-by-tick trace of which
//! job holds the single simulated processor.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `JobTable`, `MlfqConfig`, `Trace`
//! - **`validation`**: Load-time checks on jobs and configuration
//! - **`dispatching`**: Ordering rules for leveled queues (`RuleEngine`)
//! - **`scheduler`**: Arrival calendar, ready queues, `Dispatcher`, KPIs
//! - **`io`**: Job-file loader and trace recorders
//! - **`workload`**: Seeded random job lists
//!
//! # Policy
//!
//! New jobs get one generous first quantum from a FIFO arrival queue that
//! outranks every level. Jobs with work left after it are requeued into a
//! leveled queue, where the job with the least remaining service runs next
//! (ties by job id). A running job is never preempted before its quantum
//! expires.
//!
//! # Example
//!
//! ```
//! use u_mlfq::models::{Job, MlfqConfig};
//! use u_mlfq::scheduler::simulate;
//!
//! let jobs = vec![
//!     Job::new(0, "A").with_service(20),
//!     Job::new(1, "B").with_arrival(1).with_service(3),
//! ];
//! let trace = simulate(jobs, MlfqConfig::default()).unwrap();
//! assert_eq!(trace.running_at(8), Some(1));
//! ```
//!
//! # References
//!
//! - Corbató et al. (1962), "An Experimental Time-Sharing System"
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 8

pub mod dispatching;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::{MlfqError, Result};
