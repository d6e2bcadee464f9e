//! Job model and the job table.
//!
//! A job is a unit of work that arrives at a fixed tick and needs a fixed
//! number of ticks of processor service. The static description (`Job`) is
//! separated from the two fields that change during simulation (`JobState`).
//!
//! # Time Representation
//! All times are integer ticks from the start of the simulation (t=0).

use serde::{Deserialize, Serialize};

/// Stable job identity: the job's position in input order.
pub type JobId = usize;

/// One discrete unit of simulated time.
pub type Tick = u64;

/// A job to be simulated.
///
/// Immutable once built. Runtime bookkeeping lives in [`JobState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Position in input order.
    pub id: JobId,
    /// Display label. Not used in scheduling decisions.
    pub name: String,
    /// Priority class in `[0, num_levels)`. 0 = highest.
    pub priority_class: usize,
    /// Tick at which the job becomes eligible to run.
    pub arrival_tick: Tick,
    /// Total service demand in ticks (`slots_requested`).
    pub service: Tick,
}

impl Job {
    /// Creates a job with priority class 0, arriving at tick 0, needing one tick.
    pub fn new(id: JobId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            priority_class: 0,
            arrival_tick: 0,
            service: 1,
        }
    }

    /// Sets the priority class.
    pub fn with_priority_class(mut self, priority_class: usize) -> Self {
        self.priority_class = priority_class;
        self
    }

    /// Sets the arrival tick.
    pub fn with_arrival(mut self, arrival_tick: Tick) -> Self {
        self.arrival_tick = arrival_tick;
        self
    }

    /// Sets the total service demand.
    pub fn with_service(mut self, service: Tick) -> Self {
        self.service = service;
        self
    }
}

/// Mutable per-job bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobState {
    /// Ticks of work left. Never increases; 0 = complete.
    pub remaining: Tick,
    /// Start of the current execution span. `None` when not running.
    pub run_started_at: Option<Tick>,
}

impl JobState {
    fn for_job(job: &Job) -> Self {
        Self {
            remaining: job.service,
            run_started_at: None,
        }
    }

    /// Whether all service has been delivered.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

/// All jobs of a simulation, indexed by [`JobId`].
///
/// Built once before the simulation starts; only [`JobState`] entries
/// change afterwards.
#[derive(Debug, Clone)]
pub struct JobTable {
    jobs: Vec<Job>,
    states: Vec<JobState>,
}

impl JobTable {
    /// Builds the table.
    ///
    /// # Panics
    /// If a job's id does not match its position. Run
    /// [`validate_jobs`](crate::validation::validate_jobs) first.
    pub fn new(jobs: Vec<Job>) -> Self {
        for (index, job) in jobs.iter().enumerate() {
            assert_eq!(job.id, index, "JobId must match table index");
        }
        let states = jobs.iter().map(JobState::for_job).collect();
        Self { jobs, states }
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the table has no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Static description of a job.
    pub fn job(&self, id: JobId) -> &Job {
        &self.jobs[id]
    }

    /// Runtime state of a job.
    pub fn state(&self, id: JobId) -> &JobState {
        &self.states[id]
    }

    pub(crate) fn state_mut(&mut self, id: JobId) -> &mut JobState {
        &mut self.states[id]
    }

    /// All jobs in id order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Whether every job has received its full service.
    pub fn all_complete(&self) -> bool {
        self.states.iter().all(JobState::is_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_builder() {
        let job = Job::new(3, "c03")
            .with_priority_class(1)
            .with_arrival(12)
            .with_service(40);

        assert_eq!(job.id, 3);
        assert_eq!(job.name, "c03");
        assert_eq!(job.priority_class, 1);
        assert_eq!(job.arrival_tick, 12);
        assert_eq!(job.service, 40);
    }

    #[test]
    fn test_table_initial_state() {
        let table = JobTable::new(vec![
            Job::new(0, "A").with_service(5),
            Job::new(1, "B").with_service(9),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.state(0).remaining, 5);
        assert_eq!(table.state(1).remaining, 9);
        assert_eq!(table.state(1).run_started_at, None);
        assert!(!table.all_complete());
    }

    #[test]
    fn test_table_completion() {
        let mut table = JobTable::new(vec![Job::new(0, "A").with_service(2)]);
        table.state_mut(0).remaining = 0;
        assert!(table.state(0).is_complete());
        assert!(table.all_complete());
    }

    #[test]
    #[should_panic(expected = "JobId must match table index")]
    fn test_table_rejects_misnumbered_ids() {
        JobTable::new(vec![Job::new(1, "A")]);
    }
}
