//! Random workload generation.
//!
//! Produces reproducible job lists for benchmarking scheduler settings:
//! arrivals spread uniformly over a window, priority classes drawn
//! uniformly, and a bimodal service mix of many short jobs with a tail of
//! long ones.

use std::io::Write;
use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{Job, Tick};

/// Shape of a generated workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSpec {
    /// Number of jobs.
    pub num_jobs: usize,
    /// Latest possible arrival tick.
    pub max_arrival: Tick,
    /// Priority classes are drawn from `0..num_levels`.
    pub num_levels: usize,
    /// Probability that a job draws from `short_range`.
    pub short_probability: f64,
    /// Service range for short jobs.
    pub short_range: RangeInclusive<Tick>,
    /// Service range for long jobs.
    pub long_range: RangeInclusive<Tick>,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            num_jobs: 50,
            max_arrival: 200,
            num_levels: 2,
            short_probability: 0.8,
            short_range: 2..=30,
            long_range: 50..=100,
        }
    }
}

impl WorkloadSpec {
    /// Sets the number of jobs.
    pub fn with_num_jobs(mut self, num_jobs: usize) -> Self {
        self.num_jobs = num_jobs;
        self
    }

    /// Sets the number of priority classes.
    pub fn with_num_levels(mut self, num_levels: usize) -> Self {
        self.num_levels = num_levels;
        self
    }

    /// Sets the latest arrival tick.
    pub fn with_max_arrival(mut self, max_arrival: Tick) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Generates jobs named `c00`, `c01`, … in arrival order.
    ///
    /// The same seed always yields the same list.
    pub fn generate(&self, seed: u64) -> Vec<Job> {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut arrivals: Vec<Tick> = (0..self.num_jobs)
            .map(|_| rng.random_range(0..=self.max_arrival))
            .collect();
        arrivals.sort_unstable();

        let levels = self.num_levels.max(1);
        arrivals
            .into_iter()
            .enumerate()
            .map(|(id, arrival)| {
                let class = rng.random_range(0..levels);
                let range = if rng.random_bool(self.short_probability) {
                    self.short_range.clone()
                } else {
                    self.long_range.clone()
                };
                Job::new(id, format!("c{id:02}"))
                    .with_priority_class(class)
                    .with_arrival(arrival)
                    .with_service(rng.random_range(range))
            })
            .collect()
    }
}

/// Writes jobs in the loader's input format.
pub fn write_jobs<W: Write>(jobs: &[Job], mut out: W) -> std::io::Result<()> {
    for job in jobs {
        writeln!(
            out,
            "{} {} {} {}",
            job.name, job.priority_class, job.arrival_tick, job.service
        )?;
    }
    out.flush()
}
