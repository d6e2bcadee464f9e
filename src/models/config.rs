//! Scheduler configuration.
//!
//! Holds the quantum table and the demotion policy. Loaded from JSON by the
//! CLI; every field falls back to its default when absent.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Tick;
use crate::error::{MlfqError, Result};

/// Default first-touch quantum for jobs leaving the arrival queue.
pub const DEFAULT_BASE_TIME_ALLOWANCE: Tick = 8;

/// Default number of priority levels.
pub const DEFAULT_NUM_LEVELS: usize = 2;

/// Where a job goes when its quantum expires with work left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemotionPolicy {
    /// Requeue into the level equal to the job's priority class.
    #[default]
    PriorityClass,
    /// Requeue every expired job into one fixed level.
    Fixed(usize),
}

impl DemotionPolicy {
    /// Target level for a job of the given priority class.
    #[inline]
    pub fn target_level(&self, priority_class: usize) -> usize {
        match self {
            Self::PriorityClass => priority_class,
            Self::Fixed(level) => *level,
        }
    }
}

/// MLFQ configuration.
///
/// # Example
/// ```
/// use u_mlfq::models::{DemotionPolicy, MlfqConfig};
///
/// let config = MlfqConfig::default()
///     .with_base_time_allowance(4)
///     .with_level_quantums(vec![10, 20, 40])
///     .with_demotion(DemotionPolicy::Fixed(0));
/// assert_eq!(config.level_quantum(1), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlfqConfig {
    /// Quantum for a job's first dispatch, regardless of priority class.
    pub base_time_allowance: Tick,
    /// Number of leveled queues.
    pub num_levels: usize,
    /// Quantum per level, indexed by level. Must cover `num_levels`.
    pub level_quantums: Vec<Tick>,
    /// Requeue target on quantum expiry.
    pub demotion: DemotionPolicy,
}

impl Default for MlfqConfig {
    fn default() -> Self {
        Self {
            base_time_allowance: DEFAULT_BASE_TIME_ALLOWANCE,
            num_levels: DEFAULT_NUM_LEVELS,
            level_quantums: vec![50, 50],
            demotion: DemotionPolicy::PriorityClass,
        }
    }
}

impl MlfqConfig {
    /// Sets the base time allowance.
    pub fn with_base_time_allowance(mut self, ticks: Tick) -> Self {
        self.base_time_allowance = ticks;
        self
    }

    /// Sets the per-level quantum table and resizes `num_levels` to match.
    pub fn with_level_quantums(mut self, quantums: Vec<Tick>) -> Self {
        self.num_levels = quantums.len();
        self.level_quantums = quantums;
        self
    }

    /// Sets the number of levels without touching the quantum table.
    pub fn with_num_levels(mut self, num_levels: usize) -> Self {
        self.num_levels = num_levels;
        self
    }

    /// Sets the demotion policy.
    pub fn with_demotion(mut self, demotion: DemotionPolicy) -> Self {
        self.demotion = demotion;
        self
    }

    /// Reads a JSON configuration file.
    ///
    /// Only parses; run [`validate_config`](crate::validation::validate_config)
    /// before use.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MlfqError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text)
            .map_err(|e| MlfqError::Config(format!("{}: {e}", path.display())))
    }

    /// Quantum for a level.
    ///
    /// # Panics
    /// If `level` is outside the quantum table. Validated configs never hit this.
    #[inline]
    pub fn level_quantum(&self, level: usize) -> Tick {
        self.level_quantums[level]
    }
}
