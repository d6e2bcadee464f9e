//! Input validation for simulation runs.
//!
//! Checks structural integrity of the job list and the configuration
//! before any simulation state is built. Detects:
//! - Job ids that do not match input order
//! - Priority classes outside the configured levels
//! - Jobs that request no service
//! - Quantum tables that do not cover every level
//! - Zero quanta and out-of-range demotion targets

use crate::models::{DemotionPolicy, Job, MlfqConfig};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A job's id is not its position in the list.
    IdMismatch,
    /// A job's priority class has no matching level.
    UnknownLevel,
    /// A job requests zero ticks of service.
    EmptyService,
    /// The configuration declares no levels.
    NoLevels,
    /// The quantum table has fewer entries than levels.
    QuantumTableTooShort,
    /// A quantum used by the scheduler is zero.
    ZeroQuantum,
    /// A fixed demotion level does not exist.
    InvalidDemotionTarget,
}

impl ValidationError {
    /// Creates an error of the given kind.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a configuration.
///
/// Checks:
/// 1. At least one level
/// 2. The quantum table covers every level
/// 3. The base allowance and every used level quantum are at least 1
/// 4. A fixed demotion target names an existing level
pub fn validate_config(config: &MlfqConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.num_levels == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoLevels,
            "configuration declares no priority levels",
        ));
    }

    if config.level_quantums.len() < config.num_levels {
        errors.push(ValidationError::new(
            ValidationErrorKind::QuantumTableTooShort,
            format!(
                "quantum table has {} entries for {} levels",
                config.level_quantums.len(),
                config.num_levels
            ),
        ));
    }

    if config.base_time_allowance == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroQuantum,
            "base time allowance must be at least 1 tick",
        ));
    }

    for (level, &quantum) in config
        .level_quantums
        .iter()
        .enumerate()
        .take(config.num_levels)
    {
        if quantum == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroQuantum,
                format!("quantum for level {level} must be at least 1 tick"),
            ));
        }
    }

    if let DemotionPolicy::Fixed(level) = config.demotion {
        if level >= config.num_levels {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDemotionTarget,
                format!(
                    "demotion target level {level} exceeds {} configured levels",
                    config.num_levels
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a job list against a configuration.
///
/// Checks:
/// 1. Every job's id equals its position
/// 2. Every priority class names a configured level
/// 3. Every job requests at least one tick of service
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[Job], config: &MlfqConfig) -> ValidationResult {
    let mut errors = Vec::new();

    for (index, job) in jobs.iter().enumerate() {
        if job.id != index {
            errors.push(ValidationError::new(
                ValidationErrorKind::IdMismatch,
                format!("job '{}' has id {} at position {index}", job.name, job.id),
            ));
        }

        if job.priority_class >= config.num_levels {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownLevel,
                format!(
                    "job '{}' has priority class {} but only {} levels are configured",
                    job.name, job.priority_class, config.num_levels
                ),
            ));
        }

        // A zero-length quantum would never reach its timeout tick.
        if job.service == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyService,
                format!("job '{}' requests no service", job.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
