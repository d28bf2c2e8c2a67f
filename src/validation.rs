//! Input validation for simulation workloads.
//!
//! Checks structural integrity of the process list before any simulated
//! time elapses. Detects:
//! - Empty workloads
//! - Duplicate IDs
//! - Non-positive burst times
//! - Negative arrival times
//! - Records that were already (partially) dispatched
//! - Workloads whose schedule could run past `i64::MAX`

use std::collections::HashSet;
use std::fmt;

use crate::models::Process;

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
    /// No processes to schedule.
    EmptyWorkload,
    /// Two processes share the same ID.
    DuplicateId,
    /// A process needs zero or negative CPU time.
    NonPositiveBurst,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process has already received CPU time or carries a finish time.
    AlreadyStarted,
    /// Latest arrival plus total burst does not fit in `i64`.
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a workload before simulation.
///
/// Checks:
/// 1. At least one process
/// 2. No duplicate process IDs
/// 3. Every burst time is positive
/// 4. Every arrival time is non-negative
/// 5. Every record is fresh (remaining = burst, no finish time)
/// 6. `max(arrival) + Σ burst` fits in `i64`, bounding every instant
///    the dispatch loop can reach
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(processes: &[Process]) -> ValidationResult {
    if processes.is_empty() {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::EmptyWorkload,
            "Workload contains no processes",
        )]);
    }

    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in processes {
        if !ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process '{}' has burst time {}", p.id, p.burst_time),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process '{}' arrives at {}", p.id, p.arrival_time),
            ));
        }

        if !p.is_fresh() {
            errors.push(ValidationError::new(
                ValidationErrorKind::AlreadyStarted,
                format!(
                    "Process '{}' has remaining time {} of burst {}",
                    p.id,
                    p.remaining_time(),
                    p.burst_time
                ),
            ));
        }
    }

    if schedule_horizon(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total burst time overflows i64",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `max(arrival) + Σ burst`, or `None` on overflow.
fn schedule_horizon(processes: &[Process]) -> Option<i64> {
    let total_burst = processes
        .iter()
        .try_fold(0i64, |acc, p| acc.checked_add(p.burst_time.max(0)))?;
    let latest_arrival = processes
        .iter()
        .map(|p| p.arrival_time.max(0))
        .max()
        .unwrap_or(0);
    latest_arrival.checked_add(total_burst)
}
