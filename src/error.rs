//! Simulation errors.
//!
//! Every failure is detected synchronously at the point of violation.
//! The simulation is deterministic, so none of these is retryable.

use std::fmt;

use crate::validation::{ValidationError, ValidationErrorKind};

/// Result alias for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the simulator and the metrics layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// The workload failed validation; carries every detected issue.
    InvalidWorkload(Vec<ValidationError>),
    /// A quantum policy produced a quantum below 1 or a negative slack.
    PolicyViolation {
        /// Policy name.
        policy: &'static str,
        /// Offending quantum.
        quantum: i64,
        /// Offending slack.
        slack: i64,
    },
    /// Metrics were requested while a process has not finished.
    IncompleteRun {
        /// First unfinished process.
        process_id: String,
    },
    /// The dispatch loop exceeded its iteration cap.
    IterationLimit {
        /// The cap that was hit.
        limit: usize,
    },
}

impl SimError {
    /// Shorthand for an empty-workload error.
    pub(crate) fn empty_workload() -> Self {
        SimError::InvalidWorkload(vec![ValidationError::new(
            ValidationErrorKind::EmptyWorkload,
            "Workload contains no processes",
        )])
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidWorkload(errors) => {
                write!(f, "invalid workload: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            SimError::PolicyViolation {
                policy,
                quantum,
                slack,
            } => write!(
                f,
                "policy {policy} produced quantum {quantum} and slack {slack}"
            ),
            SimError::IncompleteRun { process_id } => {
                write!(f, "process '{process_id}' has not finished")
            }
            SimError::IterationLimit { limit } => {
                write!(f, "dispatch loop exceeded {limit} iterations")
            }
        }
    }
}

impl std::error::Error for SimError {}

impl From<Vec<ValidationError>> for SimError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimError::InvalidWorkload(errors)
    }
}
