//! Quantum policies for round-robin dispatch.
//!
//! A quantum policy looks at the remaining burst times of the current
//! ready set and returns the [`TimeSlice`] for the next scheduling
//! decision: a default quantum plus a slack allowance. A process whose
//! remaining time fits in `quantum + slack` runs to completion instead of
//! being cut at the quantum.
//!
//! # Usage
//!
//! ```
//! use smart_rr::quantum::{policies, QuantumPolicy};
//!
//! let slice = policies::ImprovedSmartQuantum.compute(&[8, 12, 19, 34]);
//! assert_eq!(slice.quantum, 18);
//! assert_eq!(slice.slack, 9);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Mohanty et al. (2011), "Design and Performance Evaluation of a New
//!   Proposed Shortest Remaining Burst Round Robin"

pub mod policies;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Quantum and slack applied at one scheduling decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlice {
    /// Default CPU time per dispatch.
    pub quantum: i64,
    /// Extra allowance that lets a nearly-done process finish in one turn.
    pub slack: i64,
}

impl TimeSlice {
    /// Creates a time slice.
    pub fn new(quantum: i64, slack: i64) -> Self {
        Self { quantum, slack }
    }

    /// CPU time granted to a process with `remaining` time left.
    ///
    /// The whole remainder if it fits in `quantum + slack`, otherwise
    /// exactly `quantum`.
    #[inline]
    pub fn allotment(&self, remaining: i64) -> i64 {
        if remaining <= self.quantum.saturating_add(self.slack) {
            remaining
        } else {
            self.quantum
        }
    }

    /// Whether the slice can make progress.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.quantum >= 1 && self.slack >= 0
    }
}

/// A policy that derives a time slice from the ready set.
///
/// # Contract
/// `compute` receives the remaining times of every ready process sorted
/// ascending. It is called afresh at every decision point and must be a
/// pure function of its input.
pub trait QuantumPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "SRR").
    fn name(&self) -> &'static str;

    /// Computes the time slice for the given ready set.
    fn compute(&self, remaining: &[i64]) -> TimeSlice;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
