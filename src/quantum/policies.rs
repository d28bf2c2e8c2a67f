//! Built-in quantum policies.
//!
//! | Policy | Quantum | Slack |
//! |--------|---------|-------|
//! | `FixedQuantum` | caller constant | 0 |
//! | `SmartQuantum` (SRR) | mean adjacent difference, min 1 | quantum / 2 |
//! | `ImprovedSmartQuantum` (ISRR) | mean remaining time, min 1 | mean adjacent difference, min 1 |
//!
//! Means are rounded half-to-even so that x.5 ties land on the even
//! neighbour (2.5 → 2, 3.5 → 4).

use super::{QuantumPolicy, TimeSlice};

/// Constant quantum, no slack (traditional round robin).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedQuantum(pub i64);

impl QuantumPolicy for FixedQuantum {
    fn name(&self) -> &'static str {
        "TRR"
    }

    fn compute(&self, _remaining: &[i64]) -> TimeSlice {
        TimeSlice::new(self.0, 0)
    }

    fn description(&self) -> &'static str {
        "Traditional Round Robin (fixed quantum)"
    }
}

/// Smart Round Robin.
///
/// Quantum is the rounded mean of the absolute differences between
/// consecutive sorted remaining times, floored to 1. Slack is half the
/// quantum, truncated.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartQuantum;

impl QuantumPolicy for SmartQuantum {
    fn name(&self) -> &'static str {
        "SRR"
    }

    fn compute(&self, remaining: &[i64]) -> TimeSlice {
        let quantum = mean_adjacent_difference(remaining).max(1);
        TimeSlice::new(quantum, quantum / 2)
    }

    fn description(&self) -> &'static str {
        "Smart Round Robin (mean adjacent difference quantum)"
    }
}

/// Improved Smart Round Robin.
///
/// Quantum is the rounded mean remaining time; slack is the rounded mean
/// adjacent difference. Both are floored to 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImprovedSmartQuantum;

impl QuantumPolicy for ImprovedSmartQuantum {
    fn name(&self) -> &'static str {
        "ISRR"
    }

    fn compute(&self, remaining: &[i64]) -> TimeSlice {
        let quantum = if remaining.is_empty() {
            0
        } else {
            rounded_mean(remaining.iter().map(|&r| i128::from(r)).sum(), remaining.len())
        };
        let slack = mean_adjacent_difference(remaining);
        TimeSlice::new(quantum.max(1), slack.max(1))
    }

    fn description(&self) -> &'static str {
        "Improved Smart Round Robin (mean remaining time quantum)"
    }
}

/// Rounded mean of `|r[i+1] - r[i]|`; 0 for fewer than two values.
pub fn mean_adjacent_difference(sorted: &[i64]) -> i64 {
    if sorted.len() < 2 {
        return 0;
    }
    let sum: i128 = sorted
        .windows(2)
        .map(|w| (i128::from(w[1]) - i128::from(w[0])).abs())
        .sum();
    rounded_mean(sum, sorted.len() - 1)
}

/// Sums are widened so large ready sets cannot overflow; the result
/// saturates at the `i64` bounds.
fn rounded_mean(sum: i128, count: usize) -> i64 {
    (sum as f64 / count as f64).round_ties_even() as i64
}
