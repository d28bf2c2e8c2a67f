//! Per-process quantum/delta history.
//!
//! Histories are diagnostic only. The dispatcher reports every time slice
//! it applies to a [`HistoryRecorder`]; production runs pass [`NoHistory`]
//! and pay nothing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::quantum::TimeSlice;

/// Sink for the time slices applied to each process.
pub trait HistoryRecorder {
    /// Called once per process per scheduling decision that includes it,
    /// in chronological order.
    fn record(&mut self, process_id: &str, slice: TimeSlice);
}

/// Recorder that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl HistoryRecorder for NoHistory {
    #[inline]
    fn record(&mut self, _process_id: &str, _slice: TimeSlice) {}
}

impl<R: HistoryRecorder + ?Sized> HistoryRecorder for &mut R {
    #[inline]
    fn record(&mut self, process_id: &str, slice: TimeSlice) {
        (**self).record(process_id, slice);
    }
}

/// Recorder that keeps every slice, grouped by process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumHistory {
    entries: HashMap<String, Vec<TimeSlice>>,
}

impl QuantumHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slices applied to a process, oldest first.
    pub fn slices(&self, process_id: &str) -> &[TimeSlice] {
        self.entries
            .get(process_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Quanta applied to a process, oldest first.
    pub fn quantum_history(&self, process_id: &str) -> Vec<i64> {
        self.slices(process_id).iter().map(|s| s.quantum).collect()
    }

    /// Deltas (slack) applied to a process, oldest first.
    pub fn delta_history(&self, process_id: &str) -> Vec<i64> {
        self.slices(process_id).iter().map(|s| s.slack).collect()
    }

    /// Number of processes with at least one entry.
    pub fn process_count(&self) -> usize {
        self.entries.len()
    }
}

impl HistoryRecorder for QuantumHistory {
    fn record(&mut self, process_id: &str, slice: TimeSlice) {
        self.entries
            .entry(process_id.to_string())
            .or_default()
            .push(slice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantum_history_preserves_order() {
        let mut h = QuantumHistory::new();
        h.record("P1", TimeSlice::new(9, 4));
        h.record("P2", TimeSlice::new(9, 4));
        h.record("P1", TimeSlice::new(15, 7));

        assert_eq!(h.quantum_history("P1"), vec![9, 15]);
        assert_eq!(h.delta_history("P1"), vec![4, 7]);
        assert_eq!(h.quantum_history("P2"), vec![9]);
        assert_eq!(h.process_count(), 2);
    }

    #[test]
    fn test_unknown_process_is_empty() {
        let h = QuantumHistory::new();
        assert!(h.slices("P0").is_empty());
        assert!(h.quantum_history("P0").is_empty());
    }

    #[test]
    fn test_record_through_mut_ref() {
        fn feed<R: HistoryRecorder>(mut recorder: R) {
            recorder.record("P0", TimeSlice::new(1, 0));
        }

        let mut h = QuantumHistory::new();
        feed(&mut h);
        feed(&mut h);
        assert_eq!(h.slices("P0").len(), 2);
    }
}
