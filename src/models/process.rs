//! Process record.
//!
//! A process is the schedulable unit of the simulation: it arrives at a
//! known instant, needs a fixed amount of CPU time, and finishes once
//! that time has been fully allotted.
//!
//! # Time Representation
//! All times are integer ticks of simulated time relative to t=0.

use serde::{Deserialize, Serialize};

/// A process to be scheduled.
///
/// `arrival_time` and `burst_time` never change after construction.
/// `remaining_time` and `finish_time` are advanced only by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub id: String,
    /// Instant at which the process becomes eligible to run.
    pub arrival_time: i64,
    /// Total CPU time required.
    pub burst_time: i64,
    remaining_time: i64,
    finish_time: Option<i64>,
}

impl Process {
    /// Creates a fresh, not yet dispatched process.
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            finish_time: None,
        }
    }

    /// Creates a process that already completed at `finish_time`.
    ///
    /// Lets callers that obtained finish times elsewhere feed
    /// [`compute_metrics`](crate::simulation::compute_metrics) directly.
    /// The caller is responsible for consistent values: a finish time
    /// earlier than `arrival_time + burst_time` yields negative waiting.
    /// Debug builds assert `finish_time >= arrival_time`.
    pub fn finished(
        id: impl Into<String>,
        arrival_time: i64,
        burst_time: i64,
        finish_time: i64,
    ) -> Self {
        debug_assert!(
            finish_time >= arrival_time,
            "finish time {finish_time} precedes arrival {arrival_time}"
        );
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            remaining_time: 0,
            finish_time: Some(finish_time),
        }
    }

    /// CPU time still needed.
    #[inline]
    pub fn remaining_time(&self) -> i64 {
        self.remaining_time
    }

    /// Completion instant, `None` while unfinished.
    #[inline]
    pub fn finish_time(&self) -> Option<i64> {
        self.finish_time
    }

    /// Whether all CPU time has been allotted.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Whether the process has arrived by `now`.
    #[inline]
    pub fn has_arrived(&self, now: i64) -> bool {
        self.arrival_time <= now
    }

    /// Whether the process may be dispatched at `now`.
    #[inline]
    pub fn is_ready(&self, now: i64) -> bool {
        self.has_arrived(now) && !self.is_finished()
    }

    /// Whether the record is untouched (full remaining time, no finish time).
    pub fn is_fresh(&self) -> bool {
        self.remaining_time == self.burst_time && self.finish_time.is_none()
    }

    /// Turnaround time: finish − arrival.
    pub fn turnaround(&self) -> Option<i64> {
        self.finish_time.map(|finish| finish - self.arrival_time)
    }

    /// Waiting time: turnaround − burst.
    pub fn waiting(&self) -> Option<i64> {
        self.turnaround().map(|tat| tat - self.burst_time)
    }

    /// Runs the process for `cpu_time` starting at `start`.
    ///
    /// Returns the end instant. Sets `finish_time` when the remaining
    /// time reaches zero.
    pub(crate) fn execute(&mut self, start: i64, cpu_time: i64) -> i64 {
        debug_assert!(cpu_time > 0 && cpu_time <= self.remaining_time);
        let end = start + cpu_time;
        self.remaining_time -= cpu_time;
        if self.remaining_time == 0 {
            self.finish_time = Some(end);
        }
        end
    }
}

impl<S: Into<String>> From<(S, i64, i64)> for Process {
    /// Builds a fresh process from `(id, arrival_time, burst_time)`.
    fn from((id, arrival_time, burst_time): (S, i64, i64)) -> Self {
        Process::new(id, arrival_time, burst_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_process_is_fresh() {
        let p = Process::new("P0", 3, 7);
        assert_eq!(p.id, "P0");
        assert_eq!(p.remaining_time(), 7);
        assert_eq!(p.finish_time(), None);
        assert!(p.is_fresh());
        assert!(!p.is_finished());
        assert_eq!(p.turnaround(), None);
        assert_eq!(p.waiting(), None);
    }

    #[test]
    fn test_readiness() {
        let p = Process::new("P0", 5, 3);
        assert!(!p.is_ready(4));
        assert!(p.is_ready(5));
        assert!(p.is_ready(100));
    }

    #[test]
    fn test_execute_partial_then_finish() {
        let mut p = Process::new("P0", 0, 10);
        let end = p.execute(0, 4);
        assert_eq!(end, 4);
        assert_eq!(p.remaining_time(), 6);
        assert_eq!(p.finish_time(), None);

        let end = p.execute(9, 6);
        assert_eq!(end, 15);
        assert!(p.is_finished());
        assert_eq!(p.finish_time(), Some(15));
        assert_eq!(p.turnaround(), Some(15));
        assert_eq!(p.waiting(), Some(5));
        assert!(!p.is_ready(20));
    }

    #[test]
    fn test_from_tuple() {
        let p = Process::from(("P2", 7, 11));
        assert_eq!(p, Process::new("P2", 7, 11));
    }

    #[test]
    fn test_finished_constructor() {
        let p = Process::finished("P1", 2, 4, 10);
        assert!(p.is_finished());
        assert!(!p.is_fresh());
        assert_eq!(p.turnaround(), Some(8));
        assert_eq!(p.waiting(), Some(4));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "precedes arrival")]
    fn test_finished_before_arrival() {
        let _ = Process::finished("P1", 10, 4, 3);
    }
}
