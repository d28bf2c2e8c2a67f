//! Run metrics.
//!
//! Derives per-process and aggregate performance indicators from a
//! finished process list.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | finish − arrival |
//! | Waiting | turnaround − burst |
//! | Average turnaround / waiting | arithmetic mean over all processes |
//! | Makespan | latest finish time |
//! | CPU utilization | total burst / (makespan − earliest arrival) |

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::models::Process;

/// Indicators for one finished process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process ID.
    pub id: String,
    /// Arrival time.
    pub arrival_time: i64,
    /// Burst time.
    pub burst_time: i64,
    /// Completion time.
    pub finish_time: i64,
    /// finish − arrival.
    pub turnaround: i64,
    /// turnaround − burst.
    pub waiting: i64,
}

/// Aggregate indicators for a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Per-process indicators, in input order.
    pub per_process: Vec<ProcessMetrics>,
    /// Mean turnaround time.
    pub average_turnaround: f64,
    /// Mean waiting time.
    pub average_waiting: f64,
    /// Largest turnaround time.
    pub max_turnaround: i64,
    /// Largest waiting time.
    pub max_waiting: i64,
    /// Latest finish time.
    pub makespan: i64,
    /// Sum of burst times.
    pub total_burst: i64,
    /// Fraction of the active span (first arrival to makespan) spent running.
    pub cpu_utilization: f64,
}

impl RunMetrics {
    /// Computes metrics from finished processes.
    ///
    /// # Errors
    /// - [`SimError::InvalidWorkload`] for an empty list
    /// - [`SimError::IncompleteRun`] if any process has not finished
    pub fn calculate(processes: &[Process]) -> SimResult<Self> {
        if processes.is_empty() {
            return Err(SimError::empty_workload());
        }

        let mut per_process = Vec::with_capacity(processes.len());
        for p in processes {
            let finish_time = match p.finish_time() {
                Some(t) if p.is_finished() => t,
                _ => {
                    return Err(SimError::IncompleteRun {
                        process_id: p.id.clone(),
                    })
                }
            };
            let turnaround = finish_time - p.arrival_time;
            per_process.push(ProcessMetrics {
                id: p.id.clone(),
                arrival_time: p.arrival_time,
                burst_time: p.burst_time,
                finish_time,
                turnaround,
                waiting: turnaround - p.burst_time,
            });
        }

        let n = per_process.len() as f64;
        // Widened: n turnarounds can exceed i64 even when every instant fits.
        let total_turnaround: i128 = per_process.iter().map(|m| i128::from(m.turnaround)).sum();
        let total_waiting: i128 = per_process.iter().map(|m| i128::from(m.waiting)).sum();
        let total_burst = per_process
            .iter()
            .fold(0i64, |acc, m| acc.saturating_add(m.burst_time));

        // Non-empty, so max/min exist.
        let makespan = per_process.iter().map(|m| m.finish_time).max().unwrap_or(0);
        let first_arrival = per_process.iter().map(|m| m.arrival_time).min().unwrap_or(0);
        let span = makespan - first_arrival;
        let cpu_utilization = if span > 0 {
            total_burst as f64 / span as f64
        } else {
            0.0
        };

        Ok(Self {
            average_turnaround: total_turnaround as f64 / n,
            average_waiting: total_waiting as f64 / n,
            max_turnaround: per_process.iter().map(|m| m.turnaround).max().unwrap_or(0),
            max_waiting: per_process.iter().map(|m| m.waiting).max().unwrap_or(0),
            makespan,
            total_burst,
            cpu_utilization,
            per_process,
        })
    }

    /// `(average_turnaround, average_waiting)`.
    pub fn averages(&self) -> (f64, f64) {
        (self.average_turnaround, self.average_waiting)
    }

    /// Indicators for one process.
    pub fn process(&self, id: &str) -> Option<&ProcessMetrics> {
        self.per_process.iter().find(|m| m.id == id)
    }
}

/// Computes run metrics from a finished process list.
///
/// Pure function of arrival, burst and finish times; calling it twice on
/// the same list yields identical results.
pub fn compute_metrics(processes: &[Process]) -> SimResult<RunMetrics> {
    RunMetrics::calculate(processes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished_case() -> Vec<Process> {
        // Improved smart round robin, paper case I.
        vec![
            Process::finished("P0", 0, 12, 20),
            Process::finished("P1", 0, 34, 73),
            Process::finished("P2", 0, 8, 8),
            Process::finished("P3", 0, 19, 39),
        ]
    }

    #[test]
    fn test_metrics_basic() {
        let m = compute_metrics(&finished_case()).unwrap();
        assert!((m.average_turnaround - 35.0).abs() < 1e-10);
        assert!((m.average_waiting - 16.75).abs() < 1e-10);
        assert_eq!(m.makespan, 73);
        assert_eq!(m.total_burst, 73);
        assert_eq!(m.max_turnaround, 73);
        assert_eq!(m.max_waiting, 39);
        assert!((m.cpu_utilization - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_per_process() {
        let m = compute_metrics(&finished_case()).unwrap();
        let p3 = m.process("P3").unwrap();
        assert_eq!(p3.turnaround, 39);
        assert_eq!(p3.waiting, 20);
        assert!(m.process("P9").is_none());
        assert_eq!(m.per_process[0].id, "P0");
    }

    #[test]
    fn test_metrics_with_arrivals_and_idle() {
        let procs = vec![
            Process::finished("P1", 1, 4, 5),
            Process::finished("P2", 10, 5, 15),
            Process::finished("P3", 20, 3, 23),
        ];
        let m = compute_metrics(&procs).unwrap();
        assert_eq!(m.averages(), (4.0, 0.0));
        // busy 12 over span 22
        assert!((m.cpu_utilization - 12.0 / 22.0).abs() < 1e-10);
    }

    #[test]
    fn test_idempotent() {
        let procs = finished_case();
        let a = compute_metrics(&procs).unwrap();
        let b = compute_metrics(&procs).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_is_invalid() {
        let err = compute_metrics(&[]).unwrap_err();
        assert!(matches!(err, SimError::InvalidWorkload(_)));
    }

    #[test]
    fn test_unfinished_is_incomplete() {
        let procs = vec![Process::finished("P0", 0, 2, 2), Process::new("P1", 0, 3)];
        let err = compute_metrics(&procs).unwrap_err();
        assert_eq!(
            err,
            SimError::IncompleteRun {
                process_id: "P1".into()
            }
        );
    }

    #[test]
    fn test_large_times_do_not_overflow_totals() {
        let a = i64::MAX / 4;
        let procs = vec![
            Process::finished("P0", 0, a, a),
            Process::finished("P1", 0, a, 2 * a),
            Process::finished("P2", 0, a, 3 * a),
        ];
        let metrics = compute_metrics(&procs).unwrap();
        let expected = (2 * a) as f64;
        assert!((metrics.average_turnaround - expected).abs() / expected < 1e-12);
        assert_eq!(metrics.total_burst, 3 * a);
        assert_eq!(metrics.makespan, 3 * a);
    }
}
