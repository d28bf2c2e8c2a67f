//! Side-by-side comparison of round-robin variants.
//!
//! Runs several policies on independent copies of one workload and
//! reports how much each variant reduces average turnaround and waiting
//! time relative to a baseline (typically traditional round robin).

use serde::{Deserialize, Serialize};

use super::{PolicyKind, RunMetrics, SimulationConfig, Simulator};
use crate::error::SimResult;
use crate::models::Process;

/// Outcome of one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantResult {
    /// Display label, e.g. `TRR (Q=6)`.
    pub label: String,
    /// Policy that produced this result.
    pub policy: PolicyKind,
    /// Run metrics.
    pub metrics: RunMetrics,
    /// Context switches.
    pub context_switches: usize,
}

/// Improvement of one variant over the baseline, in percent.
///
/// Positive values mean the variant is better (lower times).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reduction {
    /// Variant label.
    pub label: String,
    /// Average turnaround reduction (%). `None` if the baseline is zero.
    pub turnaround_percent: Option<f64>,
    /// Average waiting reduction (%). `None` if the baseline is zero.
    pub waiting_percent: Option<f64>,
}

/// Results of running several variants on the same workload.
///
/// # Example
///
/// ```
/// use smart_rr::models::Process;
/// use smart_rr::simulation::{Comparison, PolicyKind, SimulationConfig};
///
/// let procs = vec![Process::new("P0", 0, 12), Process::new("P1", 0, 34)];
/// let cmp = Comparison::run(
///     &procs,
///     &[PolicyKind::Fixed { quantum: 6 }, PolicyKind::ImprovedSmart],
///     &SimulationConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(cmp.results.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// One entry per policy, in the order given.
    pub results: Vec<VariantResult>,
}

impl Comparison {
    /// Runs every policy on a fresh copy of `processes`.
    ///
    /// `base` supplies the non-policy settings (requeue order, cap);
    /// traces are never recorded.
    pub fn run(
        processes: &[Process],
        policies: &[PolicyKind],
        base: &SimulationConfig,
    ) -> SimResult<Self> {
        let mut results = Vec::with_capacity(policies.len());
        for &policy in policies {
            let config = base.clone().with_policy(policy).with_trace(false);
            let outcome = Simulator::new(config).run(processes.to_vec())?;
            results.push(VariantResult {
                label: policy.label(),
                policy,
                metrics: outcome.metrics,
                context_switches: outcome.context_switches,
            });
        }
        Ok(Self { results })
    }

    /// Finds a result by label.
    pub fn result(&self, label: &str) -> Option<&VariantResult> {
        self.results.iter().find(|r| r.label == label)
    }

    /// Reductions of every other variant relative to `baseline_label`.
    ///
    /// Returns `None` if no result carries that label.
    pub fn reductions_against(&self, baseline_label: &str) -> Option<Vec<Reduction>> {
        let baseline = self.result(baseline_label)?;
        let reductions = self
            .results
            .iter()
            .filter(|r| r.label != baseline_label)
            .map(|r| Reduction {
                label: r.label.clone(),
                turnaround_percent: reduction_percent(
                    baseline.metrics.average_turnaround,
                    r.metrics.average_turnaround,
                ),
                waiting_percent: reduction_percent(
                    baseline.metrics.average_waiting,
                    r.metrics.average_waiting,
                ),
            })
            .collect();
        Some(reductions)
    }
}

/// `(baseline − value) / baseline × 100`; `None` for a zero baseline.
pub fn reduction_percent(baseline: f64, value: f64) -> Option<f64> {
    if baseline == 0.0 {
        None
    } else {
        Some((baseline - value) / baseline * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case_one() -> Vec<Process> {
        vec![
            Process::new("P0", 0, 12),
            Process::new("P1", 0, 34),
            Process::new("P2", 0, 8),
            Process::new("P3", 0, 19),
        ]
    }

    fn all_variants(quantum: i64) -> [PolicyKind; 3] {
        [
            PolicyKind::Fixed { quantum },
            PolicyKind::Smart,
            PolicyKind::ImprovedSmart,
        ]
    }

    #[test]
    fn test_compare_all_variants() {
        let cmp = Comparison::run(&case_one(), &all_variants(6), &SimulationConfig::default())
            .unwrap();

        let labels: Vec<&str> = cmp.results.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["TRR (Q=6)", "SRR", "ISRR"]);

        assert_eq!(cmp.result("TRR (Q=6)").unwrap().metrics.averages(), (51.0, 32.75));
        assert_eq!(cmp.result("SRR").unwrap().metrics.averages(), (37.25, 19.0));
        assert_eq!(cmp.result("ISRR").unwrap().metrics.averages(), (35.0, 16.75));
        assert_eq!(cmp.result("SRR").unwrap().context_switches, 5);
        assert_eq!(cmp.result("ISRR").unwrap().context_switches, 3);
    }

    #[test]
    fn test_reductions_against_traditional() {
        let cmp = Comparison::run(&case_one(), &all_variants(6), &SimulationConfig::default())
            .unwrap();
        let reductions = cmp.reductions_against("TRR (Q=6)").unwrap();
        assert_eq!(reductions.len(), 2);

        let srr = &reductions[0];
        assert_eq!(srr.label, "SRR");
        let expected = (51.0 - 37.25) / 51.0 * 100.0;
        assert!((srr.turnaround_percent.unwrap() - expected).abs() < 1e-10);

        let isrr = &reductions[1];
        let expected = (32.75 - 16.75) / 32.75 * 100.0;
        assert!((isrr.waiting_percent.unwrap() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_unknown_baseline() {
        let cmp = Comparison::run(&case_one(), &[PolicyKind::Smart], &SimulationConfig::default())
            .unwrap();
        assert!(cmp.reductions_against("TRR (Q=4)").is_none());
    }

    #[test]
    fn test_reduction_percent() {
        assert_eq!(reduction_percent(50.0, 25.0), Some(50.0));
        assert_eq!(reduction_percent(10.0, 12.0), Some(-20.0));
        assert_eq!(reduction_percent(0.0, 1.0), None);
    }

    #[test]
    fn test_input_left_untouched() {
        let procs = case_one();
        Comparison::run(&procs, &all_variants(4), &SimulationConfig::default()).unwrap();
        assert!(procs.iter().all(Process::is_fresh));
    }

    #[test]
    fn test_failure_propagates() {
        let err = Comparison::run(
            &case_one(),
            &[PolicyKind::Smart, PolicyKind::Fixed { quantum: 0 }],
            &SimulationConfig::default(),
        );
        assert!(err.is_err());
    }
}
