//! Simulation runner.
//!
//! # Algorithm
//!
//! 1. Validate the workload.
//! 2. Dispatch every process to completion with the configured policy.
//! 3. Compute run metrics from the finished records.
//!
//! A run either completes fully or fails before producing metrics.

use serde::{Deserialize, Serialize};

use super::{PolicyKind, RunMetrics, SimulationConfig};
use crate::dispatch::{Dispatcher, HistoryRecorder, NoHistory};
use crate::error::SimResult;
use crate::models::{Process, Trace};

/// Result of a completed simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Finished process records, in input order.
    pub processes: Vec<Process>,
    /// Gantt trace, when requested.
    ///
    /// Raw: one segment per dispatch, so a process run over several
    /// consecutive slices shows up as several adjacent segments. Use
    /// [`Trace::coalesced`] for the merged Gantt view.
    pub trace: Option<Trace>,
    /// Turnaround/waiting metrics.
    pub metrics: RunMetrics,
    /// Dispatches of a process different from the previous one.
    pub context_switches: usize,
    /// Total number of dispatches.
    pub dispatches: usize,
}

/// Reusable simulator bound to one configuration.
///
/// Holds no per-run state, so one simulator can serve many independent
/// runs, including from several threads.
///
/// # Example
///
/// ```
/// use smart_rr::models::Process;
/// use smart_rr::simulation::{PolicyKind, SimulationConfig, Simulator};
///
/// let procs = vec![
///     Process::new("P0", 0, 12),
///     Process::new("P1", 0, 34),
///     Process::new("P2", 0, 8),
///     Process::new("P3", 0, 19),
/// ];
/// let simulator = Simulator::new(SimulationConfig::new(PolicyKind::ImprovedSmart));
/// let outcome = simulator.run(procs).unwrap();
/// assert_eq!(outcome.metrics.averages(), (35.0, 16.75));
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
    dispatcher: Dispatcher,
}

impl Simulator {
    /// Creates a simulator.
    pub fn new(config: SimulationConfig) -> Self {
        let dispatcher = config.dispatcher();
        Self { config, dispatcher }
    }

    /// Active configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs the simulation without history instrumentation.
    pub fn run(&self, processes: Vec<Process>) -> SimResult<SimulationOutcome> {
        self.run_recorded(processes, &mut NoHistory)
    }

    /// Runs the simulation, reporting every applied time slice to `recorder`.
    pub fn run_recorded<R: HistoryRecorder + ?Sized>(
        &self,
        mut processes: Vec<Process>,
        recorder: &mut R,
    ) -> SimResult<SimulationOutcome> {
        let report = self.dispatcher.dispatch(&mut processes, recorder)?;
        let metrics = RunMetrics::calculate(&processes)?;

        log::debug!(
            "{}: avg turnaround {:.2}, avg waiting {:.2}, {} context switches",
            self.config.policy.label(),
            metrics.average_turnaround,
            metrics.average_waiting,
            report.context_switches
        );

        Ok(SimulationOutcome {
            processes,
            trace: report.trace,
            metrics,
            context_switches: report.context_switches,
            dispatches: report.dispatches,
        })
    }
}

/// Runs one simulation with default settings for everything but the
/// policy and the trace switch.
///
/// The returned trace is raw (see [`SimulationOutcome::trace`]).
pub fn run(
    processes: Vec<Process>,
    policy: PolicyKind,
    emit_trace: bool,
) -> SimResult<SimulationOutcome> {
    Simulator::new(SimulationConfig::new(policy).with_trace(emit_trace)).run(processes)
}
