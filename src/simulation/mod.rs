//! Simulation runs, metrics and variant comparison.
//!
//! Provides the caller-facing entry points: [`run`] for a single
//! simulation, [`compute_metrics`] for finished process lists, and
//! [`Comparison`] for running several variants on one workload.
//!
//! # Metrics
//!
//! [`RunMetrics`] carries per-process turnaround and waiting time plus
//! their averages, makespan and CPU utilization.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2:
//!   Scheduling Criteria

mod compare;
mod config;
mod metrics;
mod runner;

pub use compare::{reduction_percent, Comparison, Reduction, VariantResult};
pub use config::{PolicyKind, SimulationConfig};
pub use metrics::{compute_metrics, ProcessMetrics, RunMetrics};
pub use runner::{run, SimulationOutcome, Simulator};
