//! Round-robin CPU scheduling simulator.
//!
//! Simulates quantum-based scheduling of a batch-known process set and
//! computes turnaround time, waiting time and context switches for three
//! round-robin variants:
//!
//! - **TRR**: traditional round robin with a fixed quantum
//! - **SRR**: smart round robin, quantum from the mean difference of
//!   sorted remaining burst times, slack of half the quantum
//! - **ISRR**: improved smart round robin, quantum from the mean remaining
//!   burst time, slack from the mean difference
//!
//! # Modules
//!
//! - **`models`**: `Process`, `Trace`, `WorkloadGenerator`
//! - **`quantum`**: `QuantumPolicy` and the built-in policies
//! - **`dispatch`**: the dispatch loop and history recorders
//! - **`simulation`**: `run`, `compute_metrics`, configuration, comparison
//! - **`validation`**: workload integrity checks
//!
//! # Example
//!
//! ```
//! use smart_rr::models::Process;
//! use smart_rr::simulation::{run, PolicyKind};
//!
//! let procs = vec![
//!     Process::new("P0", 0, 2),
//!     Process::new("P1", 0, 5),
//!     Process::new("P2", 0, 6),
//!     Process::new("P3", 0, 3),
//!     Process::new("P4", 0, 9),
//! ];
//! let outcome = run(procs, PolicyKind::Fixed { quantum: 4 }, true).unwrap();
//! let (avg_tat, avg_wt) = outcome.metrics.averages();
//! assert!((avg_tat - 15.6).abs() < 1e-9);
//! assert!((avg_wt - 10.6).abs() < 1e-9);
//! ```

pub mod dispatch;
pub mod error;
pub mod models;
pub mod quantum;
pub mod simulation;
pub mod validation;

pub use error::{SimError, SimResult};
