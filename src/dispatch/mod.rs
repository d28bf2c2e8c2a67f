//! Dispatch engine and history instrumentation.
//!
//! One engine serves all round-robin variants: it is parameterized by a
//! [`QuantumPolicy`](crate::quantum::QuantumPolicy) and a
//! [`DispatchMode`]. Per-process quantum/delta histories are collected
//! through an injectable [`HistoryRecorder`].
//!
//! # Usage
//!
//! ```
//! use smart_rr::dispatch::{DispatchMode, Dispatcher, QuantumHistory};
//! use smart_rr::models::Process;
//! use smart_rr::quantum::policies::FixedQuantum;
//!
//! let mut procs = vec![Process::new("P0", 0, 5), Process::new("P1", 0, 3)];
//! let mut history = QuantumHistory::new();
//! let report = Dispatcher::new(FixedQuantum(2))
//!     .with_mode(DispatchMode::Fifo)
//!     .dispatch(&mut procs, &mut history)
//!     .unwrap();
//! assert_eq!(report.end_time, 8);
//! assert_eq!(history.quantum_history("P0"), vec![2, 2, 2]);
//! ```

mod engine;
mod recorder;

pub use engine::{DispatchMode, DispatchReport, Dispatcher, RequeueOrder};
pub use recorder::{HistoryRecorder, NoHistory, QuantumHistory};
