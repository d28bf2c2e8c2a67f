//! Simulation domain models.
//!
//! Provides the data types shared by the dispatcher, the quantum policies
//! and the metrics layer.
//!
//! | Type | Role |
//! |------|------|
//! | `Process` | One schedulable unit with static and mutable state |
//! | `Trace` / `Segment` | Gantt timeline of dispatches and idle gaps |
//! | `WorkloadGenerator` | Seeded random process sets |

mod process;
mod trace;
mod workload;

pub use process::Process;
pub use trace::{Segment, SegmentLabel, Trace};
pub use workload::WorkloadGenerator;
