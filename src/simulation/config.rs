//! Run configuration.
//!
//! All fields have defaults, so a config can be deserialized from a
//! partial document:
//!
//! ```
//! use smart_rr::simulation::{PolicyKind, SimulationConfig};
//!
//! let config = SimulationConfig::default()
//!     .with_policy(PolicyKind::Fixed { quantum: 4 })
//!     .with_trace(true);
//! assert!(config.emit_trace);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dispatch::{DispatchMode, Dispatcher, RequeueOrder};
use crate::quantum::policies::{FixedQuantum, ImprovedSmartQuantum, SmartQuantum};
use crate::quantum::QuantumPolicy;

/// The three round-robin variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyKind {
    /// Traditional round robin with a constant quantum (FIFO dispatch).
    Fixed {
        /// Quantum in ticks.
        quantum: i64,
    },
    /// Smart round robin.
    #[default]
    Smart,
    /// Improved smart round robin.
    ImprovedSmart,
}

impl PolicyKind {
    /// Instantiates the policy.
    pub fn build(&self) -> Arc<dyn QuantumPolicy> {
        match *self {
            PolicyKind::Fixed { quantum } => Arc::new(FixedQuantum(quantum)),
            PolicyKind::Smart => Arc::new(SmartQuantum),
            PolicyKind::ImprovedSmart => Arc::new(ImprovedSmartQuantum),
        }
    }

    /// Dispatch mode the variant runs in.
    pub fn dispatch_mode(&self) -> DispatchMode {
        match self {
            PolicyKind::Fixed { .. } => DispatchMode::Fifo,
            PolicyKind::Smart | PolicyKind::ImprovedSmart => DispatchMode::Rounds,
        }
    }

    /// Short display label, e.g. `TRR (Q=4)`.
    pub fn label(&self) -> String {
        match self {
            PolicyKind::Fixed { quantum } => format!("TRR (Q={quantum})"),
            PolicyKind::Smart => "SRR".to_string(),
            PolicyKind::ImprovedSmart => "ISRR".to_string(),
        }
    }
}

/// Configuration of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Quantum policy.
    pub policy: PolicyKind,
    /// Record a Gantt trace.
    pub emit_trace: bool,
    /// FIFO requeue order (traditional variant only).
    pub requeue_order: RequeueOrder,
    /// Iteration cap; `None` derives it from the workload.
    pub max_iterations: Option<usize>,
}

impl SimulationConfig {
    /// Creates a config for the given policy.
    pub fn new(policy: PolicyKind) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Sets the policy.
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Enables or disables the trace.
    pub fn with_trace(mut self, emit_trace: bool) -> Self {
        self.emit_trace = emit_trace;
        self
    }

    /// Sets the FIFO requeue order.
    pub fn with_requeue_order(mut self, order: RequeueOrder) -> Self {
        self.requeue_order = order;
        self
    }

    /// Sets an explicit iteration cap.
    pub fn with_max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = Some(limit);
        self
    }

    /// Builds the dispatcher described by this config.
    pub fn dispatcher(&self) -> Dispatcher {
        let dispatcher = Dispatcher::from_arc(self.policy.build())
            .with_mode(self.policy.dispatch_mode())
            .with_requeue_order(self.requeue_order)
            .with_trace(self.emit_trace);
        match self.max_iterations {
            Some(limit) => dispatcher.with_max_iterations(limit),
            None => dispatcher,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.policy, PolicyKind::Smart);
        assert!(!config.emit_trace);
        assert_eq!(config.requeue_order, RequeueOrder::ArrivalsFirst);
        assert_eq!(config.max_iterations, None);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"policy":{"kind":"fixed","quantum":4},"emit_trace":true}"#)
                .unwrap();
        assert_eq!(config.policy, PolicyKind::Fixed { quantum: 4 });
        assert!(config.emit_trace);
        assert_eq!(config.requeue_order, RequeueOrder::ArrivalsFirst);

        let config: SimulationConfig = serde_json::from_str(
            r#"{"policy":{"kind":"improved_smart"},"requeue_order":"yielded_first"}"#,
        )
        .unwrap();
        assert_eq!(config.policy, PolicyKind::ImprovedSmart);
        assert_eq!(config.requeue_order, RequeueOrder::YieldedFirst);

        let config: SimulationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_policy_kind_mapping() {
        let fixed = PolicyKind::Fixed { quantum: 6 };
        assert_eq!(fixed.dispatch_mode(), DispatchMode::Fifo);
        assert_eq!(fixed.build().name(), "TRR");
        assert_eq!(fixed.label(), "TRR (Q=6)");

        assert_eq!(PolicyKind::Smart.dispatch_mode(), DispatchMode::Rounds);
        assert_eq!(PolicyKind::Smart.build().name(), "SRR");
        assert_eq!(PolicyKind::ImprovedSmart.label(), "ISRR");
    }

    #[test]
    fn test_dispatcher_from_config() {
        let dispatcher = SimulationConfig::new(PolicyKind::Fixed { quantum: 3 }).dispatcher();
        assert_eq!(dispatcher.mode(), DispatchMode::Fifo);
        assert_eq!(dispatcher.policy().name(), "TRR");
    }
}
