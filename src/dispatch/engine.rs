//! Dispatch loop.
//!
//! Drives simulated time over a batch-known process set, asking a
//! [`QuantumPolicy`] for the time slice at every decision point.
//!
//! # Modes
//!
//! - **Rounds** (SRR, ISRR): build the ready set, sort it by remaining
//!   time, compute one slice, then run every ready process once in that
//!   order before looking at the ready set again.
//! - **FIFO** (TRR): explicit ready queue; pop the head, run one slice,
//!   re-queue it at the tail if unfinished.
//!
//! When nothing is ready, time jumps to the next arrival and an idle
//! segment is recorded.
//!
//! # Termination
//! Every dispatch strictly decreases one remaining time. A cap of
//! `2 × total_burst + n + 1` iterations turns any policy defect into
//! [`SimError::IterationLimit`] instead of a hang.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::HistoryRecorder;
use crate::error::{SimError, SimResult};
use crate::models::{Process, Segment, Trace};
use crate::quantum::{QuantumPolicy, TimeSlice};
use crate::validation::validate_workload;

/// How ready processes are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Whole sorted ready set per round.
    #[default]
    Rounds,
    /// One process per turn from a FIFO queue.
    Fifo,
}

/// Where a yielded process goes relative to processes that arrived
/// during its turn (FIFO mode only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequeueOrder {
    /// New arrivals are queued ahead of the yielded process.
    #[default]
    ArrivalsFirst,
    /// The yielded process is queued ahead of new arrivals.
    YieldedFirst,
}

/// Outcome of one dispatch run.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchReport {
    /// Gantt trace, when requested.
    pub trace: Option<Trace>,
    /// Dispatches of a process different from the previous one.
    pub context_switches: usize,
    /// Total number of dispatches.
    pub dispatches: usize,
    /// Simulated time when the last process finished.
    pub end_time: i64,
    /// Loop iterations consumed (dispatch rounds/turns plus idle jumps).
    pub iterations: usize,
}

/// Round-robin dispatch engine.
///
/// # Example
///
/// ```
/// use smart_rr::dispatch::{Dispatcher, NoHistory};
/// use smart_rr::models::Process;
/// use smart_rr::quantum::policies::ImprovedSmartQuantum;
///
/// let mut procs = vec![Process::new("P0", 0, 12), Process::new("P1", 0, 8)];
/// let report = Dispatcher::new(ImprovedSmartQuantum)
///     .with_trace(true)
///     .dispatch(&mut procs, &mut NoHistory)
///     .unwrap();
/// assert!(procs.iter().all(|p| p.is_finished()));
/// assert_eq!(report.end_time, 20);
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    policy: Arc<dyn QuantumPolicy>,
    mode: DispatchMode,
    requeue_order: RequeueOrder,
    emit_trace: bool,
    max_iterations: Option<usize>,
}

impl Dispatcher {
    /// Creates a round-mode dispatcher for the given policy.
    pub fn new<P: QuantumPolicy + 'static>(policy: P) -> Self {
        Self::from_arc(Arc::new(policy))
    }

    /// Creates a round-mode dispatcher from a shared policy.
    pub fn from_arc(policy: Arc<dyn QuantumPolicy>) -> Self {
        Self {
            policy,
            mode: DispatchMode::Rounds,
            requeue_order: RequeueOrder::ArrivalsFirst,
            emit_trace: false,
            max_iterations: None,
        }
    }

    /// Sets the dispatch mode.
    pub fn with_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the FIFO requeue order.
    pub fn with_requeue_order(mut self, order: RequeueOrder) -> Self {
        self.requeue_order = order;
        self
    }

    /// Enables or disables trace recording.
    pub fn with_trace(mut self, emit_trace: bool) -> Self {
        self.emit_trace = emit_trace;
        self
    }

    /// Overrides the computed iteration cap.
    pub fn with_max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = Some(limit);
        self
    }

    /// Active policy.
    pub fn policy(&self) -> &dyn QuantumPolicy {
        self.policy.as_ref()
    }

    /// Active mode.
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Runs every process to completion, mutating the records in place.
    ///
    /// # Errors
    /// - [`SimError::InvalidWorkload`] before any time elapses
    /// - [`SimError::PolicyViolation`] if the policy yields an unusable slice
    /// - [`SimError::IterationLimit`] if the loop fails to converge
    pub fn dispatch<R: HistoryRecorder + ?Sized>(
        &self,
        processes: &mut [Process],
        recorder: &mut R,
    ) -> SimResult<DispatchReport> {
        validate_workload(processes)?;

        let limit = self
            .max_iterations
            .unwrap_or_else(|| default_iteration_cap(processes));

        log::debug!(
            "dispatch start: {} processes, policy {}, mode {:?}, cap {}",
            processes.len(),
            self.policy.name(),
            self.mode,
            limit
        );

        let mut state = RunState {
            processes,
            recorder,
            trace: self.emit_trace.then(Trace::new),
            now: 0,
            last: None,
            context_switches: 0,
            dispatches: 0,
            iterations: 0,
            limit,
        };

        match self.mode {
            DispatchMode::Rounds => self.run_rounds(&mut state)?,
            DispatchMode::Fifo => self.run_fifo(&mut state)?,
        }

        log::debug!(
            "dispatch done at t={}: {} dispatches, {} context switches",
            state.now,
            state.dispatches,
            state.context_switches
        );

        Ok(DispatchReport {
            trace: state.trace,
            context_switches: state.context_switches,
            dispatches: state.dispatches,
            end_time: state.now,
            iterations: state.iterations,
        })
    }

    fn run_rounds<R: HistoryRecorder + ?Sized>(
        &self,
        state: &mut RunState<'_, R>,
    ) -> SimResult<()> {
        while !state.all_finished() {
            state.tick()?;

            let now = state.now;
            let mut ready: Vec<usize> = (0..state.processes.len())
                .filter(|&i| state.processes[i].is_ready(now))
                .collect();

            if ready.is_empty() {
                state.idle_to_next_arrival();
                continue;
            }

            // Stable: equal remaining times keep input order.
            ready.sort_by_key(|&i| state.processes[i].remaining_time());
            let remaining: Vec<i64> = ready
                .iter()
                .map(|&i| state.processes[i].remaining_time())
                .collect();
            let slice = self.checked_slice(&remaining)?;

            log::debug!(
                "t={now}: round over {} ready, quantum {}, slack {}",
                ready.len(),
                slice.quantum,
                slice.slack
            );

            for &idx in &ready {
                state.recorder.record(&state.processes[idx].id, slice);
                let cpu_time = slice.allotment(state.processes[idx].remaining_time());
                state.run(idx, cpu_time);
            }
        }
        Ok(())
    }

    fn run_fifo<R: HistoryRecorder + ?Sized>(
        &self,
        state: &mut RunState<'_, R>,
    ) -> SimResult<()> {
        let n = state.processes.len();
        let mut arrival_order: Vec<usize> = (0..n).collect();
        arrival_order.sort_by_key(|&i| state.processes[i].arrival_time);

        let mut admitted = vec![false; n];
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

        while !state.all_finished() {
            state.tick()?;
            admit_arrivals(
                state.processes,
                &arrival_order,
                &mut admitted,
                &mut queue,
                state.now,
            );

            let Some(idx) = queue.pop_front() else {
                state.idle_to_next_arrival();
                continue;
            };

            let mut remaining: Vec<i64> = std::iter::once(idx)
                .chain(queue.iter().copied())
                .map(|i| state.processes[i].remaining_time())
                .collect();
            remaining.sort_unstable();
            let slice = self.checked_slice(&remaining)?;

            state.recorder.record(&state.processes[idx].id, slice);
            let cpu_time = slice.allotment(state.processes[idx].remaining_time());
            state.run(idx, cpu_time);

            if !state.processes[idx].is_finished() {
                if self.requeue_order == RequeueOrder::ArrivalsFirst {
                    admit_arrivals(
                        state.processes,
                        &arrival_order,
                        &mut admitted,
                        &mut queue,
                        state.now,
                    );
                }
                queue.push_back(idx);
            }
        }
        Ok(())
    }

    fn checked_slice(&self, remaining: &[i64]) -> SimResult<TimeSlice> {
        let slice = self.policy.compute(remaining);
        if slice.is_valid() {
            Ok(slice)
        } else {
            Err(SimError::PolicyViolation {
                policy: self.policy.name(),
                quantum: slice.quantum,
                slack: slice.slack,
            })
        }
    }
}

/// Iteration cap for a workload: every dispatch consumes at least one
/// tick of burst, and every idle jump is followed by a dispatch.
fn default_iteration_cap(processes: &[Process]) -> usize {
    let total_burst = processes
        .iter()
        .fold(0i64, |acc, p| acc.saturating_add(p.burst_time.max(0)));
    usize::try_from(total_burst)
        .unwrap_or(usize::MAX)
        .saturating_mul(2)
        .saturating_add(processes.len())
        .saturating_add(1)
}

/// Appends newly arrived, unfinished processes to the queue tail in arrival order.
fn admit_arrivals(
    processes: &[Process],
    arrival_order: &[usize],
    admitted: &mut [bool],
    queue: &mut VecDeque<usize>,
    now: i64,
) {
    for &i in arrival_order {
        if !admitted[i] && processes[i].is_ready(now) {
            admitted[i] = true;
            queue.push_back(i);
        }
    }
}

struct RunState<'a, R: HistoryRecorder + ?Sized> {
    processes: &'a mut [Process],
    recorder: &'a mut R,
    trace: Option<Trace>,
    now: i64,
    last: Option<usize>,
    context_switches: usize,
    dispatches: usize,
    iterations: usize,
    limit: usize,
}

impl<R: HistoryRecorder + ?Sized> RunState<'_, R> {
    fn all_finished(&self) -> bool {
        self.processes.iter().all(Process::is_finished)
    }

    fn tick(&mut self) -> SimResult<()> {
        self.iterations += 1;
        if self.iterations > self.limit {
            return Err(SimError::IterationLimit { limit: self.limit });
        }
        Ok(())
    }

    fn run(&mut self, idx: usize, cpu_time: i64) {
        let start = self.now;
        self.now = self.processes[idx].execute(start, cpu_time);
        self.dispatches += 1;

        if self.last.is_some_and(|prev| prev != idx) {
            self.context_switches += 1;
        }
        self.last = Some(idx);

        let id = &self.processes[idx].id;
        log::trace!("|{start} {id} {}", self.now);
        if let Some(trace) = self.trace.as_mut() {
            trace.push(Segment::dispatch(start, id.clone(), self.now));
        }
    }

    /// Jumps to the earliest pending arrival, or one tick if none remains.
    fn idle_to_next_arrival(&mut self) {
        let now = self.now;
        let next = self
            .processes
            .iter()
            .filter(|p| !p.is_finished() && p.arrival_time > now)
            .map(|p| p.arrival_time)
            .min()
            .unwrap_or_else(|| {
                log::warn!("t={now}: ready queue empty and no pending arrival, advancing one tick");
                now + 1
            });

        log::trace!("|{now} IDLE {next}");
        if let Some(trace) = self.trace.as_mut() {
            trace.push(Segment::idle(now, next));
        }
        self.now = next;
    }
}
