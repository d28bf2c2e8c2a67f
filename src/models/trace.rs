//! Gantt trace of a simulation run.
//!
//! A trace is the ordered list of `(start, label, end)` segments that
//! describe what occupied the CPU over simulated time. It is written by
//! the dispatcher and only read by diagnostic consumers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What occupied the CPU during a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentLabel {
    /// The named process was running.
    Process(String),
    /// No process was ready.
    Idle,
}

/// A half-open interval `[start, end)` of simulated time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Start instant.
    pub start: i64,
    /// End instant (exclusive).
    pub end: i64,
    /// Occupant.
    pub label: SegmentLabel,
}

impl Segment {
    /// Creates a dispatch segment.
    pub fn dispatch(start: i64, process_id: impl Into<String>, end: i64) -> Self {
        Self {
            start,
            end,
            label: SegmentLabel::Process(process_id.into()),
        }
    }

    /// Creates an idle segment.
    pub fn idle(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            label: SegmentLabel::Idle,
        }
    }

    /// Length of the segment.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether the CPU was idle.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.label, SegmentLabel::Idle)
    }

    /// Process id, if this is a dispatch segment.
    pub fn process_id(&self) -> Option<&str> {
        match &self.label {
            SegmentLabel::Process(id) => Some(id),
            SegmentLabel::Idle => None,
        }
    }
}

/// Append-only Gantt trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    segments: Vec<Segment>,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// All segments in chronological order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments (dispatch and idle).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Dispatch segments only.
    pub fn dispatch_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| !s.is_idle())
    }

    /// Dispatch segments of one process.
    pub fn segments_for<'a>(&'a self, process_id: &'a str) -> impl Iterator<Item = &'a Segment> {
        self.segments
            .iter()
            .filter(move |s| s.process_id() == Some(process_id))
    }

    /// Total CPU time spent running processes.
    pub fn busy_time(&self) -> i64 {
        self.dispatch_segments().map(Segment::duration).sum()
    }

    /// Total time spent idle.
    pub fn idle_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.is_idle())
            .map(Segment::duration)
            .sum()
    }

    /// End of the last segment, 0 for an empty trace.
    pub fn end_time(&self) -> i64 {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Number of switches between distinct consecutive processes.
    ///
    /// Idle gaps are skipped; back-to-back slices of one process do not count.
    pub fn context_switches(&self) -> usize {
        let ids: Vec<&str> = self
            .dispatch_segments()
            .filter_map(Segment::process_id)
            .collect();
        ids.windows(2).filter(|w| w[0] != w[1]).count()
    }

    /// Copy of the trace with adjacent segments of the same occupant merged.
    pub fn coalesced(&self) -> Trace {
        let mut merged: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for s in &self.segments {
            match merged.last_mut() {
                Some(prev) if prev.label == s.label && prev.end == s.start => prev.end = s.end,
                _ => merged.push(s.clone()),
            }
        }
        Trace { segments: merged }
    }
}

impl fmt::Display for Trace {
    /// Renders the classic one-line Gantt form: `|0 IDLE 5|5 P0 8|`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.segments {
            match &s.label {
                SegmentLabel::Process(id) => write!(f, "|{} {} {}", s.start, id, s.end)?,
                SegmentLabel::Idle => write!(f, "|{} IDLE {}", s.start, s.end)?,
            }
        }
        write!(f, "|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace() -> Trace {
        let mut t = Trace::new();
        t.push(Segment::idle(0, 2));
        t.push(Segment::dispatch(2, "P0", 5));
        t.push(Segment::dispatch(5, "P1", 9));
        t.push(Segment::dispatch(9, "P1", 10));
        t.push(Segment::idle(10, 12));
        t.push(Segment::dispatch(12, "P0", 13));
        t
    }

    #[test]
    fn test_busy_and_idle_time() {
        let t = sample_trace();
        assert_eq!(t.busy_time(), 3 + 4 + 1 + 1);
        assert_eq!(t.idle_time(), 4);
        assert_eq!(t.end_time(), 13);
        assert_eq!(t.busy_time() + t.idle_time(), t.end_time());
    }

    #[test]
    fn test_context_switches_skip_idle_and_repeats() {
        let t = sample_trace();
        // P0 → P1, (P1 → P1 not counted), P1 → P0 across idle
        assert_eq!(t.context_switches(), 2);
    }

    #[test]
    fn test_segments_for() {
        let t = sample_trace();
        let p1: Vec<_> = t.segments_for("P1").collect();
        assert_eq!(p1.len(), 2);
        assert_eq!(p1[0].start, 5);
        assert_eq!(t.segments_for("P9").count(), 0);
    }

    #[test]
    fn test_coalesced_merges_adjacent_slices() {
        let t = sample_trace().coalesced();
        assert_eq!(t.len(), 5);
        assert_eq!(t.segments()[2], Segment::dispatch(5, "P1", 10));
        assert_eq!(t.busy_time(), sample_trace().busy_time());
    }

    #[test]
    fn test_display_gantt() {
        let t = sample_trace();
        assert_eq!(
            t.to_string(),
            "|0 IDLE 2|2 P0 5|5 P1 9|9 P1 10|10 IDLE 12|12 P0 13|"
        );
    }

    #[test]
    fn test_empty_trace() {
        let t = Trace::new();
        assert!(t.is_empty());
        assert_eq!(t.busy_time(), 0);
        assert_eq!(t.context_switches(), 0);
        assert_eq!(t.to_string(), "|");
    }
}
