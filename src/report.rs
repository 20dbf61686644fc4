//! Search progress and result reporting.
//!
//! The engine itself never touches the console; it pushes structured events
//! into an [`EventSink`] supplied by the caller. Event payloads are
//! serializable so a sink can forward them as JSON unchanged.

use std::time::Duration;

use serde::Serialize;

/// A confirmed relation `a^5 + b^5 + c^5 + d^5 = e^5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Discovery {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
    pub e: u32,
    /// Iteration count at the moment of discovery.
    pub iterations: u64,
    pub elapsed: Duration,
}

/// Periodic progress snapshot, emitted every `2^progress_shift` iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Current counter tuple, outermost first.
    pub counters: [u32; 4],
    pub iterations: u64,
    pub elapsed: Duration,
    /// Throughput in iterations per millisecond.
    pub per_ms: u64,
    /// Iterations per filter hit; higher means the bitmap rejects more.
    pub filter_ratio: u64,
}

/// Final account of a finished (or interrupted) search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub limit: u32,
    pub iterations: u64,
    pub filter_hits: u64,
    pub discoveries: Vec<Discovery>,
    pub elapsed: Duration,
    pub per_ms: u64,
    /// True when the stop flag ended the search before exhaustion.
    pub interrupted: bool,
}

/// Receiver for engine events. All methods default to no-ops so sinks only
/// implement what they display.
pub trait EventSink {
    /// Power table and membership index are built; search is about to start.
    fn on_table_ready(&mut self, limit: u32, elapsed: Duration) {
        let _ = (limit, elapsed);
    }

    fn on_progress(&mut self, progress: &Progress) {
        let _ = progress;
    }

    fn on_discovery(&mut self, discovery: &Discovery) {
        let _ = discovery;
    }

    /// A confirmed hit suppressed as a multiple of an earlier result base.
    fn on_duplicate(&mut self, discovery: &Discovery) {
        let _ = discovery;
    }
}

/// Sink that discards everything.
pub struct NullSink;

impl EventSink for NullSink {}
