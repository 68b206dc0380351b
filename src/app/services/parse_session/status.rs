//! Parse state machine and the shared status cell

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Lifecycle state of a parse session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseState {
    NotStarted,
    Running,
    /// Completed normally; tables are exposed
    Ready,
    /// Unrecoverable error; no tables are exposed
    Failed,
    /// Cancelled by the caller; distinct from Ready so partial data is
    /// never mistaken for a complete result
    Cancelled,
}

impl ParseState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed | Self::Cancelled)
    }
}

/// A snapshot of session progress.
///
/// Counters advance monotonically while the session is Running and freeze
/// at the terminal transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseStatus {
    pub state: ParseState,
    pub records_processed: u64,
    pub bytes_processed: u64,
    /// Size of the input file
    pub total_bytes: u64,
    /// Diagnostics recorded so far (unrecognized types, field failures)
    pub error_records: u64,
    /// Populated on Failed and Cancelled
    pub error_detail: Option<String>,
    /// Wall-clock time spent in the pass
    pub elapsed: Duration,
}

impl ParseStatus {
    fn new(total_bytes: u64) -> Self {
        Self {
            state: ParseState::NotStarted,
            records_processed: 0,
            bytes_processed: 0,
            total_bytes,
            error_records: 0,
            error_detail: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Completion percentage by bytes, in 0.0..=100.0
    pub fn percent_complete(&self) -> f64 {
        if self.total_bytes == 0 {
            if self.state.is_terminal() { 100.0 } else { 0.0 }
        } else {
            (self.bytes_processed as f64 / self.total_bytes as f64) * 100.0
        }
    }

    /// Records per second over the elapsed wall-clock time
    pub fn records_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.records_processed as f64 / secs
        } else {
            0.0
        }
    }
}

/// Shared status cell: one writer (the pass), any number of readers.
///
/// All fields of a snapshot are written under one lock acquisition, so a
/// reader can never observe records advanced without bytes, or a terminal
/// state with stale counters.
pub(crate) struct StatusCell {
    started: Instant,
    inner: Mutex<ParseStatus>,
}

impl StatusCell {
    pub fn new(total_bytes: u64) -> Self {
        Self {
            started: Instant::now(),
            inner: Mutex::new(ParseStatus::new(total_bytes)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ParseStatus> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn mark_running(&self) {
        let mut status = self.lock();
        status.state = ParseState::Running;
    }

    /// Publish progress; counters only ever grow.
    pub fn progress(&self, records: u64, bytes: u64, error_records: u64) {
        let mut status = self.lock();
        status.records_processed = records;
        status.bytes_processed = bytes;
        status.error_records = error_records;
        status.elapsed = self.started.elapsed();
    }

    pub fn finish_ready(&self) {
        let mut status = self.lock();
        status.state = ParseState::Ready;
        status.elapsed = self.started.elapsed();
    }

    pub fn finish_failed(&self, detail: impl Into<String>) {
        let mut status = self.lock();
        status.state = ParseState::Failed;
        status.error_detail = Some(detail.into());
        status.elapsed = self.started.elapsed();
    }

    pub fn finish_cancelled(&self, detail: impl Into<String>) {
        let mut status = self.lock();
        status.state = ParseState::Cancelled;
        status.error_detail = Some(detail.into());
        status.elapsed = self.started.elapsed();
    }

    pub fn snapshot(&self) -> ParseStatus {
        let mut status = self.lock().clone();
        if status.state == ParseState::Running {
            status.elapsed = self.started.elapsed();
        }
        status
    }
}
