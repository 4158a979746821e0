//! Render lifecycle tracking.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Timing context for a single render.
#[derive(Debug, Clone)]
pub struct TimingContext {
    start: Instant,
    marks: HashMap<String, Instant>,
}

impl TimingContext {
    /// Create a new timing context.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            marks: HashMap::new(),
        }
    }

    /// Record a timing mark. The first mark under a name wins.
    pub fn mark(&mut self, name: &str) {
        self.marks
            .entry(name.to_string())
            .or_insert_with(Instant::now);
    }

    /// Get elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Get time from start to a named mark.
    pub fn since_start(&self, name: &str) -> Option<Duration> {
        self.marks.get(name).map(|t| t.duration_since(self.start))
    }

    /// Get time to the first flush of any bytes.
    pub fn time_to_first_flush(&self) -> Option<Duration> {
        self.since_start("first_flush")
    }

    /// Get time to shell flush.
    pub fn time_to_shell(&self) -> Option<Duration> {
        self.since_start("shell_sent")
    }

    /// Snapshot the timing for a finished render.
    pub fn finish(&self) -> RenderTiming {
        RenderTiming {
            render: self.elapsed(),
            first_flush: self.time_to_first_flush(),
            shell: self.time_to_shell(),
        }
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing information reported alongside a render result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderTiming {
    /// Total render time.
    pub render: Duration,
    /// Time until the first bytes were flushed (streaming only).
    pub first_flush: Option<Duration>,
    /// Time until the shell opening was sent (streaming only).
    pub shell: Option<Duration>,
}
