//! Explicit flush control - no implicit buffering.

use serde::{Deserialize, Serialize};

/// When buffered body bytes are written to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlushStrategy {
    /// Flush once the buffer reaches the configured chunk size.
    #[default]
    Auto,
    /// Flush after every token.
    Direct,
    /// Buffer the whole body and flush once at the end.
    Disabled,
}

/// Streaming configuration for the stream renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingOptions {
    /// Flush strategy.
    #[serde(default)]
    pub strategy: FlushStrategy,
    /// Buffer size that triggers the first body flush under `Auto`.
    #[serde(default = "default_max_initial_chunk")]
    pub max_initial_chunk: usize,
    /// Buffer size that triggers later body flushes under `Auto`.
    #[serde(default = "default_max_chunk")]
    pub max_chunk: usize,
}

fn default_max_initial_chunk() -> usize {
    30_000
}

fn default_max_chunk() -> usize {
    10_000
}

impl Default for StreamingOptions {
    fn default() -> Self {
        Self {
            strategy: FlushStrategy::default(),
            max_initial_chunk: default_max_initial_chunk(),
            max_chunk: default_max_chunk(),
        }
    }
}

impl StreamingOptions {
    /// Create streaming options with the given strategy.
    pub fn new(strategy: FlushStrategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    /// Set the chunk thresholds used by `Auto`.
    pub fn with_chunk_sizes(mut self, max_initial_chunk: usize, max_chunk: usize) -> Self {
        self.max_initial_chunk = max_initial_chunk;
        self.max_chunk = max_chunk;
        self
    }
}

/// Controller for managing flush behavior.
#[derive(Debug)]
pub struct FlushController {
    options: StreamingOptions,
    pending_bytes: usize,
    flushes: usize,
}

impl FlushController {
    /// Create a new flush controller.
    pub fn new(options: StreamingOptions) -> Self {
        Self {
            options,
            pending_bytes: 0,
            flushes: 0,
        }
    }

    /// Record bytes added to buffer.
    pub fn add_bytes(&mut self, count: usize) {
        self.pending_bytes += count;
    }

    /// Check if flush is needed.
    pub fn should_flush(&self) -> bool {
        if self.pending_bytes == 0 {
            return false;
        }

        match self.options.strategy {
            FlushStrategy::Direct => true,
            FlushStrategy::Disabled => false,
            FlushStrategy::Auto => {
                let threshold = if self.flushes == 0 {
                    self.options.max_initial_chunk
                } else {
                    self.options.max_chunk
                };
                self.pending_bytes >= threshold
            }
        }
    }

    /// Reset pending byte count after flush.
    pub fn reset(&mut self) {
        self.pending_bytes = 0;
        self.flushes += 1;
    }

    /// Number of body flushes so far.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Get current strategy.
    pub fn strategy(&self) -> FlushStrategy {
        self.options.strategy
    }
}

impl Default for FlushController {
    fn default() -> Self {
        Self::new(StreamingOptions::default())
    }
}
