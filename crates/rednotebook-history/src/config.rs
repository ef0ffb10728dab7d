//! Bounds for the per-key undo stacks.

/// Number of actions kept per key in steady state.
const DEFAULT_SIZE: usize = 100;

/// Extra actions tolerated before a batch of old actions is dropped.
const DEFAULT_BUFFER: usize = 20;

/// Configuration for the history system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Actions retained per key after a truncation.
    pub size: usize,
    /// Actions dropped from the front of the stack in one truncation.
    pub buffer: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            buffer: DEFAULT_BUFFER,
        }
    }
}

impl HistoryConfig {
    /// Creates a config with explicit bounds. `buffer` is at least 1.
    pub fn new(size: usize, buffer: usize) -> Self {
        Self {
            size,
            buffer: buffer.max(1),
        }
    }

    /// Actions dropped per truncation, never zero.
    pub fn batch(&self) -> usize {
        self.buffer.max(1)
    }

    /// Stack length above which the oldest `buffer` actions are dropped.
    pub fn threshold(&self) -> usize {
        self.size + self.buffer
    }
}
