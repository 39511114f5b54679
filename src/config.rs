//! Configuration defaults for draining queues into writers.

/// Default capacity, in bytes, of the buffered writer used for files and stdout.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Line separator appended after every token written to a file or stdout.
pub const NEWLINE: &str = "\n";

/// Default upper bound, in bytes, on a single line or word token.
pub const MAX_TOKEN_SIZE: usize = 64 * 1024;

/// Configuration for a [`Drainer`](crate::drain::Drainer).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DrainConfig {
    /// Text written after every token; empty writes nothing
    pub separator: String,
    /// Capacity of the buffered writer wrapped around files and stdout
    pub buffer_size: usize,
    /// Flush the writer whenever the queue is observed empty
    pub flush_on_empty: bool,
    /// Yield the current task whenever the queue is observed empty
    pub yield_on_empty: bool,
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self {
            separator: NEWLINE.to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            flush_on_empty: true,
            yield_on_empty: true,
        }
    }
}

impl DrainConfig {
    /// Create a config with the given separator and default everything else
    pub fn with_separator<S: Into<String>>(separator: S) -> Self {
        Self {
            separator: separator.into(),
            ..Self::default()
        }
    }

    /// Set the separator
    pub fn separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the buffer size
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set whether to flush when the queue runs dry
    pub fn flush_on_empty(mut self, flush: bool) -> Self {
        self.flush_on_empty = flush;
        self
    }

    /// Set whether to yield when the queue runs dry
    pub fn yield_on_empty(mut self, yield_now: bool) -> Self {
        self.yield_on_empty = yield_now;
        self
    }
}
