//! Drainer: pop tokens off a queue and write them to a sink.
//!
//! The drainer runs until the queue is closed and empty. Whenever it finds
//! the queue empty after a write it cannot know when the next token arrives,
//! so it flushes buffered output (for [`BufWriter`] sinks) and yields the task
//! instead of holding bytes back indefinitely. Output is always flushed before
//! a successful return.

use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, trace, warn};

use crate::config::DrainConfig;
use crate::error::{IntoError, Result};
use crate::queue::Dequeue;

/// Drains queues into writers according to a [`DrainConfig`].
///
/// # Examples
///
/// ```rust
/// use streamdrain::drain::Drainer;
/// use streamdrain::queue::{self, Enqueue};
///
/// # tokio_test::block_on(async {
/// let (tx, mut rx) = queue::bounded(4);
/// for token in ["a", "b", "c"] {
///     tx.enqueue(token.to_string()).await.unwrap();
/// }
/// drop(tx);
///
/// let mut out = Vec::new();
/// let written = Drainer::new().separator(".").drain(&mut rx, &mut out).await.unwrap();
/// assert_eq!(written, 3);
/// assert_eq!(out, b"a.b.c.");
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct Drainer {
    config: DrainConfig,
}

impl Drainer {
    /// Create a drainer with the default config (newline separator)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a drainer from an existing config
    pub fn with_config(config: DrainConfig) -> Self {
        Self { config }
    }

    /// Set the separator written after each token
    pub fn separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.config.separator = separator.into();
        self
    }

    /// Set whether buffered sinks are flushed when the queue runs dry
    pub fn flush_on_empty(mut self, flush: bool) -> Self {
        self.config.flush_on_empty = flush;
        self
    }

    /// Set whether the task yields when the queue runs dry
    pub fn yield_on_empty(mut self, yield_now: bool) -> Self {
        self.config.yield_on_empty = yield_now;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &DrainConfig {
        &self.config
    }

    /// Drain `source` into an unbuffered writer.
    ///
    /// Returns the number of tokens written. The writer is flushed once, after
    /// the queue closes.
    pub async fn drain<Q, W>(&self, source: &mut Q, writer: &mut W) -> Result<usize>
    where
        Q: Dequeue + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
    {
        self.run(source, writer, false).await
    }

    /// Drain `source` into a buffered writer, flushing whenever the queue runs
    /// dry (unless disabled) and once more after it closes.
    pub async fn drain_buffered<Q, W>(
        &self,
        source: &mut Q,
        writer: &mut BufWriter<W>,
    ) -> Result<usize>
    where
        Q: Dequeue + ?Sized,
        W: AsyncWrite + Unpin,
    {
        self.run(source, writer, self.config.flush_on_empty).await
    }

    async fn run<Q, W>(&self, source: &mut Q, writer: &mut W, flush_on_empty: bool) -> Result<usize>
    where
        Q: Dequeue + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
    {
        let result = self.write_all_tokens(source, writer, flush_on_empty).await;
        match &result {
            Ok(written) => debug!(tokens = written, "queue drained"),
            Err(e) => warn!(error = %e, "drainer stopped, queued tokens are dropped"),
        }
        result
    }

    async fn write_all_tokens<Q, W>(
        &self,
        source: &mut Q,
        writer: &mut W,
        flush_on_empty: bool,
    ) -> Result<usize>
    where
        Q: Dequeue + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
    {
        let separator = self.config.separator.as_bytes();
        let mut written = 0usize;

        while let Some(token) = source.dequeue().await {
            writer.write_all(token.as_bytes()).await.into_write_error()?;
            if !separator.is_empty() {
                writer.write_all(separator).await.into_write_error()?;
            }
            written += 1;

            if source.is_empty() {
                if flush_on_empty {
                    trace!(tokens = written, "queue empty, flushing");
                    writer.flush().await.into_flush_error()?;
                }
                if self.config.yield_on_empty {
                    tokio::task::yield_now().await;
                }
            }
        }

        writer.flush().await.into_flush_error()?;
        Ok(written)
    }
}

/// Write every token of `source` to `writer`, each followed by `separator`,
/// until the queue is closed and empty.
///
/// The first write error is returned at once; tokens still queued are not
/// written.
pub async fn queue_to_writer<Q, W>(source: &mut Q, separator: &str, writer: &mut W) -> Result<()>
where
    Q: Dequeue + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    Drainer::new()
        .separator(separator)
        .drain(source, writer)
        .await
        .map(|_| ())
}

/// Like [`queue_to_writer`], but flushes `writer` whenever the queue runs dry
/// and before returning.
pub async fn queue_to_buffered_writer<Q, W>(
    source: &mut Q,
    separator: &str,
    writer: &mut BufWriter<W>,
) -> Result<()>
where
    Q: Dequeue + ?Sized,
    W: AsyncWrite + Unpin,
{
    Drainer::new()
        .separator(separator)
        .drain_buffered(source, writer)
        .await
        .map(|_| ())
}
