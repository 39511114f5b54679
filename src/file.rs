//! File wrappers around the tokenizer and drainer.
//!
//! Every function here owns the file it opens; the handle is dropped on every
//! exit path, successful or not.

use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::BufWriter;
use tokio_util::codec::Decoder;
use tracing::{debug, warn};

use crate::config::{DrainConfig, DEFAULT_BUFFER_SIZE};
use crate::drain::Drainer;
use crate::error::{Error, Result};
use crate::queue::{Dequeue, Enqueue};
use crate::split;
use crate::tokenize::stream_to_queue;

/// Enqueue every line of the file at `path`.
pub async fn file_lines_to_queue<P, Q>(path: P, dest: &Q) -> Result<()>
where
    P: AsRef<Path>,
    Q: Enqueue + ?Sized,
{
    file_to_queue(path, split::lines(), dest).await
}

/// Open `path` read-only, split it with `rule` and enqueue every token.
///
/// A missing or unreadable file is reported as [`Error::Open`].
pub async fn file_to_queue<P, D, Q>(path: P, rule: D, dest: &Q) -> Result<()>
where
    P: AsRef<Path>,
    D: Decoder<Item = String>,
    D::Error: std::error::Error + Send + Sync + 'static,
    Q: Enqueue + ?Sized,
{
    let path = path.as_ref();
    let file = File::open(path).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "cannot open input file");
        Error::open(path, e)
    })?;
    debug!(path = %path.display(), "reading tokens from file");
    stream_to_queue(file, rule, dest).await
}

/// Write every token of `source` to the file at `path`, one per line, using
/// the default buffer size.
pub async fn queue_to_file<Q, P>(source: &mut Q, path: P) -> Result<()>
where
    Q: Dequeue + ?Sized,
    P: AsRef<Path>,
{
    queue_to_file_sized(source, DEFAULT_BUFFER_SIZE, path).await
}

/// Write every token of `source` to the file at `path`, one per line,
/// through a buffer of `buf_size` bytes.
///
/// The file is created if absent and truncated if present; it is never
/// appended to.
pub async fn queue_to_file_sized<Q, P>(source: &mut Q, buf_size: usize, path: P) -> Result<()>
where
    Q: Dequeue + ?Sized,
    P: AsRef<Path>,
{
    let config = DrainConfig::default().buffer_size(buf_size);
    queue_to_file_with(source, path, config).await.map(|_| ())
}

/// Write every token of `source` to the file at `path` as described by
/// `config`, returning the number of tokens written.
pub async fn queue_to_file_with<Q, P>(source: &mut Q, path: P, config: DrainConfig) -> Result<usize>
where
    Q: Dequeue + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| {
            warn!(path = %path.display(), error = %e, "cannot open output file");
            Error::open(path, e)
        })?;
    debug!(path = %path.display(), buffer_size = config.buffer_size, "writing tokens to file");

    let mut writer = BufWriter::with_capacity(config.buffer_size, file);
    Drainer::with_config(config)
        .drain_buffered(source, &mut writer)
        .await
}
