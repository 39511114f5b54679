//! Tokenizer: read a stream, split it into tokens and push them onto a queue.
//!
//! The tokenizer borrows the producer side of the queue and never closes it;
//! dropping the sender is left to the caller, who may still want to feed more
//! tokens from another source.

use futures::{Stream, StreamExt};
use tokio::io::AsyncRead;
use tokio_util::codec::{Decoder, FramedRead};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::queue::Enqueue;

/// Split `reader` with `rule` and enqueue every token in stream order.
///
/// Waits whenever `dest` is full. Stops at the end of the stream, at the first
/// read or splitting error (reported as [`Error::Scan`]), or when every
/// receiver of `dest` is gone ([`Error::QueueClosed`]).
///
/// # Examples
///
/// ```rust
/// use streamdrain::{queue, split, tokenize};
///
/// # tokio_test::block_on(async {
/// let (tx, mut rx) = queue::bounded(8);
/// let input: &[u8] = b"first\nsecond\n";
/// tokenize::stream_to_queue(input, split::lines(), &tx).await.unwrap();
/// drop(tx);
///
/// assert_eq!(rx.recv().await.as_deref(), Some("first"));
/// assert_eq!(rx.recv().await.as_deref(), Some("second"));
/// assert_eq!(rx.recv().await, None);
/// # });
/// ```
pub async fn stream_to_queue<R, D, Q>(reader: R, rule: D, dest: &Q) -> Result<()>
where
    R: AsyncRead + Unpin,
    D: Decoder<Item = String>,
    D::Error: std::error::Error + Send + Sync + 'static,
    Q: Enqueue + ?Sized,
{
    scanner_to_queue(FramedRead::new(reader, rule), dest).await
}

/// Enqueue every token of an already split stream, such as a [`FramedRead`].
pub async fn scanner_to_queue<S, E, Q>(tokens: S, dest: &Q) -> Result<()>
where
    S: Stream<Item = std::result::Result<String, E>>,
    E: std::error::Error + Send + Sync + 'static,
    Q: Enqueue + ?Sized,
{
    tokio::pin!(tokens);
    let mut count = 0usize;

    while let Some(token) = tokens.next().await {
        let token = token.map_err(|e| {
            warn!(error = %e, tokens = count, "tokenizer stopped on scan error");
            Error::scan(e)
        })?;
        dest.enqueue(token).await?;
        count += 1;
    }

    debug!(tokens = count, "token stream exhausted");
    Ok(())
}
