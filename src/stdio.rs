//! Standard input and output wrappers around the tokenizer and drainer.

use tokio::io::BufWriter;
use tokio_util::codec::Decoder;

use crate::config::{DrainConfig, DEFAULT_BUFFER_SIZE};
use crate::drain::Drainer;
use crate::error::Result;
use crate::queue::{Dequeue, Enqueue};
use crate::split;
use crate::tokenize::stream_to_queue;

/// Enqueue every line read from standard input.
pub async fn stdin_lines_to_queue<Q>(dest: &Q) -> Result<()>
where
    Q: Enqueue + ?Sized,
{
    stdin_to_queue(split::lines(), dest).await
}

/// Enqueue every whitespace-separated word read from standard input.
pub async fn stdin_words_to_queue<Q>(dest: &Q) -> Result<()>
where
    Q: Enqueue + ?Sized,
{
    stdin_to_queue(split::words(), dest).await
}

/// Split standard input with `rule` and enqueue every token.
pub async fn stdin_to_queue<D, Q>(rule: D, dest: &Q) -> Result<()>
where
    D: Decoder<Item = String>,
    D::Error: std::error::Error + Send + Sync + 'static,
    Q: Enqueue + ?Sized,
{
    stream_to_queue(tokio::io::stdin(), rule, dest).await
}

/// Write every token of `source` to standard output, one per line, using the
/// default buffer size.
pub async fn queue_to_stdout<Q>(source: &mut Q) -> Result<()>
where
    Q: Dequeue + ?Sized,
{
    queue_to_stdout_sized(source, DEFAULT_BUFFER_SIZE).await
}

/// Write every token of `source` to standard output, one per line, through a
/// buffer of `buf_size` bytes.
pub async fn queue_to_stdout_sized<Q>(source: &mut Q, buf_size: usize) -> Result<()>
where
    Q: Dequeue + ?Sized,
{
    let config = DrainConfig::default().buffer_size(buf_size);
    let mut writer = BufWriter::with_capacity(config.buffer_size, tokio::io::stdout());
    Drainer::with_config(config)
        .drain_buffered(source, &mut writer)
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue;

    #[tokio::test]
    async fn test_queue_to_stdout() {
        let (tx, mut rx) = queue::bounded(2);
        let producer = tokio::spawn(async move {
            for token in ["abcde", "fghij", "klmno", "pqrst"] {
                tx.enqueue(token.to_string()).await.unwrap();
            }
        });

        queue_to_stdout(&mut rx).await.unwrap();
        producer.await.unwrap();
    }

    #[tokio::test]
    async fn test_queue_to_stdout_closed_queue() {
        let (tx, mut rx) = queue::bounded(1);
        drop(tx);
        queue_to_stdout_sized(&mut rx, 16).await.unwrap();
    }
}
