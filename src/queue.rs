//! The queue that hands tokens from a tokenizer to a drainer.
//!
//! Queues are plain tokio `mpsc` channels of `String`. The [`Enqueue`] and
//! [`Dequeue`] traits let the tokenizer and drainer work with bounded and
//! unbounded channels alike, and [`SharedReceiver`] lets several drainers pull
//! from the same queue.
//!
//! Closing is done by dropping every sender. Drainers observe it by receiving
//! the remaining tokens and then `None`; there is no sentinel token.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex as TokioMutex};

use crate::error::Result;

/// Producer half of a bounded token queue
pub type TokenSender = mpsc::Sender<String>;

/// Consumer half of a bounded token queue
pub type TokenReceiver = mpsc::Receiver<String>;

/// Create a bounded token queue holding at most `capacity` tokens.
///
/// # Panics
///
/// Panics if `capacity` is zero, like [`tokio::sync::mpsc::channel`].
pub fn bounded(capacity: usize) -> (TokenSender, TokenReceiver) {
    mpsc::channel(capacity)
}

/// Create a token queue with no capacity limit
pub fn unbounded() -> (mpsc::UnboundedSender<String>, mpsc::UnboundedReceiver<String>) {
    mpsc::unbounded_channel()
}

/// The producer side of a token queue.
///
/// # Examples
///
/// ```rust
/// use streamdrain::queue::{self, Enqueue};
///
/// # tokio_test::block_on(async {
/// let (tx, mut rx) = queue::bounded(4);
/// tx.enqueue("hello".to_string()).await.unwrap();
/// assert_eq!(rx.recv().await.as_deref(), Some("hello"));
/// # });
/// ```
#[async_trait]
pub trait Enqueue: Send + Sync {
    /// Push a token, waiting while the queue is full.
    ///
    /// Fails with [`Error::QueueClosed`](crate::Error::QueueClosed) once
    /// every receiver is gone.
    async fn enqueue(&self, token: String) -> Result<()>;
}

#[async_trait]
impl Enqueue for mpsc::Sender<String> {
    async fn enqueue(&self, token: String) -> Result<()> {
        self.send(token).await?;
        Ok(())
    }
}

#[async_trait]
impl Enqueue for mpsc::UnboundedSender<String> {
    async fn enqueue(&self, token: String) -> Result<()> {
        self.send(token)?;
        Ok(())
    }
}

/// The consumer side of a token queue.
#[async_trait]
pub trait Dequeue: Send {
    /// Pop the next token, waiting while the queue is empty.
    ///
    /// Returns `None` once the queue is closed and every token was taken.
    async fn dequeue(&mut self) -> Option<String>;

    /// Whether the queue currently holds no tokens.
    ///
    /// With producers running concurrently this is only a snapshot.
    fn is_empty(&self) -> bool;
}

#[async_trait]
impl Dequeue for mpsc::Receiver<String> {
    async fn dequeue(&mut self) -> Option<String> {
        self.recv().await
    }

    fn is_empty(&self) -> bool {
        mpsc::Receiver::is_empty(self)
    }
}

#[async_trait]
impl Dequeue for mpsc::UnboundedReceiver<String> {
    async fn dequeue(&mut self) -> Option<String> {
        self.recv().await
    }

    fn is_empty(&self) -> bool {
        mpsc::UnboundedReceiver::is_empty(self)
    }
}

/// A receiver that any number of drainers can pull from.
///
/// Each token is still delivered to exactly one holder. Clones share the
/// underlying receiver.
pub struct SharedReceiver {
    inner: Arc<TokioMutex<TokenReceiver>>,
}

impl SharedReceiver {
    /// Wrap a bounded receiver
    pub fn new(receiver: TokenReceiver) -> Self {
        Self {
            inner: Arc::new(TokioMutex::new(receiver)),
        }
    }
}

impl From<TokenReceiver> for SharedReceiver {
    fn from(receiver: TokenReceiver) -> Self {
        Self::new(receiver)
    }
}

impl Clone for SharedReceiver {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[async_trait]
impl Dequeue for SharedReceiver {
    async fn dequeue(&mut self) -> Option<String> {
        self.inner.lock().await.recv().await
    }

    fn is_empty(&self) -> bool {
        // A held lock means another drainer is parked waiting for a token.
        self.inner
            .try_lock()
            .map(|receiver| receiver.is_empty())
            .unwrap_or(true)
    }
}
