//! # Token queues between async readers and writers
//!
//! This crate moves text tokens from streams (files, standard input, any
//! `AsyncRead`) into a bounded queue, and from a queue back out to writers
//! (files, standard output, any `AsyncWrite`). The producer and the consumer
//! run as separate tasks and talk only through the queue.
//!
//! ## Core Concepts
//!
//! - **Token**: a `String` cut out of a stream by a splitting rule
//! - **Splitting rule**: a [`Decoder`](tokio_util::codec::Decoder) yielding
//!   strings, such as [`split::lines`] or [`split::words`]
//! - **Queue**: a tokio `mpsc` channel; dropping every sender closes it
//! - **Tokenizer**: fills a queue from a stream ([`tokenize`])
//! - **Drainer**: empties a queue into a writer ([`drain`])
//!
//! ## Example
//!
//! ```rust
//! use streamdrain::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let (tx, mut rx) = queue::bounded(16);
//!
//!     let producer = tokio::spawn(async move {
//!         let input: &[u8] = b"one two\nthree\n";
//!         stream_to_queue(input, split::words(), &tx).await
//!     });
//!
//!     let mut out = Vec::new();
//!     queue_to_writer(&mut rx, ".", &mut out).await?;
//!     producer.await.expect("producer panicked")?;
//!
//!     assert_eq!(out, b"one.two.three.");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod drain;
pub mod error;
pub mod file;
pub mod queue;
pub mod split;
pub mod stdio;
pub mod tokenize;

// Re-export commonly used items
pub mod prelude {
    pub use crate::config::{DrainConfig, DEFAULT_BUFFER_SIZE, MAX_TOKEN_SIZE, NEWLINE};
    pub use crate::drain::{queue_to_buffered_writer, queue_to_writer, Drainer};
    pub use crate::error::{Error, Result};
    pub use crate::file::{
        file_lines_to_queue, file_to_queue, queue_to_file, queue_to_file_sized,
        queue_to_file_with,
    };
    pub use crate::queue::{self, Dequeue, Enqueue, SharedReceiver, TokenReceiver, TokenSender};
    pub use crate::split;
    pub use crate::stdio::{
        queue_to_stdout, queue_to_stdout_sized, stdin_lines_to_queue, stdin_to_queue,
        stdin_words_to_queue,
    };
    pub use crate::tokenize::{scanner_to_queue, stream_to_queue};
}

// Re-export main error type
pub use error::{Error, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
