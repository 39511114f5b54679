//! Copy standard input to standard output through a token queue, one token
//! per line.
//!
//! ```sh
//! printf 'one two\nthree\n' | RUST_LOG=debug streamdrain-cat --split words
//! ```

use clap::{Parser, ValueEnum};
use streamdrain::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Split {
    Lines,
    Words,
    Chars,
}

#[derive(Parser, Debug)]
#[command(name = "streamdrain-cat", version, about = "Tokenize stdin and write each token to stdout")]
struct Cli {
    /// How standard input is split into tokens
    #[arg(short, long, value_enum, default_value = "lines")]
    split: Split,

    /// Capacity of the queue between reader and writer
    #[arg(short, long, default_value_t = 64)]
    capacity: usize,

    /// Size of the stdout buffer in bytes
    #[arg(short, long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Cli {
        split: rule,
        capacity,
        buffer_size,
    } = cli;
    let (tx, rx) = queue::bounded(capacity.max(1));

    // Each side owns its end of the queue, so a failure on one side closes
    // the queue for the other.
    let read = async move {
        match rule {
            Split::Lines => stdin_lines_to_queue(&tx).await,
            Split::Words => stdin_words_to_queue(&tx).await,
            Split::Chars => stdin_to_queue(split::chars(), &tx).await,
        }
    };
    let write = async move {
        let mut rx = rx;
        queue_to_stdout_sized(&mut rx, buffer_size).await
    };

    let (read, write) = tokio::join!(read, write);
    write?;
    read
}
