//! Integration tests for moving tokens between streams, queues and writers

use std::io;
use streamdrain::prelude::*;
use tempfile::tempdir;
use tokio::io::BufWriter;
use tokio_test::io::Builder;

async fn collect<Q: Dequeue>(mut rx: Q) -> Vec<String> {
    let mut tokens = Vec::new();
    while let Some(token) = rx.dequeue().await {
        tokens.push(token);
    }
    tokens
}

#[tokio::test]
async fn test_reader_to_writer_pipeline() -> Result<()> {
    let (tx, mut rx) = queue::bounded(2);

    let producer = tokio::spawn(async move {
        let input: &[u8] = b"the quick\nbrown fox\njumps\n";
        stream_to_queue(input, split::lines(), &tx).await
    });

    let mut out = Vec::new();
    queue_to_writer(&mut rx, "|", &mut out).await?;
    producer.await.unwrap()?;

    assert_eq!(out, b"the quick|brown fox|jumps|");
    Ok(())
}

#[tokio::test]
async fn test_words_through_buffered_writer() -> Result<()> {
    let (tx, mut rx) = queue::bounded(3);

    let producer = tokio::spawn(async move {
        let input: &[u8] = b"  lorem ipsum\tdolor\n\nsit  amet ";
        stream_to_queue(input, split::words(), &tx).await
    });

    let mut writer = BufWriter::with_capacity(5, Vec::new());
    queue_to_buffered_writer(&mut rx, " ", &mut writer).await?;
    producer.await.unwrap()?;

    assert_eq!(writer.into_inner(), b"lorem ipsum dolor sit amet ");
    Ok(())
}

#[tokio::test]
async fn test_file_round_trip() -> Result<()> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tokens.txt");
    let tokens = vec!["first line", "", "  indented", "last"];

    let (tx, mut rx) = queue::bounded(2);
    let expected = tokens.clone();
    let producer = tokio::spawn(async move {
        for token in expected {
            tx.enqueue(token.to_string()).await?;
        }
        Ok::<_, Error>(())
    });
    queue_to_file(&mut rx, &path).await?;
    producer.await.unwrap()?;

    let (tx, rx) = queue::bounded(2);
    let reader = tokio::spawn({
        let path = path.clone();
        async move { file_lines_to_queue(&path, &tx).await }
    });
    let read_back = collect(rx).await;
    reader.await.unwrap()?;

    assert_eq!(read_back, tokens);
    Ok(())
}

#[tokio::test]
async fn test_closed_queue_writes_nothing() -> Result<()> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    tokio::fs::write(&path, "stale").await.unwrap();

    let (tx, mut rx) = queue::bounded(1);
    drop(tx);
    queue_to_file(&mut rx, &path).await?;

    assert_eq!(tokio::fs::read(&path).await.unwrap(), b"");
    Ok(())
}

#[tokio::test]
async fn test_failing_sink_discards_remaining_tokens() {
    let (tx, mut rx) = queue::bounded(8);
    for token in ["one", "two", "three"] {
        tx.enqueue(token.to_string()).await.unwrap();
    }
    drop(tx);

    let mut sink = Builder::new()
        .write(b"one\n")
        .write_error(io::Error::new(io::ErrorKind::Other, "disk full"))
        .build();

    let err = queue_to_writer(&mut rx, "\n", &mut sink).await.unwrap_err();
    assert!(matches!(err, Error::Write(_)));
    assert_eq!(collect(rx).await, vec!["three"]);
}

#[tokio::test]
async fn test_oversized_token_is_scan_error() {
    let (tx, rx) = queue::bounded(4);
    let input: &[u8] = b"ok\nthis line is far too long\n";

    let err = stream_to_queue(input, split::lines_with_max_length(10), &tx)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Scan(_)));
    drop(tx);

    assert_eq!(collect(rx).await, vec!["ok"]);
}

#[tokio::test]
async fn test_shared_queue_many_drainers() -> Result<()> {
    let (tx, rx) = queue::bounded(4);
    let shared = SharedReceiver::new(rx);

    let mut drainers = Vec::new();
    for _ in 0..3 {
        let mut source = shared.clone();
        drainers.push(tokio::spawn(async move {
            let mut out = Vec::new();
            queue_to_writer(&mut source, "\n", &mut out).await?;
            Ok::<_, Error>(out)
        }));
    }
    drop(shared);

    for i in 0..200 {
        tx.enqueue(format!("token-{i}")).await?;
    }
    drop(tx);

    let mut seen = Vec::new();
    for drainer in drainers {
        let out = drainer.await.unwrap()?;
        let text = String::from_utf8(out).unwrap();
        seen.extend(text.lines().map(str::to_string));
    }
    seen.sort();

    let mut expected: Vec<String> = (0..200).map(|i| format!("token-{i}")).collect();
    expected.sort();
    assert_eq!(seen, expected);
    Ok(())
}

#[tokio::test]
async fn test_custom_config_drainer() -> Result<()> {
    let (tx, mut rx) = queue::unbounded();
    let input: &[u8] = "héllo".as_bytes();
    stream_to_queue(input, split::chars(), &tx).await?;
    drop(tx);

    let config = DrainConfig::with_separator("-").yield_on_empty(false);
    let mut out = Vec::new();
    let written = Drainer::with_config(config).drain(&mut rx, &mut out).await?;

    assert_eq!(written, 5);
    assert_eq!(String::from_utf8(out).unwrap(), "h-é-l-l-o-");
    Ok(())
}
