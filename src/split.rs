//! Splitting rules that cut a byte stream into text tokens.
//!
//! A splitting rule is any [`Decoder`] whose item is a `String`. This module
//! provides the common ones: [`Lines`], [`Words`] and [`Chars`]. Custom rules
//! only need to implement [`Decoder`] and can be handed to the tokenizer in the
//! same way.
//!
//! # Examples
//!
//! ```rust
//! use futures::StreamExt;
//! use streamdrain::split;
//! use tokio_util::codec::FramedRead;
//!
//! # tokio_test::block_on(async {
//! let input: &[u8] = b"one two\n three";
//! let words: Vec<String> = FramedRead::new(input, split::words())
//!     .map(|token| token.unwrap())
//!     .collect()
//!     .await;
//! assert_eq!(words, vec!["one", "two", "three"]);
//! # });
//! ```

use std::io;
use thiserror::Error;
use tokio_util::bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, LinesCodec, LinesCodecError};

use crate::config::MAX_TOKEN_SIZE;

/// Errors raised while splitting a stream
#[derive(Debug, Error)]
pub enum SplitError {
    /// A token grew past the rule's maximum length
    #[error("token exceeds maximum length of {max} bytes")]
    TokenTooLong { max: usize },

    /// The stream is not valid UTF-8
    #[error("stream contains invalid UTF-8")]
    InvalidUtf8,

    /// Reading from the underlying stream failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<LinesCodecError> for SplitError {
    fn from(e: LinesCodecError) -> Self {
        match e {
            LinesCodecError::MaxLineLengthExceeded => SplitError::TokenTooLong {
                max: MAX_TOKEN_SIZE,
            },
            LinesCodecError::Io(e) if e.kind() == io::ErrorKind::InvalidData => {
                SplitError::InvalidUtf8
            }
            LinesCodecError::Io(e) => SplitError::Io(e),
        }
    }
}

/// Split on line feeds, using the default maximum token length
pub fn lines() -> Lines {
    Lines::new(MAX_TOKEN_SIZE)
}

/// Split on line feeds, allowing lines of at most `max_length` bytes
pub fn lines_with_max_length(max_length: usize) -> Lines {
    Lines::new(max_length)
}

/// Split on runs of whitespace, using the default maximum token length
pub fn words() -> Words {
    Words::new(MAX_TOKEN_SIZE)
}

/// Split on runs of whitespace, allowing words of at most `max_length` bytes
pub fn words_with_max_length(max_length: usize) -> Words {
    Words::new(max_length)
}

/// Split into single characters
pub fn chars() -> Chars {
    Chars
}

/// Line splitting rule.
///
/// Each token is one line with its `\n` (and a preceding `\r`, if any)
/// removed. A last line without a terminator is still a token, but an empty
/// trailing segment is not.
#[derive(Debug, Clone)]
pub struct Lines {
    inner: LinesCodec,
    max_length: usize,
}

impl Lines {
    fn new(max_length: usize) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(max_length),
            max_length,
        }
    }

    fn map_err(&self, e: LinesCodecError) -> SplitError {
        match e {
            LinesCodecError::MaxLineLengthExceeded => SplitError::TokenTooLong {
                max: self.max_length,
            },
            other => other.into(),
        }
    }
}

impl Decoder for Lines {
    type Item = String;
    type Error = SplitError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, SplitError> {
        self.inner.decode(buf).map_err(|e| self.map_err(e))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>, SplitError> {
        self.inner.decode_eof(buf).map_err(|e| self.map_err(e))
    }
}

/// Word splitting rule.
///
/// Tokens are separated by any run of Unicode whitespace. Leading and
/// trailing whitespace never produces an empty token.
#[derive(Debug, Clone)]
pub struct Words {
    max_length: usize,
}

impl Words {
    fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

/// What the bytes at the front of a buffer decode to.
enum Scalar {
    Char(char),
    /// Empty, or a sequence cut off by the end of the buffer
    Incomplete,
    Invalid,
}

fn next_scalar(bytes: &[u8]) -> Scalar {
    let head = &bytes[..bytes.len().min(4)];
    let (valid, invalid) = match std::str::from_utf8(head) {
        Ok(text) => (text, false),
        Err(e) => (
            std::str::from_utf8(&head[..e.valid_up_to()]).unwrap_or_default(),
            e.error_len().is_some(),
        ),
    };

    match valid.chars().next() {
        Some(ch) => Scalar::Char(ch),
        None if invalid => Scalar::Invalid,
        None => Scalar::Incomplete,
    }
}

impl Decoder for Words {
    type Item = String;
    type Error = SplitError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, SplitError> {
        let mut start = None;
        let mut pos = 0;

        // Bytes are only checked up to the end of the current word, so earlier
        // words still come out ahead of a bad byte.
        let word = loop {
            match next_scalar(&buf[pos..]) {
                Scalar::Char(ch) if ch.is_whitespace() => {
                    if let Some(start) = start {
                        break Some((start, pos));
                    }
                    pos += ch.len_utf8();
                }
                Scalar::Char(ch) => {
                    start.get_or_insert(pos);
                    pos += ch.len_utf8();
                }
                Scalar::Invalid => return Err(SplitError::InvalidUtf8),
                Scalar::Incomplete => break None,
            }

            if matches!(start, Some(start) if pos - start > self.max_length) {
                return Err(SplitError::TokenTooLong {
                    max: self.max_length,
                });
            }
        };

        match word {
            Some((start, end)) => {
                let word = std::str::from_utf8(&buf[start..end])
                    .map_err(|_| SplitError::InvalidUtf8)?
                    .to_string();
                buf.advance(end);
                Ok(Some(word))
            }
            None => {
                buf.advance(start.unwrap_or(pos));
                Ok(None)
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>, SplitError> {
        if let Some(word) = self.decode(buf)? {
            return Ok(Some(word));
        }
        if buf.is_empty() {
            return Ok(None);
        }

        let word = std::str::from_utf8(buf)
            .map_err(|_| SplitError::InvalidUtf8)?
            .to_string();
        buf.clear();
        Ok(Some(word))
    }
}

/// Character splitting rule, one token per Unicode scalar value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chars;

impl Decoder for Chars {
    type Item = String;
    type Error = SplitError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, SplitError> {
        match next_scalar(buf) {
            Scalar::Char(ch) => {
                buf.advance(ch.len_utf8());
                Ok(Some(ch.to_string()))
            }
            Scalar::Invalid => Err(SplitError::InvalidUtf8),
            Scalar::Incomplete => Ok(None),
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>, SplitError> {
        match self.decode(buf)? {
            Some(ch) => Ok(Some(ch)),
            None if buf.is_empty() => Ok(None),
            None => Err(SplitError::InvalidUtf8),
        }
    }
}
