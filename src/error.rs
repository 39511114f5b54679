//! Error types for moving tokens between streams and queues.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::split::SplitError;

/// The main error type for tokenizing and draining.
///
/// Every operation in this crate stops at the first error it meets and
/// reports it unchanged; nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be opened or created
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or splitting the input stream failed
    #[error("scan error: {0}")]
    Scan(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Writing a token or separator to the sink failed
    #[error("write error: {0}")]
    Write(#[source] io::Error),

    /// Flushing a buffered sink failed
    #[error("flush error: {0}")]
    Flush(#[source] io::Error),

    /// Every receiver of the queue was dropped while tokens were still being sent
    #[error("queue was closed by the receiving side")]
    QueueClosed,
}

// Convenience constructors
impl Error {
    /// Create a scan error from any error type
    pub fn scan<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Scan(Box::new(error))
    }

    /// Create an open error for `path`
    pub fn open<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Error::Open {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from the operating system (open, write or flush).
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Error::Open { .. } | Error::Write(_) | Error::Flush(_)
        )
    }

    /// The underlying I/O error kind, if there is one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Open { source, .. } => Some(source.kind()),
            Error::Write(e) | Error::Flush(e) => Some(e.kind()),
            Error::Scan(e) => match e.downcast_ref::<SplitError>() {
                Some(SplitError::Io(e)) => Some(e.kind()),
                Some(SplitError::InvalidUtf8) => Some(io::ErrorKind::InvalidData),
                Some(SplitError::TokenTooLong { .. }) => None,
                None => e.downcast_ref::<io::Error>().map(io::Error::kind),
            },
            Error::QueueClosed => None,
        }
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for Error {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        Error::QueueClosed
    }
}

impl From<SplitError> for Error {
    fn from(e: SplitError) -> Self {
        Error::scan(e)
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Helper trait for tagging I/O results with the stage that produced them
pub trait IntoError<T> {
    fn into_write_error(self) -> Result<T>;
    fn into_flush_error(self) -> Result<T>;
}

impl<T> IntoError<T> for io::Result<T> {
    fn into_write_error(self) -> Result<T> {
        self.map_err(Error::Write)
    }

    fn into_flush_error(self) -> Result<T> {
        self.map_err(Error::Flush)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_names_path() {
        let err = Error::open(
            "missing.txt",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.to_string(), "failed to open missing.txt: no such file");
        assert!(err.is_io());
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn test_scan_error_exposes_io_kind() {
        let err = Error::scan(io::Error::new(io::ErrorKind::InvalidData, "bad bytes"));
        assert!(!err.is_io());
        assert_eq!(err.io_kind(), Some(io::ErrorKind::InvalidData));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_send_error_is_queue_closed() {
        let err: Error = tokio::sync::mpsc::error::SendError("token".to_string()).into();
        assert!(matches!(err, Error::QueueClosed));
        assert_eq!(err.io_kind(), None);
    }

    #[test]
    fn test_into_error_tags_stage() {
        let failed: io::Result<()> = Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert!(matches!(failed.into_flush_error(), Err(Error::Flush(_))));
    }
}
