//! Progress sink interfaces.

use tokio::io::AsyncRead;

/// Type-erased response body reader.
pub type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;

/// Creates one [`ProgressSink`] per download.
pub trait ProgressSinkFactory: Send + Sync {
    /// Create a sink for a download of `total` bytes.
    ///
    /// A `total` of `0` means the size is unknown.
    fn create_sink(&self, total: u64, label: &str) -> Box<dyn ProgressSink>;

    /// Called once every submitted download has returned.
    fn close(&self) {}
}

/// Observes the bytes of a single download.
pub trait ProgressSink: Send + Sync {
    /// Wrap `reader` so that the bytes read through it are observed.
    fn wrap_reader(&self, reader: BoxedReader) -> BoxedReader;

    /// Mark the download as finished.
    ///
    /// `total` replaces the announced size; `None` settles on the bytes
    /// observed so far. `complete` is `false` when the download failed.
    fn finish(&self, total: Option<u64>, complete: bool);
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSinkFactory for NoProgress {
    fn create_sink(&self, _total: u64, _label: &str) -> Box<dyn ProgressSink> {
        Box::new(NoProgress)
    }
}

impl ProgressSink for NoProgress {
    fn wrap_reader(&self, reader: BoxedReader) -> BoxedReader {
        reader
    }

    fn finish(&self, _total: Option<u64>, _complete: bool) {}
}
