//! Download summary functionality.
//!
//! Each task ends with a [`Summary`] describing what happened to its URL.
//! Summaries are logged and handed to the `on_complete` callback of the
//! [`Downloader`](crate::Downloader); they never affect other tasks.
//!
//! # Examples
//!
//! ```rust
//! use reqwest::{StatusCode, Url};
//! use volley::download::{Status, Summary};
//!
//! let url = Url::parse("https://example.com/report.pdf").unwrap();
//! let summary = Summary::new(url)
//!     .with_statuscode(StatusCode::OK)
//!     .with_filename("report.pdf")
//!     .with_size(5)
//!     .with_status(Status::Success);
//!
//! assert!(summary.is_success());
//! assert_eq!(summary.filename(), Some("report.pdf"));
//! ```

use crate::error::{Error, ErrorKind};

use reqwest::{StatusCode, Url};

/// Download status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Download failed with error message
    Fail(String),
    /// Initial state of [`Summary::new`]. A finished task never reports it.
    NotStarted,
    /// Download completed successfully
    Success,
}

/// Outcome of a single download task.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Source URL.
    url: Url,
    /// Filename actually written, once a destination was claimed.
    filename: Option<String>,
    /// HTTP status code, once a response was received.
    statuscode: Option<StatusCode>,
    /// Bytes copied to the destination.
    size: u64,
    /// Status.
    status: Status,
    /// Class of the failure, if any.
    error_kind: Option<ErrorKind>,
}

impl Summary {
    /// Create a new [`Summary`] for `url`.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            filename: None,
            statuscode: None,
            size: 0,
            status: Status::NotStarted,
            error_kind: None,
        }
    }

    /// Attach a status.
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Attach the HTTP status code.
    pub fn with_statuscode(self, statuscode: StatusCode) -> Self {
        Self {
            statuscode: Some(statuscode),
            ..self
        }
    }

    /// Attach the filename actually written.
    pub fn with_filename(self, filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..self
        }
    }

    /// Attach the number of bytes copied.
    pub fn with_size(self, size: u64) -> Self {
        Self { size, ..self }
    }

    /// Mark the summary as failed with `error`.
    pub fn fail(self, error: &Error) -> Self {
        Self {
            status: Status::Fail(error.to_string()),
            error_kind: Some(error.kind()),
            ..self
        }
    }

    /// Get a reference to the source URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the filename actually written.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Get the HTTP status code.
    pub fn statuscode(&self) -> Option<StatusCode> {
        self.statuscode
    }

    /// Get the number of bytes copied.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Get the class of the failure, if the download failed.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    /// Whether the download completed.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_url() -> Url {
        Url::parse("http://example.com/test.zip").unwrap()
    }

    #[test]
    fn test_summary_creation() {
        let summary = Summary::new(test_url());

        assert_eq!(summary.url().as_str(), "http://example.com/test.zip");
        assert_eq!(summary.status(), &Status::NotStarted);
        assert_eq!(summary.filename(), None);
        assert_eq!(summary.statuscode(), None);
        assert_eq!(summary.size(), 0);
        assert!(!summary.is_success());
    }

    #[test]
    fn test_summary_fail() {
        let summary = Summary::new(test_url())
            .with_statuscode(StatusCode::NOT_FOUND)
            .fail(&Error::HttpStatus(StatusCode::NOT_FOUND));

        match summary.status() {
            Status::Fail(msg) => assert_eq!(msg, "HTTP status 404 Not Found"),
            _ => panic!("Expected Fail status"),
        }
        assert_eq!(summary.error_kind(), Some(ErrorKind::Transport));
    }

    #[test]
    fn test_summary_success() {
        let summary = Summary::new(test_url())
            .with_filename("test.zip")
            .with_size(1024)
            .with_status(Status::Success);

        assert!(summary.is_success());
        assert_eq!(summary.filename(), Some("test.zip"));
        assert_eq!(summary.size(), 1024);
        assert_eq!(summary.error_kind(), None);
    }
}
