//! Error handling for the Volley library.
//!
//! Every failure a submission or a download task can run into is represented by
//! the [`Error`] enum. Errors never cross task boundaries: the task that detects
//! one logs it and folds it into its [`Summary`](crate::Summary).

use reqwest::StatusCode;
use std::io;
use thiserror::Error;

/// Errors that can happen when using Volley.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// This variant captures internal errors that don't fit into other categories.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The submitted string is not an absolute URL with a scheme and a host.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL parsed, but no task knows how to fetch its scheme.
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// The server answered with a status outside of `200..=299`.
    #[error("HTTP status {0}")]
    HttpStatus(StatusCode),

    /// The cancellation signal fired before the task could complete.
    #[error("Download cancelled")]
    Cancelled,

    /// I/O Error.
    ///
    /// This variant wraps standard I/O errors that can occur during file operations,
    /// such as creating the output directory, creating a file or writing to it.
    #[error("I/O error: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the HTTP middleware stack.
    #[error("HTTP middleware error: {source}")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },
}

/// Broad classes of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or unsupported URL, rejected before any work starts.
    Input,
    /// Connection or request failure, or a non-2xx status.
    Transport,
    /// Directory or file creation failure, or a failed disk write.
    Storage,
    /// The cancellation signal fired mid-request or mid-copy.
    Cancellation,
    /// Anything else.
    Internal,
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidUrl(_) | Error::UnsupportedScheme(_) => ErrorKind::Input,
            Error::HttpStatus(_) | Error::Reqwest { .. } | Error::Middleware { .. } => {
                ErrorKind::Transport
            }
            Error::IOError { .. } => ErrorKind::Storage,
            Error::Cancelled => ErrorKind::Cancellation,
            Error::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Result type alias for operations that can fail with a Volley error.
pub type Result<T> = std::result::Result<T, Error>;
