//! Fluent configuration of a [`Downloader`].
//!
//! ```rust
//! use reqwest::header::{HeaderMap, USER_AGENT};
//! use std::path::PathBuf;
//! use volley::download::Status;
//! use volley::downloader::DownloaderBuilder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "MyApp/1.0".parse()?);
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./downloads"))
//!     .ignore_invalid_urls(true)
//!     .headers(headers)
//!     .on_complete(|summary| {
//!         if let Status::Fail(msg) = summary.status() {
//!             eprintln!("{}: {}", summary.url(), msg);
//!         }
//!     })
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::{config::DownloaderConfig, downloader::Downloader};
use crate::download::Summary;
use crate::error::Result;
use crate::progress::{ProgressSinkFactory, StyleOptions};
use crate::storage::WriterFactory;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Proxy;
use std::{path::PathBuf, sync::Arc};
use tokio_util::sync::CancellationToken;

/// Collects [`DownloaderConfig`] options, then builds a [`Downloader`].
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder whose downloader draws no progress bars.
    pub fn hidden() -> Self {
        Self::new().style_options(StyleOptions::hidden())
    }

    /// Base directory for the downloaded files. Created on first use.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Accept submissions that are not valid URLs.
    ///
    /// A submission without a scheme is then fetched over plain HTTP:
    /// `example.com/file` becomes `http://example.com/file`.
    pub fn ignore_invalid_urls(mut self, ignore: bool) -> Self {
        self.config.ignore_invalid_urls = ignore;
        self
    }

    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Report progress to `progress` instead of drawing bars.
    pub fn progress(mut self, progress: Arc<dyn ProgressSinkFactory>) -> Self {
        self.config.progress = Some(progress);
        self
    }

    /// Claim destinations from `writers` instead of files in the base directory.
    pub fn writer_factory(mut self, writers: Arc<dyn WriterFactory>) -> Self {
        self.config.writer_factory = Some(writers);
        self
    }

    /// Share `token` with every task. Cancelling it aborts in-flight downloads.
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.config.cancellation_token = token;
        self
    }

    /// Call `callback` with the [`Summary`] of every download as soon as it
    /// returns. Rejected submissions never reach it.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Merge `headers` into the headers sent with every request.
    ///
    /// See also [`header()`](DownloaderBuilder::header).
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers().extend(headers);
        self
    }

    /// Send `name: value` with every request, replacing an earlier value.
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use volley::downloader::DownloaderBuilder;
    ///
    /// let builder = DownloaderBuilder::new()
    ///     .header(header::USER_AGENT, HeaderValue::from_static("volley/0.1"));
    /// ```
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.default_headers().insert(name, value);
        self
    }

    fn default_headers(&mut self) -> &mut HeaderMap {
        self.config.headers.get_or_insert_with(HeaderMap::new)
    }

    /// Create the [`Downloader`].
    ///
    /// Fails when the HTTP client cannot be constructed.
    pub fn build(self) -> Result<Downloader> {
        Downloader::new(self.config)
    }
}
