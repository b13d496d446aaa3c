//! Settings shared by every task of a [`Downloader`](super::Downloader).
//!
//! [`DownloaderConfig`] is filled in by the
//! [`DownloaderBuilder`](super::DownloaderBuilder) and read-only afterwards.
//!
//! ```rust
//! use volley::download::{Status, Summary};
//! use volley::downloader::DownloadCallback;
//!
//! let report: DownloadCallback = Box::new(|summary: &Summary| {
//!     if let Status::Fail(msg) = summary.status() {
//!         eprintln!("{} failed: {}", summary.url(), msg);
//!     }
//! });
//! ```

use crate::download::Summary;
use crate::progress::{ProgressSinkFactory, StyleOptions};
use crate::storage::WriterFactory;

use reqwest::{header::HeaderMap, Proxy};
use std::env::current_dir;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Receives the [`Summary`] of each finished download.
pub type DownloadCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Read-only settings of a downloader.
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Base directory of the default writer factory.
    pub directory: PathBuf,
    /// Accept strings that are not valid URLs, prefixing `http://` when the
    /// scheme is missing.
    pub ignore_invalid_urls: bool,
    /// Look of the default progress display.
    pub style_options: StyleOptions,
    /// Sent with every request.
    pub headers: Option<HeaderMap>,
    /// Optional proxy.
    pub proxy: Option<Proxy>,
    /// Progress sink factory overriding the styled progress bars.
    pub progress: Option<Arc<dyn ProgressSinkFactory>>,
    /// Writer factory overriding the one created for `directory`.
    pub writer_factory: Option<Arc<dyn WriterFactory>>,
    /// Signal shared by every task.
    pub cancellation_token: CancellationToken,
    /// Called once per accepted submission.
    pub on_complete: Option<Arc<DownloadCallback>>,
}

impl fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("directory", &self.directory)
            .field("ignore_invalid_urls", &self.ignore_invalid_urls)
            .field("style_options", &self.style_options)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy)
            .field("progress", &self.progress.is_some())
            .field("writer_factory", &self.writer_factory.is_some())
            .field("cancellation_token", &self.cancellation_token)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: current_dir().unwrap_or_default(),
            ignore_invalid_urls: false,
            style_options: StyleOptions::default(),
            headers: None,
            proxy: None,
            progress: None,
            writer_factory: None,
            cancellation_token: CancellationToken::new(),
            on_complete: None,
        }
    }
}
