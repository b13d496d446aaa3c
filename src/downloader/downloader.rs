//! Fan-out of submissions into concurrent download tasks.
//!
//! [`Downloader::submit`] validates a string, picks the task for its scheme and
//! spawns it on the Tokio runtime. Spawned tasks are only counted, never
//! stored; [`Downloader::join`] waits for that count to drop back to zero.
//!
//! # Examples
//!
//! ```rust,no_run
//! use volley::downloader::DownloaderBuilder;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./downloads"))
//!     .build()?;
//!
//! downloader.submit("https://example.com/file1.zip");
//! downloader.submit("https://example.com/file2.pdf");
//! downloader.join().await;
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use crate::download::{HttpDownloadTask, Task};
use crate::error::{Error, Result};
use crate::http::{create_http_client, HttpClientConfig};
use crate::progress::{ProgressDisplay, ProgressSinkFactory};
use crate::storage::{FsWriterFactory, WriterFactory};
use crate::utils::{is_supported_scheme, is_valid_url};

use reqwest::header::HeaderMap;
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{error, info};

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main() -> volley::Result<()> {
/// use volley::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build()?;
/// # Ok(())
/// # }
/// ```
pub struct Downloader {
    config: DownloaderConfig,
    client: ClientWithMiddleware,
    writers: Arc<dyn WriterFactory>,
    progress: Arc<dyn ProgressSinkFactory>,
    /// Counts outstanding tasks.
    tracker: TaskTracker,
}

impl fmt::Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Result<Self> {
        let client = create_http_client(HttpClientConfig {
            proxy: config.proxy.clone(),
            headers: config.headers.clone(),
        })?;

        let writers = match config.writer_factory {
            Some(ref writers) => writers.clone(),
            None => Arc::new(FsWriterFactory::new(config.directory.clone())),
        };

        let progress = match config.progress {
            Some(ref progress) => progress.clone(),
            None => Arc::new(ProgressDisplay::new(config.style_options.clone())),
        };

        Ok(Self {
            config,
            client,
            writers,
            progress,
            tracker: TaskTracker::new(),
        })
    }

    /// Gets the directory where files will be downloaded.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets whether invalid URLs are tolerated.
    pub fn ignore_invalid_urls(&self) -> bool {
        self.config.ignore_invalid_urls
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Gets the signal shared by every task.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.config.cancellation_token
    }

    /// Number of spawned tasks that have not returned yet.
    pub fn outstanding(&self) -> usize {
        self.tracker.len()
    }

    /// Abort in-flight downloads.
    pub fn cancel(&self) {
        self.config.cancellation_token.cancel();
    }

    /// Start downloading `url` in the background.
    ///
    /// Rejected submissions are logged and otherwise ignored. Must be called
    /// from within a Tokio runtime.
    pub fn submit(&self, url: &str) {
        let task = match self.create_task(url) {
            Ok(task) => task,
            Err(e @ Error::UnsupportedScheme(_)) => {
                error!(url = %url, error = %e, "unsupported url scheme");
                return;
            }
            Err(e) => {
                error!(url = %url, error = %e, "invalid url");
                return;
            }
        };

        let cancel = self.config.cancellation_token.clone();
        let on_complete = self.config.on_complete.clone();
        self.tracker.spawn(async move {
            let summary = task.execute(cancel).await;
            if let Some(callback) = on_complete {
                callback(&summary);
            }
        });
    }

    /// Wait until every submitted download has returned.
    ///
    /// Submissions racing with `join` may or may not be waited for.
    pub async fn join(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
        self.progress.close();
    }

    /// Submit every URL in `urls`, then wait for all of them.
    pub async fn download<I, S>(&self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for url in urls {
            self.submit(url.as_ref());
        }

        info!(outstanding = self.outstanding(), "waiting for all downloads to complete");
        self.join().await;
        info!("completed all downloads");
    }

    /// Pick the task type for the scheme of `input`.
    fn create_task(&self, input: &str) -> Result<Box<dyn Task>> {
        let url = self.parse_submission(input)?;

        if !is_supported_scheme(url.scheme()) {
            return Err(Error::UnsupportedScheme(url.scheme().to_string()));
        }

        Ok(Box::new(HttpDownloadTask::new(
            url,
            self.client.clone(),
            self.writers.clone(),
            self.progress.clone(),
        )))
    }

    fn parse_submission(&self, input: &str) -> Result<Url> {
        let tolerant = self.config.ignore_invalid_urls;
        if !tolerant && !is_valid_url(input) {
            return Err(Error::InvalidUrl(input.to_string()));
        }

        match Url::parse(input) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) if tolerant => {
                let prefixed = format!("http://{input}");
                Url::parse(&prefixed).map_err(|e| Error::InvalidUrl(format!("{prefixed}: {e}")))
            }
            Err(e) => Err(Error::InvalidUrl(format!("{input}: {e}"))),
        }
    }
}
