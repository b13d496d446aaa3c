//! The unit of work run for each accepted URL.

use super::Summary;

use async_trait::async_trait;
use reqwest::Url;
use tokio_util::sync::CancellationToken;

/// A download of one URL.
///
/// There is one implementation per supported scheme; the [`Downloader`]
/// picks it and only ever calls [`Task::execute`].
///
/// [`Downloader`]: crate::Downloader
#[async_trait]
pub trait Task: Send + Sync {
    /// Source URL.
    fn url(&self) -> &Url;

    /// Perform the download.
    ///
    /// Failures are logged and reported in the returned [`Summary`]. Once
    /// `cancel` fires, pending network I/O is abandoned as soon as the
    /// transport notices.
    async fn execute(&self, cancel: CancellationToken) -> Summary;
}
