//! HTTP(S) download task.

use super::filename::resolve_filename;
use super::{Status, Summary, Task};
use crate::error::{Error, Result};
use crate::progress::{BoxedReader, ProgressSinkFactory};
use crate::storage::WriterFactory;
use crate::utils::progress_total;

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::{Response, Url};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::io;
use std::sync::Arc;
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Downloads one HTTP(S) URL into a claimed destination.
///
/// The steps are: send a GET request, reject non-2xx responses, resolve a
/// filename from the response, claim a destination for it, then stream the
/// body into the destination while a progress sink watches.
pub struct HttpDownloadTask {
    url: Url,
    client: ClientWithMiddleware,
    writers: Arc<dyn WriterFactory>,
    progress: Arc<dyn ProgressSinkFactory>,
}

impl HttpDownloadTask {
    /// Creates a new [`HttpDownloadTask`]. The URL is assumed to be valid.
    pub fn new(
        url: Url,
        client: ClientWithMiddleware,
        writers: Arc<dyn WriterFactory>,
        progress: Arc<dyn ProgressSinkFactory>,
    ) -> Self {
        Self {
            url,
            client,
            writers,
            progress,
        }
    }

    async fn send(&self, cancel: &CancellationToken) -> Result<Response> {
        let request = self.client.get(self.url.clone());
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            res = request.send() => Ok(res?),
        }
    }
}

/// The body stream hands reqwest errors to the copy wrapped in `io::Error`.
/// Unwrap those so a dropped connection is not reported as a storage failure.
fn copy_error(e: io::Error) -> Error {
    match e.downcast::<reqwest::Error>() {
        Ok(source) => Error::from(source),
        Err(e) => Error::from(e),
    }
}

impl fmt::Debug for HttpDownloadTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpDownloadTask")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Task for HttpDownloadTask {
    fn url(&self) -> &Url {
        &self.url
    }

    async fn execute(&self, cancel: CancellationToken) -> Summary {
        let url = &self.url;
        info!(url = %url, "starting download");
        let summary = Summary::new(url.clone());

        let response = match self.send(&cancel).await {
            Ok(response) => response,
            Err(e) => {
                error!(url = %url, error = %e, "sending request");
                return summary.fail(&e);
            }
        };

        let status = response.status();
        let summary = summary.with_statuscode(status);
        if !status.is_success() {
            error!(url = %url, status = %status, "http request sent");
            return summary.fail(&Error::HttpStatus(status));
        }
        info!(url = %url, status = %status, "http request sent");

        let filename = resolve_filename(response.url(), response.headers());

        let mut claim = match self.writers.claim(&filename).await {
            Ok(claim) => claim,
            Err(e) => {
                error!(url = %url, filename = %filename, error = %e, "failed to create write stream");
                return summary.fail(&e);
            }
        };
        let filename = claim.filename().to_string();
        let summary = summary.with_filename(&filename);

        let total = progress_total(&response);
        match response.content_length() {
            Some(length) if length > 0 => {
                info!(url = %url, length, "content length header found")
            }
            length => info!(url = %url, length = ?length, "content length header not found"),
        }

        let sink = self
            .progress
            .create_sink(total, &format!("Download {filename}"));
        let body: BoxedReader = Box::new(StreamReader::new(Box::pin(
            response.bytes_stream().map_err(io::Error::other),
        )));
        let mut reader = sink.wrap_reader(body);

        let copied = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            res = tokio::io::copy(&mut reader, claim.writer_mut()) => res.map_err(copy_error),
        };

        sink.finish(None, copied.is_ok());
        drop(reader);
        let closed = claim.close().await;

        match copied.and_then(|bytes| closed.map(|_| bytes)) {
            Ok(bytes) => {
                info!(url = %url, filename = %filename, bytes, "finished download");
                summary.with_size(bytes).with_status(Status::Success)
            }
            Err(e) => {
                error!(url = %url, filename = %filename, error = %e, "failed to save response");
                summary.fail(&e)
            }
        }
    }
}
