//! Download module containing the per-URL task.
//!
//! - [`task`] - The [`Task`] trait, one implementation per supported scheme
//! - [`http`] - [`HttpDownloadTask`], which fetches HTTP(S) URLs
//! - [`filename`] - Output filename resolution from response metadata
//! - [`summary`] - Download result tracking and status reporting
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use reqwest::Url;
//! use tokio_util::sync::CancellationToken;
//! use volley::download::{HttpDownloadTask, Task};
//! use volley::http::{create_http_client, HttpClientConfig};
//! use volley::progress::NoProgress;
//! use volley::storage::FsWriterFactory;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let task = HttpDownloadTask::new(
//!     Url::parse("https://example.com/report.pdf")?,
//!     create_http_client(HttpClientConfig::default())?,
//!     Arc::new(FsWriterFactory::new("downloads")),
//!     Arc::new(NoProgress),
//! );
//! let summary = task.execute(CancellationToken::new()).await;
//! println!("{:?}: {:?}", summary.filename(), summary.status());
//! # Ok(())
//! # }
//! ```

pub mod filename;
pub mod http;
pub mod summary;
pub mod task;

pub use http::HttpDownloadTask;
pub use summary::{Status, Summary};
pub use task::Task;
