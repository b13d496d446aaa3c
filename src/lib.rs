//! Volley fetches many HTTP(S) URLs concurrently into one directory.
//!
//! Each accepted URL becomes its own Tokio task which requests the URL,
//! names the output after the response metadata, claims a collision-free
//! file and streams the body into it. The caller submits URLs one by one and
//! then joins.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use volley::{DownloaderBuilder, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("output"))
//!     .build()?;
//! downloader.submit("https://github.com/seanmonstar/reqwest/archive/refs/tags/v0.11.9.zip");
//! downloader.join().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`download`] - The per-URL download task, filename resolution and summaries
//! - [`downloader`] - The [`Downloader`] orchestrator and its builder
//! - [`storage`] - Collision-free destinations for downloaded bytes
//! - [`progress`] - Progress sink interfaces and indicatif bars
//! - [`http`] - HTTP client construction
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`utils`] - URL validation and content length helpers

pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod progress;
pub mod storage;
pub mod utils;

pub use download::{HttpDownloadTask, Status, Summary, Task};
pub use downloader::{Downloader, DownloaderBuilder};
pub use error::{Error, ErrorKind, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::{
    NoProgress, ProgressBarOpts, ProgressDisplay, ProgressSink, ProgressSinkFactory, StyleOptions,
};
pub use storage::{Claim, FsWriterFactory, WriterFactory};
pub use utils::is_valid_url;
