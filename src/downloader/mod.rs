//! Downloader module containing the orchestrator, its builder and configuration.
//!
//! - `downloader` - [`Downloader`], which turns submissions into concurrent tasks
//! - `builder` - [`DownloaderBuilder`] for flexible configuration
//! - `config` - Configuration structures and callback types
//!
//! # Examples
//!
//! ```rust,no_run
//! use volley::downloader::DownloaderBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .ignore_invalid_urls(true)
//!     .on_complete(|summary| {
//!         println!("{}: {:?}", summary.url(), summary.status());
//!     })
//!     .build()?;
//!
//! downloader
//!     .download(["https://example.com/file1.zip", "example.com/file2.pdf"])
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::{DownloadCallback, DownloaderConfig};
pub use downloader::Downloader;
