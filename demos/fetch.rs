//! Fetch every URL given on the command line into the current directory.
//!
//! ```text
//! cargo run --example fetch -- https://example.com/a.pdf https://example.com/b.zip
//! VOLLEY_LAX=1 cargo run --example fetch -- example.com/index.html
//! ```
//!
//! Set `RUST_LOG=volley=info` to see what each task is doing. Press Ctrl-C to
//! abort the downloads still in flight.

use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use volley::{DownloaderBuilder, Status};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        return Err(eyre!("usage: fetch <url>..."));
    }
    let lax = std::env::var_os("VOLLEY_LAX").is_some();

    let failures = Arc::new(AtomicUsize::new(0));
    let counter = failures.clone();
    let downloader = DownloaderBuilder::new()
        .directory(PathBuf::from("."))
        .ignore_invalid_urls(lax)
        .on_complete(move |summary| match summary.status() {
            Status::Success => {}
            Status::Fail(msg) => {
                counter.fetch_add(1, Ordering::SeqCst);
                eprintln!("failed {}: {}", summary.url(), msg);
            }
            Status::NotStarted => {}
        })
        .build()?;

    let token = downloader.cancellation_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("interrupted, cancelling downloads");
            token.cancel();
        }
    });

    downloader.download(&urls).await;

    match failures.load(Ordering::SeqCst) {
        0 => Ok(()),
        n => Err(eyre!("{n} download(s) failed")),
    }
}
