//! Collision-free files on the local filesystem.
//!
//! [`FsWriterFactory`] owns one base directory. Picking a free name and
//! creating the file happen as one step under a lock held by the factory, so
//! two tasks asking for the same name concurrently end up with different files:
//!
//! `report.pdf`, `report (1).pdf`, `report (2).pdf`, ...

use super::{Claim, WriterFactory};
use crate::error::Result;

use async_trait::async_trait;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::sync::Mutex;
use tracing::debug;

/// Claims files inside a single base directory.
///
/// Share one instance (e.g. behind an `Arc`) between every task writing to
/// the same directory; the lock it carries is what keeps claims apart.
#[derive(Debug)]
pub struct FsWriterFactory {
    /// Directory where files are created.
    base: PathBuf,
    /// Serializes the existence check and the file creation.
    lock: Mutex<()>,
}

impl FsWriterFactory {
    /// Creates a factory writing into `base`.
    ///
    /// The directory is created lazily, on the first claim.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            lock: Mutex::new(()),
        }
    }

    /// Gets the directory where files are created.
    pub fn base(&self) -> &Path {
        &self.base
    }
}

#[async_trait]
impl WriterFactory for FsWriterFactory {
    async fn claim(&self, desired_name: &str) -> Result<Claim> {
        validate_name(desired_name)?;

        if !self.base.as_os_str().is_empty() {
            debug!(directory = %self.base.display(), "creating destination directory");
            fs::create_dir_all(&self.base).await?;
        }

        let _guard = self.lock.lock().await;

        let mut attempt = 0;
        loop {
            let filename = candidate_name(desired_name, attempt);
            let path = self.base.join(&filename);
            attempt += 1;

            if exists(&path).await? {
                debug!(path = %path.display(), "file exists");
                continue;
            }

            // Another process may still win the race for this name.
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => {
                    debug!(path = %path.display(), "claimed destination file");
                    return Ok(Claim::new(filename, path, Box::new(file)));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "file appeared while claiming");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Name to try on the given attempt.
///
/// Attempt `0` is `desired` itself. Later attempts insert ` (n)` before the
/// extension, or append it when there is none.
///
/// ```rust
/// use volley::storage::candidate_name;
///
/// assert_eq!(candidate_name("report.pdf", 0), "report.pdf");
/// assert_eq!(candidate_name("report.pdf", 2), "report (2).pdf");
/// assert_eq!(candidate_name("archive.tar.gz", 1), "archive.tar (1).gz");
/// assert_eq!(candidate_name("README", 1), "README (1)");
/// ```
pub fn candidate_name(desired: &str, attempt: u64) -> String {
    if attempt == 0 {
        return desired.to_string();
    }
    let (stem, ext) = split_extension(desired);
    format!("{stem} ({attempt}){ext}")
}

/// Split at the last `.`, keeping the dot with the extension.
///
/// A leading dot (`.bashrc`) starts a hidden name, not an extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Only a single plain path component may be claimed.
fn validate_name(name: &str) -> io::Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid file name {name:?}"),
        )),
    }
}

async fn exists(path: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
