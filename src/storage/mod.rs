//! Destinations for downloaded bytes.
//!
//! A download task knows *what* it wants to call its output only once the
//! response headers arrive. It then asks a [`WriterFactory`] for a [`Claim`]:
//! an exclusively owned, open writer plus the filename that was actually used,
//! which may differ from the requested one when that name is already taken.
//!
//! - [`fs`] - [`FsWriterFactory`], which claims collision-free files inside a base directory
//!
//! # Examples
//!
//! ```rust,no_run
//! use tokio::io::AsyncWriteExt;
//! use volley::storage::{FsWriterFactory, WriterFactory};
//!
//! # async fn example() -> volley::Result<()> {
//! let writers = FsWriterFactory::new("downloads");
//! let mut claim = writers.claim("report.pdf").await?;
//! println!("writing to {}", claim.filename());
//! claim.writer_mut().write_all(b"hello").await?;
//! claim.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod fs;

pub use fs::{candidate_name, FsWriterFactory};

use crate::error::Result;

use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Type-erased output stream handed out by a [`WriterFactory`].
pub type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Creates writable streams for saving downloads.
///
/// Implementations may change the requested filename, e.g. to avoid
/// overwriting an existing file, and must report the name they used.
#[async_trait]
pub trait WriterFactory: Send + Sync {
    /// Claim a destination for `desired_name`.
    async fn claim(&self, desired_name: &str) -> Result<Claim>;
}

/// An exclusively owned destination returned by [`WriterFactory::claim`].
///
/// The writer is positioned at offset 0. The owner must call [`Claim::close`]
/// once writing completes or fails.
pub struct Claim {
    filename: String,
    path: PathBuf,
    writer: BoxedWriter,
}

impl Claim {
    /// Bundle a final filename, its location and an open writer.
    pub fn new(filename: impl Into<String>, path: impl Into<PathBuf>, writer: BoxedWriter) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
            writer,
        }
    }

    /// Filename actually used, which may differ from the requested one.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Location of the claimed destination.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a mutable reference to the output stream.
    pub fn writer_mut(&mut self) -> &mut BoxedWriter {
        &mut self.writer
    }

    /// Flush and release the output stream.
    pub async fn close(mut self) -> Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}

impl fmt::Debug for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claim")
            .field("filename", &self.filename)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
