//! Shared utility functions.
//!
//! - [`url`] - URL validation used before a submission is accepted
//! - [`content_length`] - Progress totals derived from HTTP responses
//!
//! # Examples
//!
//! ```rust
//! use volley::utils::is_valid_url;
//!
//! assert!(is_valid_url("https://example.com/report.pdf"));
//! assert!(!is_valid_url("example.com/report.pdf"));
//! ```

pub mod content_length;
pub mod url;

pub use content_length::{known_total, progress_total};
pub use url::{is_supported_scheme, is_valid_url, SUPPORTED_SCHEMES};
