//! Progress totals derived from HTTP responses.
//!
//! A missing, zero or unparsable `Content-Length` all mean "unknown" to the
//! progress sink, which is represented by a total of `0`.

use reqwest::Response;

/// Total to announce to a progress sink for `response`.
///
/// Returns the declared content length when present and positive, `0` otherwise.
pub fn progress_total(response: &Response) -> u64 {
    known_total(response.content_length()).unwrap_or(0)
}

/// Keep a declared length only if it is positive.
///
/// ```rust
/// use volley::utils::known_total;
///
/// assert_eq!(known_total(Some(5)), Some(5));
/// assert_eq!(known_total(Some(0)), None);
/// assert_eq!(known_total(None), None);
/// ```
pub fn known_total(declared: Option<u64>) -> Option<u64> {
    declared.filter(|&len| len > 0)
}
