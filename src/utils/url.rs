//! URL validation.

use reqwest::Url;

/// Schemes a download task exists for.
pub const SUPPORTED_SCHEMES: &[&str] = &["http", "https"];

/// Check whether `s` is an absolute URL with both a scheme and a host.
///
/// Malformed input yields `false`.
///
/// ```rust
/// use volley::utils::is_valid_url;
///
/// assert!(is_valid_url("http://example.com"));
/// assert!(!is_valid_url("mailto:someone@example.com"));
/// assert!(!is_valid_url("not a url"));
/// ```
pub fn is_valid_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(url) => !url.scheme().is_empty() && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

/// Check whether a download task can handle `scheme`.
pub fn is_supported_scheme(scheme: &str) -> bool {
    SUPPORTED_SCHEMES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(scheme))
}
