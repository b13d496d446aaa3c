//! Output filename resolution.
//!
//! The name of a download is derived from its response, in order:
//!
//! 1. the `filename` parameter of the `Content-Disposition` header,
//! 2. the last path segment of the (final) request URL,
//! 3. [`DEFAULT_FILENAME`].
//!
//! A name without an extension then receives one guessed from the
//! `Content-Type` header, when the media type is known.
//!
//! # Examples
//!
//! ```rust
//! use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
//! use reqwest::Url;
//! use volley::download::filename::resolve_filename;
//!
//! let url = Url::parse("https://example.com/files/report.pdf").unwrap();
//! assert_eq!(resolve_filename(&url, &HeaderMap::new()), "report.pdf");
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
//! let url = Url::parse("https://example.com/").unwrap();
//! assert_eq!(resolve_filename(&url, &headers), "download.pdf");
//! ```

use reqwest::header::{HeaderMap, HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::Url;
use std::collections::HashMap;
use tracing::debug;

/// Name used when neither the headers nor the URL provide one.
pub const DEFAULT_FILENAME: &str = "download";

/// Resolve the name to save a response under.
pub fn resolve_filename(url: &Url, headers: &HeaderMap) -> String {
    let mut filename = match filename_from_headers(headers) {
        Some(name) => {
            debug!(filename = %name, "resolved filename from http header");
            name
        }
        None => match filename_from_url(url) {
            Some(name) => {
                debug!(filename = %name, "resolved filename from url");
                name
            }
            None => {
                debug!(url = %url, "no filename in header or url, using default");
                DEFAULT_FILENAME.to_string()
            }
        },
    };

    if !has_extension(&filename) {
        if let Some(ext) = extension_from_headers(headers) {
            filename.push_str(ext);
        }
    }

    filename
}

/// Filename announced by the `Content-Disposition` header, if it parses.
pub fn filename_from_headers(headers: &HeaderMap) -> Option<String> {
    parse_content_disposition(header_text(headers, CONTENT_DISPOSITION)?)
}

/// Last path segment of `url`, percent-decoded.
///
/// Empty, `.` and `..` segments yield `None`.
pub fn filename_from_url(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.next_back()?;
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    sanitize_filename(&decoded)
}

/// Extension (with its leading dot) for the media type in `Content-Type`.
pub fn extension_from_headers(headers: &HeaderMap) -> Option<&'static str> {
    extension_for_content_type(header_text(headers, CONTENT_TYPE)?)
}

/// Header value as text. Servers put raw UTF-8 in quoted filenames, which
/// `HeaderValue::to_str` rejects.
fn header_text(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    std::str::from_utf8(headers.get(name)?.as_bytes()).ok()
}

/// Extract the filename from a `Content-Disposition` value.
///
/// The value is parsed as a MIME type with parameters; an RFC 5987
/// `filename*` takes precedence over a plain `filename`. A malformed value
/// yields `None`.
///
/// ```rust
/// use volley::download::filename::parse_content_disposition;
///
/// assert_eq!(
///     parse_content_disposition(r#"attachment; filename="report.pdf""#),
///     Some("report.pdf".to_string())
/// );
/// assert_eq!(parse_content_disposition("inline"), None);
/// ```
pub fn parse_content_disposition(value: &str) -> Option<String> {
    let (_, params) = parse_media_type(value)?;
    params
        .get("filename*")
        .and_then(|v| decode_ext_value(v))
        .or_else(|| params.get("filename").cloned())
        .and_then(|name| sanitize_filename(&name))
}

/// Extension (with its leading dot) for a `Content-Type` value.
///
/// ```rust
/// use volley::download::filename::extension_for_content_type;
///
/// assert_eq!(extension_for_content_type("text/html; charset=utf-8"), Some(".html"));
/// assert_eq!(extension_for_content_type("application/x-unknown"), None);
/// ```
pub fn extension_for_content_type(value: &str) -> Option<&'static str> {
    let (media_type, _) = parse_media_type(value)?;
    let ext = match media_type.as_str() {
        "application/pdf" => ".pdf",
        "application/json" => ".json",
        "application/xml" | "text/xml" => ".xml",
        "application/zip" => ".zip",
        "application/gzip" | "application/x-gzip" => ".gz",
        "application/x-tar" => ".tar",
        "application/x-bzip2" => ".bz2",
        "application/x-xz" => ".xz",
        "application/x-7z-compressed" => ".7z",
        "application/vnd.rar" | "application/x-rar-compressed" => ".rar",
        "application/javascript" | "text/javascript" => ".js",
        "application/wasm" => ".wasm",
        "application/octet-stream" => ".bin",
        "application/msword" => ".doc",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => ".docx",
        "application/vnd.ms-excel" => ".xls",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => ".xlsx",
        "application/epub+zip" => ".epub",
        "text/html" => ".html",
        "text/plain" => ".txt",
        "text/css" => ".css",
        "text/csv" => ".csv",
        "text/markdown" => ".md",
        "image/jpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/avif" => ".avif",
        "image/svg+xml" => ".svg",
        "image/x-icon" | "image/vnd.microsoft.icon" => ".ico",
        "audio/mpeg" => ".mp3",
        "audio/ogg" => ".ogg",
        "audio/wav" | "audio/x-wav" => ".wav",
        "audio/flac" => ".flac",
        "video/mp4" => ".mp4",
        "video/webm" => ".webm",
        "video/x-matroska" => ".mkv",
        _ => return None,
    };
    Some(ext)
}

/// Whether `name` ends with a `.ext` suffix. A leading dot does not count.
fn has_extension(name: &str) -> bool {
    name.rfind('.').is_some_and(|idx| idx > 0 && idx + 1 < name.len())
}

/// Keep only the last path component of a server-supplied name.
fn sanitize_filename(name: &str) -> Option<String> {
    let base = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_control() { '_' } else { c })
        .collect::<String>();
    let base = base.trim();

    match base {
        "" | "." | ".." => None,
        _ => Some(base.to_string()),
    }
}

/// Parse `type/subtype; key=value; key="quoted value"`.
///
/// Returns the lowercased media type and parameters keyed by lowercased name.
/// Duplicate or malformed parameters reject the whole value.
fn parse_media_type(value: &str) -> Option<(String, HashMap<String, String>)> {
    let (media_type, mut rest) = match value.find(';') {
        Some(idx) => (&value[..idx], &value[idx..]),
        None => (value, ""),
    };
    let media_type = media_type.trim().to_ascii_lowercase();
    if !is_media_type(&media_type) {
        return None;
    }

    let mut params = HashMap::new();
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        rest = rest.strip_prefix(';')?.trim_start();
        if rest.is_empty() {
            // Trailing semicolon.
            break;
        }

        let key_end = rest.find(|c: char| !is_token_char(c)).unwrap_or(rest.len());
        if key_end == 0 {
            return None;
        }
        let key = rest[..key_end].to_ascii_lowercase();
        rest = rest[key_end..].trim_start().strip_prefix('=')?.trim_start();

        let (val, remaining) = parse_param_value(rest)?;
        rest = remaining;

        if params.insert(key, val).is_some() {
            return None;
        }
    }

    Some((media_type, params))
}

/// Parse a token or a quoted string, returning it with the unparsed remainder.
fn parse_param_value(input: &str) -> Option<(String, &str)> {
    if let Some(quoted) = input.strip_prefix('"') {
        let mut val = String::new();
        let mut chars = quoted.char_indices();
        while let Some((idx, c)) = chars.next() {
            match c {
                '"' => return Some((val, &quoted[idx + 1..])),
                '\\' => val.push(chars.next()?.1),
                c => val.push(c),
            }
        }
        // Unterminated quoted string.
        None
    } else {
        let end = input.find(|c: char| !is_token_char(c)).unwrap_or(input.len());
        if end == 0 {
            return None;
        }
        Some((input[..end].to_string(), &input[end..]))
    }
}

/// Decode an RFC 5987 `charset'language'value` parameter.
fn decode_ext_value(value: &str) -> Option<String> {
    let mut parts = value.splitn(3, '\'');
    let charset = parts.next()?;
    let _language = parts.next()?;
    let encoded = parts.next()?;

    if !charset.eq_ignore_ascii_case("utf-8") && !charset.eq_ignore_ascii_case("us-ascii") {
        return None;
    }
    urlencoding::decode(encoded).ok().map(|s| s.into_owned())
}

fn is_media_type(s: &str) -> bool {
    // Content-Disposition values ("attachment") have no subtype.
    let mut parts = s.splitn(2, '/');
    let main = parts.next().unwrap_or_default();
    let valid = |part: &str| !part.is_empty() && part.chars().all(is_token_char);
    valid(main) && parts.next().map_or(true, valid)
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?=".contains(c)
}
