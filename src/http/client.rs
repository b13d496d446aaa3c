//! The shared HTTP client.
//!
//! One client is built per [`Downloader`](crate::Downloader) and cloned into
//! every task. Requests pass through `reqwest-tracing`'s middleware, so each one
//! shows up as a span once a `tracing` subscriber is installed. Failed requests
//! are never retried.

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

/// What every request of a downloader has in common.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    pub proxy: Option<Proxy>,
    /// Sent with every request.
    pub headers: Option<HeaderMap>,
}

/// Build the traced client described by `config`.
///
/// ```rust
/// use volley::http::client::{create_http_client, HttpClientConfig};
///
/// let client = create_http_client(HttpClientConfig::default());
/// assert!(client.is_ok());
/// ```
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let HttpClientConfig { proxy, headers } = config;

    let mut inner = reqwest::Client::builder();
    if let Some(proxy) = proxy {
        inner = inner.proxy(proxy);
    }
    if let Some(headers) = headers {
        inner = inner.default_headers(headers);
    }

    Ok(ClientBuilder::new(inner.build()?)
        .with(TracingMiddleware::default())
        .build())
}
