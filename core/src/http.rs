//! Transport seam between the client and the network.
//!
//! # Design
//! The client never talks to a socket directly. Every request goes through an
//! injected [`HttpTransport`], which turns a URL plus [`RequestOptions`] into
//! an [`HttpResponse`] described as plain data. Status interpretation stays in
//! the client: transports must hand back 4xx/5xx responses as data, and only
//! return `Err` when no response was obtained at all.
//!
//! [`UreqTransport`] is the default implementation, built lazily by
//! `CapApi::http_client` when the caller did not inject one.

use tracing::debug;

use crate::error::{ApiError, Result};
use crate::options::RequestOptions;

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// A response with no headers, mostly useful for stub transports.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Anything that can issue a GET with query parameters and extra options.
///
/// Implementations are shared between resource clients behind an `Arc`.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse>;
}

/// Blocking transport backed by a `ureq` agent.
///
/// Relative URLs are resolved against the base URL the transport was bound
/// to; absolute URLs are used as given.
pub struct UreqTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl UreqTransport {
    pub fn new(base_url: &str) -> Self {
        // 4xx/5xx come back as data so the client can interpret the status.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve(&self, url: &str) -> String {
        if url.contains("://") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport for UreqTransport {
    fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse> {
        let url = self.resolve(url);
        let mut request = self.agent.get(&url);
        if let Some(query) = &options.query {
            for (key, value) in query {
                request = request.query(key.as_str(), value.as_str());
            }
        }
        if let Some(headers) = &options.headers {
            for (name, value) in headers {
                request = request.header(name.as_str(), value.as_str());
            }
        }

        debug!(%url, "ureq GET");
        let mut response = request
            .call()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| header_entry(name, value))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Non-UTF-8 bytes in a value are replaced rather than dropping the value.
fn header_entry(
    name: &ureq::http::HeaderName,
    value: &ureq::http::HeaderValue,
) -> (String, String) {
    (
        name.as_str().to_string(),
        String::from_utf8_lossy(value.as_bytes()).into_owned(),
    )
}
