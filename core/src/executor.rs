//! The one request routine every resource client shares.
//!
//! # Design
//! `RequestExecutor` owns a handle to a shared transport and a snapshot of
//! request options. `fetch_raw` performs a single GET with no retry and
//! records the response as `last_response` before looking at the status.
//! `fetch` layers JSON decoding on top.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::http::{HttpResponse, HttpTransport};
use crate::options::{Query, RequestOptions};

/// Issues GET requests through a shared transport and decodes JSON.
pub struct RequestExecutor {
    transport: Arc<dyn HttpTransport>,
    options: RequestOptions,
    last_response: Option<HttpResponse>,
}

impl RequestExecutor {
    /// `options`, when given, are merged over the (empty) defaults.
    pub fn new(transport: Arc<dyn HttpTransport>, options: Option<RequestOptions>) -> Self {
        let defaults = RequestOptions::default();
        let options = match options {
            Some(options) => defaults.merge(&options),
            None => defaults,
        };
        Self {
            transport,
            options,
            last_response: None,
        }
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    pub fn set_transport(&mut self, transport: Arc<dyn HttpTransport>) {
        self.transport = transport;
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RequestOptions) {
        self.options = options;
    }

    /// The most recent response obtained by `fetch_raw`, whatever its status.
    pub fn last_response(&self) -> Option<&HttpResponse> {
        self.last_response.as_ref()
    }

    /// GET `url` and return the raw response if its status is exactly 200.
    ///
    /// `extra` is merged over the instance options, then `params` are added to
    /// the query. Transport errors propagate as-is and leave `last_response`
    /// untouched.
    pub fn fetch_raw(
        &mut self,
        url: &str,
        params: &Query,
        extra: Option<&RequestOptions>,
    ) -> Result<HttpResponse> {
        let options = match extra {
            Some(extra) => self.options.merge(extra),
            None => self.options.clone(),
        }
        .with_params(params);

        debug!(%url, "GET");
        let response = self.transport.get(url, &options)?;
        debug!(%url, status = response.status, "response");
        self.last_response = Some(response.clone());

        if response.status != 200 {
            warn!(%url, status = response.status, "non-200 response");
            return Err(ApiError::InvalidResponse {
                status: response.status,
            });
        }
        Ok(response)
    }

    /// GET `url` and parse the body as JSON.
    pub fn fetch(
        &mut self,
        url: &str,
        params: &Query,
        extra: Option<&RequestOptions>,
    ) -> Result<serde_json::Value> {
        self.fetch_as(url, params, extra)
    }

    /// GET `url` and deserialize the body into `T`.
    pub fn fetch_as<T: DeserializeOwned>(
        &mut self,
        url: &str,
        params: &Query,
        extra: Option<&RequestOptions>,
    ) -> Result<T> {
        let response = self.fetch_raw(url, params, extra)?;
        serde_json::from_str(&response.body).map_err(|e| {
            warn!(%url, error = %e, "could not decode response body");
            ApiError::from(e)
        })
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("options", &self.options)
            .field("last_response", &self.last_response)
            .finish_non_exhaustive()
    }
}
