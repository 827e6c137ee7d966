//! Entry point: configuration holder and factory for resource clients.
//!
//! # Design
//! `CapApi` owns the endpoint, the access token, the default request options
//! and an optional transport handle. `api(name)` snapshots the current options
//! (plus the token) into a fresh `ResourceClient` that shares the transport.
//! The transport is built lazily from the endpoint the first time it is
//! needed and reused afterwards.

use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::error::Result;
use crate::http::{HttpTransport, UreqTransport};
use crate::options::{RequestOptions, ACCESS_TOKEN_KEY, PAGE_KEY, PAGE_SIZE_KEY};
use crate::resource::{Resource, ResourceClient};
use crate::DEFAULT_ENDPOINT;

/// Environment variable read by [`CapApi::from_env`].
pub const ENDPOINT_ENV: &str = "CAP_API_ENDPOINT";

/// Client for the CAP API.
///
/// ```no_run
/// use cap_core::{CapApi, StaticToken};
///
/// let mut cap = CapApi::new(&StaticToken::new("token"));
/// cap.set_limit(20);
/// let mut profiles = cap.api("profiles")?;
/// let profile = profiles.fetch("12345", &Default::default(), None)?;
/// # Ok::<(), cap_core::ApiError>(())
/// ```
pub struct CapApi {
    endpoint: String,
    transport: Option<Arc<dyn HttpTransport>>,
    token: Option<String>,
    options: RequestOptions,
}

impl CapApi {
    /// A client on the default endpoint; the transport is built on first use.
    pub fn new(auth: &dyn AuthProvider) -> Self {
        Self::builder().auth(auth).build()
    }

    pub fn with_transport(transport: Arc<dyn HttpTransport>, auth: &dyn AuthProvider) -> Self {
        Self::builder().transport(transport).auth(auth).build()
    }

    /// Like [`CapApi::new`], with the endpoint taken from `CAP_API_ENDPOINT`
    /// when it is set and non-empty.
    pub fn from_env(auth: &dyn AuthProvider) -> Self {
        let mut builder = Self::builder().auth(auth);
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.is_empty() {
                builder = builder.endpoint(endpoint);
            }
        }
        builder.build()
    }

    pub fn builder() -> CapApiBuilder {
        CapApiBuilder::default()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        self.endpoint = endpoint.into();
    }

    /// The injected transport, or one built from the current endpoint and kept
    /// for every later call.
    pub fn http_client(&mut self) -> Arc<dyn HttpTransport> {
        let endpoint = &self.endpoint;
        self.transport
            .get_or_insert_with(|| Arc::new(UreqTransport::new(endpoint)))
            .clone()
    }

    pub fn set_http_client(&mut self, transport: Arc<dyn HttpTransport>) {
        self.transport = Some(transport);
    }

    pub(crate) fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    /// An empty token counts as no token.
    pub fn set_api_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.is_empty());
    }

    pub fn api_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn http_options(&self) -> &RequestOptions {
        &self.options
    }

    pub fn set_http_options(&mut self, options: RequestOptions) {
        self.options = options;
    }

    /// Items per page (`ps`).
    pub fn set_limit(&mut self, limit: u32) {
        self.options.set_query_param(PAGE_SIZE_KEY, limit.to_string());
    }

    pub fn limit(&self) -> Option<u32> {
        self.options.query_param(PAGE_SIZE_KEY)?.parse().ok()
    }

    /// Page number (`p`).
    pub fn set_page(&mut self, page: u32) {
        self.options.set_query_param(PAGE_KEY, page.to_string());
    }

    pub fn page(&self) -> Option<u32> {
        self.options.query_param(PAGE_KEY)?.parse().ok()
    }

    /// A client for the resource called `name`, e.g. `"profiles"`.
    pub fn api(&mut self, name: &str) -> Result<ResourceClient> {
        let resource: Resource = name.parse()?;
        Ok(self.resource(resource))
    }

    pub fn resource(&mut self, resource: Resource) -> ResourceClient {
        let transport = self.http_client();

        let mut options = self.options.clone();
        match &self.token {
            Some(token) => options.set_query_param(ACCESS_TOKEN_KEY, token.clone()),
            None => options.remove_query_param(ACCESS_TOKEN_KEY),
        }

        let mut client = ResourceClient::new(resource, transport, Some(options));
        client.set_endpoint(&self.endpoint);
        client
    }
}

impl std::fmt::Debug for CapApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapApi")
            .field("endpoint", &self.endpoint)
            .field("has_transport", &self.has_transport())
            .field("has_token", &self.token.is_some())
            .field("options", &self.options)
            .finish()
    }
}

/// Construction-time configuration for [`CapApi`].
#[derive(Default)]
pub struct CapApiBuilder {
    endpoint: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
    token: Option<String>,
    options: RequestOptions,
}

impl CapApiBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Take the token from an already-authenticated provider.
    pub fn auth(mut self, auth: &dyn AuthProvider) -> Self {
        self.token = auth.auth_api_token();
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.options.set_query_param(PAGE_SIZE_KEY, limit.to_string());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.options.set_query_param(PAGE_KEY, page.to_string());
        self
    }

    pub fn build(self) -> CapApi {
        let mut api = CapApi {
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            transport: self.transport,
            token: None,
            options: self.options,
        };
        api.set_api_token(self.token);
        api
    }
}
