//! Resource-scoped clients.
//!
//! # Design
//! The CAP API families (orgs, profiles, schemas, search, layouts) share one
//! request routine and differ only in the path they target, so they are one
//! `ResourceClient` type tagged with a [`Resource`] rather than five types.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::executor::RequestExecutor;
use crate::http::{HttpResponse, HttpTransport};
use crate::options::{Query, RequestOptions};
use crate::DEFAULT_ENDPOINT;

/// The resource families reachable through `CapApi::api`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Org,
    Profile,
    Schema,
    Search,
    Layout,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Org,
        Resource::Profile,
        Resource::Schema,
        Resource::Search,
        Resource::Layout,
    ];

    /// Path of this family below the API endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Org => "cap/v1/orgs",
            Resource::Profile => "cap/v1/profiles",
            Resource::Schema => "cap/v1/schemas",
            Resource::Search => "cap/v1/search",
            Resource::Layout => "cap/v1/layouts",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Resource::Org => "org",
            Resource::Profile => "profile",
            Resource::Schema => "schema",
            Resource::Search => "search",
            Resource::Layout => "layout",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = ApiError;

    /// Case-sensitive; `org`, `profile` and `layout` also take a plural.
    fn from_str(name: &str) -> Result<Self> {
        match name {
            "org" | "orgs" => Ok(Resource::Org),
            "profile" | "profiles" => Ok(Resource::Profile),
            "schema" => Ok(Resource::Schema),
            "search" => Ok(Resource::Search),
            "layout" | "layouts" => Ok(Resource::Layout),
            other => Err(ApiError::UnknownResource(other.to_string())),
        }
    }
}

/// A client bound to one resource family.
///
/// Holds its own copy of the options it was created with, so later changes
/// to the `CapApi` that produced it do not reach it.
#[derive(Debug)]
pub struct ResourceClient {
    resource: Resource,
    endpoint: String,
    executor: RequestExecutor,
}

impl ResourceClient {
    pub fn new(
        resource: Resource,
        transport: Arc<dyn HttpTransport>,
        options: Option<RequestOptions>,
    ) -> Self {
        Self {
            resource,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            executor: RequestExecutor::new(transport, options),
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set_endpoint(&mut self, endpoint: &str) {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
    }

    pub fn options(&self) -> &RequestOptions {
        self.executor.options()
    }

    pub fn set_options(&mut self, options: RequestOptions) {
        self.executor.set_options(options);
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        self.executor.transport()
    }

    pub fn last_response(&self) -> Option<&HttpResponse> {
        self.executor.last_response()
    }

    /// Full URL for `path` below this resource family. An empty path is the
    /// collection itself.
    pub fn url(&self, path: &str) -> String {
        let path = path.trim_matches('/');
        if path.is_empty() {
            format!("{}/{}", self.endpoint, self.resource.path())
        } else {
            format!("{}/{}/{path}", self.endpoint, self.resource.path())
        }
    }

    pub fn fetch_raw(
        &mut self,
        path: &str,
        params: &Query,
        extra: Option<&RequestOptions>,
    ) -> Result<HttpResponse> {
        let url = self.url(path);
        self.executor.fetch_raw(&url, params, extra)
    }

    pub fn fetch(
        &mut self,
        path: &str,
        params: &Query,
        extra: Option<&RequestOptions>,
    ) -> Result<serde_json::Value> {
        let url = self.url(path);
        self.executor.fetch(&url, params, extra)
    }

    pub fn fetch_as<T: DeserializeOwned>(
        &mut self,
        path: &str,
        params: &Query,
        extra: Option<&RequestOptions>,
    ) -> Result<T> {
        let url = self.url(path);
        self.executor.fetch_as(&url, params, extra)
    }
}
