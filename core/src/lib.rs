//! Synchronous client for the CAP API.
//!
//! # Overview
//! [`CapApi`] holds the endpoint, access token and default request options,
//! and hands out [`ResourceClient`]s for the API's resource families (orgs,
//! profiles, schemas, search, layouts). Every resource client funnels through
//! one [`RequestExecutor`]: a single GET through an injected
//! [`HttpTransport`], followed by JSON decoding.
//!
//! # Design
//! - The transport is a trait object shared behind an `Arc`; `ureq` backs the
//!   default one, and tests inject stubs.
//! - Only HTTP 200 is a success. Anything else is
//!   [`ApiError::InvalidResponse`].
//! - Resource clients copy the facade's options when created and are not
//!   affected by later changes to the facade.
//! - The library emits `tracing` events but never installs a subscriber.

pub mod auth;
pub mod client;
pub mod error;
pub mod executor;
pub mod http;
pub mod options;
pub mod resource;

#[cfg(test)]
mod testing;

/// Base URL used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.stanford.edu";

pub use auth::{AuthProvider, StaticToken};
pub use client::{CapApi, CapApiBuilder};
pub use error::{ApiError, Result};
pub use executor::RequestExecutor;
pub use http::{HttpResponse, HttpTransport, UreqTransport};
pub use options::{Query, RequestOptions};
pub use resource::{Resource, ResourceClient};
