//! Error types for the CAP API client.
//!
//! # Design
//! Status handling is coarse: only `200` counts as success, and every other
//! status lands in `InvalidResponse` with the raw code attached for
//! debugging. Network-level failures raised by the transport use `Transport`.
//! Both are transport failures as far as callers are concerned; see
//! [`ApiError::is_transport_failure`].

use thiserror::Error;

/// Result type alias for the client.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by the facade, the resource clients and transports.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The transport returned a response whose status was not `200`.
    #[error("invalid response from transport: HTTP {status}")]
    InvalidResponse { status: u16 },

    /// The transport could not complete the request at all.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be read or was not valid JSON.
    #[error("could not read/parse body: {0}")]
    Decode(String),

    /// `CapApi::api` was called with a name that maps to no resource.
    #[error("undefined api instance called: \"{0}\"")]
    UnknownResource(String),
}

impl ApiError {
    /// True for non-200 statuses and network-level failures alike.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, ApiError::InvalidResponse { .. } | ApiError::Transport(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_are_grouped() {
        assert!(ApiError::InvalidResponse { status: 404 }.is_transport_failure());
        assert!(ApiError::Transport("connection refused".into()).is_transport_failure());
        assert!(!ApiError::Decode("eof".into()).is_transport_failure());
        assert!(!ApiError::UnknownResource("auth".into()).is_transport_failure());
    }

    #[test]
    fn unknown_resource_names_the_bad_input() {
        let err = ApiError::UnknownResource("widgets".into());
        assert_eq!(err.to_string(), "undefined api instance called: \"widgets\"");
    }
}
