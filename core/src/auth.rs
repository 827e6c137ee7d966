//! Source of the access token.
//!
//! Token acquisition happens elsewhere; the client only asks an
//! [`AuthProvider`] for a token it already holds.

/// Supplies an access token obtained out-of-band.
pub trait AuthProvider {
    fn auth_api_token(&self) -> Option<String>;
}

/// A token that is already known, e.g. read from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// A provider with no token; requests go out without `access_token`.
    pub fn none() -> Self {
        Self(None)
    }
}

impl AuthProvider for StaticToken {
    fn auth_api_token(&self) -> Option<String> {
        self.0.clone()
    }
}
