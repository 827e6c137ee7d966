//! Request options passed through to the transport.
//!
//! # Design
//! Options are a small typed struct rather than a free-form map. Merging is a
//! shallow override: a field that is `Some` on the overriding side replaces
//! the base field wholesale, so a per-call `query` replaces the instance query
//! map instead of being folded into it. Query parameters that should be added
//! key-by-key go through [`RequestOptions::with_params`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Query-string parameters, kept sorted so requests are deterministic.
pub type Query = BTreeMap<String, String>;

/// Query key for the page number.
pub const PAGE_KEY: &str = "p";
/// Query key for the page size.
pub const PAGE_SIZE_KEY: &str = "ps";
/// Query key carrying the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Options handed to the transport with every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl RequestOptions {
    /// Shallow merge; fields set on `overrides` win.
    pub fn merge(&self, overrides: &RequestOptions) -> RequestOptions {
        RequestOptions {
            query: overrides.query.clone().or_else(|| self.query.clone()),
            headers: overrides.headers.clone().or_else(|| self.headers.clone()),
        }
    }

    /// Add `params` to the query, replacing existing keys of the same name.
    pub fn with_params(mut self, params: &Query) -> RequestOptions {
        if !params.is_empty() {
            let query = self.query.get_or_insert_with(Query::new);
            for (key, value) in params {
                query.insert(key.clone(), value.clone());
            }
        }
        self
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.as_ref()?.get(key).map(String::as_str)
    }

    pub fn set_query_param(&mut self, key: &str, value: impl Into<String>) {
        self.query
            .get_or_insert_with(Query::new)
            .insert(key.to_string(), value.into());
    }

    pub fn remove_query_param(&mut self, key: &str) {
        if let Some(query) = self.query.as_mut() {
            query.remove(key);
        }
    }

    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> Query {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn merge_prefers_override_fields() {
        let mut base = RequestOptions::default();
        base.set_query_param("ps", "10");
        base.set_header("accept", "application/json");

        let mut overrides = RequestOptions::default();
        overrides.set_query_param("p", "2");

        let merged = base.merge(&overrides);
        // Shallow: the override query replaces the base query entirely.
        assert_eq!(merged.query, Some(query(&[("p", "2")])));
        assert_eq!(merged.headers, base.headers);
    }

    #[test]
    fn merge_with_empty_override_is_identity() {
        let mut base = RequestOptions::default();
        base.set_query_param(ACCESS_TOKEN_KEY, "tok");
        assert_eq!(base.merge(&RequestOptions::default()), base);
    }

    #[test]
    fn params_override_existing_query_keys() {
        let mut options = RequestOptions::default();
        options.set_query_param("ps", "10");
        options.set_query_param(ACCESS_TOKEN_KEY, "tok");

        let options = options.with_params(&query(&[("ps", "50"), ("q", "smith")]));
        assert_eq!(options.query_param("ps"), Some("50"));
        assert_eq!(options.query_param("q"), Some("smith"));
        assert_eq!(options.query_param(ACCESS_TOKEN_KEY), Some("tok"));
    }

    #[test]
    fn empty_params_leave_query_unset() {
        let options = RequestOptions::default().with_params(&Query::new());
        assert!(options.query.is_none());
    }

    #[test]
    fn deserializes_from_json() {
        let options: RequestOptions =
            serde_json::from_str(r#"{"query":{"ps":"25"},"headers":{"accept":"application/json"}}"#)
                .unwrap();
        assert_eq!(options.query_param(PAGE_SIZE_KEY), Some("25"));
        assert_eq!(
            options.headers.unwrap().get("accept").map(String::as_str),
            Some("application/json")
        );

        let empty: RequestOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, RequestOptions::default());
    }

    #[test]
    fn remove_query_param_drops_only_that_key() {
        let mut options = RequestOptions::default();
        options.set_query_param(PAGE_KEY, "1");
        options.set_query_param(ACCESS_TOKEN_KEY, "tok");
        options.remove_query_param(ACCESS_TOKEN_KEY);
        assert_eq!(options.query, Some(query(&[("p", "1")])));
    }
}
