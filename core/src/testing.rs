//! Stub transport shared by the unit tests.

use std::sync::Mutex;

use crate::error::{ApiError, Result};
use crate::http::{HttpResponse, HttpTransport};
use crate::options::RequestOptions;

/// Replies with a canned response (or error) and records every call.
pub(crate) struct StubTransport {
    reply: Reply,
    calls: Mutex<Vec<(String, RequestOptions)>>,
}

enum Reply {
    Response(HttpResponse),
    Unreachable,
}

impl StubTransport {
    pub(crate) fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Reply::Response(HttpResponse::new(status, body)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            reply: Reply::Unreachable,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, RequestOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

impl HttpTransport for StubTransport {
    fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), options.clone()));
        match &self.reply {
            Reply::Response(response) => Ok(response.clone()),
            Reply::Unreachable => Err(ApiError::Transport("connection refused".into())),
        }
    }
}
