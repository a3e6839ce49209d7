//! # Transport Trait
//!
//! The seam between the gateway facade and the network.
//! `wio-client` ships the reqwest-backed implementation; anything else that
//! can answer a JSON request (a recording fake in tests, a proxy) can stand in.

use crate::error::WioResult;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// HTTP methods the gateway uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call headers and optional JSON body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub json: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Builder: set the JSON body
    pub fn with_json(mut self, body: impl Into<Value>) -> Self {
        self.json = Some(body.into());
        self
    }

    /// Look up a header case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Issues one request against the configured gateway and returns the parsed body.
///
/// Implementations must map network failures to `WioError::Transport` and
/// non-2xx, error-bearing, or non-JSON responses to `WioError::Api`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, method: Method, path: &str, options: RequestOptions) -> WioResult<Value>;
}

/// Type alias for a shared transport (dynamic dispatch)
pub type BoxedTransport = Arc<dyn Transport>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_options() {
        let options = RequestOptions::new()
            .with_header("Authorization", "Bearer wio_test")
            .with_json(json!({"amount": 1}));

        assert_eq!(options.header("authorization"), Some("Bearer wio_test"));
        assert_eq!(options.header("X-Missing"), None);
        assert_eq!(options.json, Some(json!({"amount": 1})));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Get.as_str(), "GET");
    }
}
