//! # HTTP Transport
//!
//! reqwest-backed implementation of `wio_core::Transport`.
//! One request per call, no retries.

use crate::config::WioConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use wio_core::{Method, RequestOptions, Transport, WioError, WioResult};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("wiopayments-rs/", env!("CARGO_PKG_VERSION"));

const JSON: &str = "application/json";

/// Sends gateway requests over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
    verify_tls: bool,
}

impl HttpTransport {
    /// Build a transport from client configuration
    pub fn new(config: &WioConfig) -> WioResult<Self> {
        if !config.verify_tls {
            warn!(
                base_url = %config.base_url,
                "TLS certificate verification is disabled; do not use this outside testing"
            );
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WioError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.trimmed_base_url().to_string(),
            client,
            verify_tls: config.verify_tls,
        })
    }

    /// Whether server certificates are checked
    pub fn verifies_tls(&self) -> bool {
        self.verify_tls
    }

    /// Full URL for a request path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(options: &RequestOptions) -> WioResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        if options.json.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        }

        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| WioError::Configuration(format!("Invalid header name: {}", name)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| WioError::Configuration(format!("Invalid value for header {}", name)))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, method, options), fields(method = %method))]
    async fn request(&self, method: Method, path: &str, options: RequestOptions) -> WioResult<Value> {
        let url = self.url(path);
        let headers = Self::headers(&options)?;

        let mut builder = self
            .client
            .request(reqwest_method(method), &url)
            .headers(headers);

        if let Some(body) = &options.json {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| WioError::Serialization(format!("Failed to encode body: {}", e)))?;
            builder = builder.body(bytes);
        }

        let response = builder.send().await.map_err(|e| {
            WioError::transport(format!("Request to {} failed: {}", url, e), e.is_timeout(), e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            WioError::transport(
                format!("Failed to read response from {}: {}", url, e),
                e.is_timeout(),
                e,
            )
        })?;

        debug!(status, bytes = body.len(), "Gateway responded");

        parse_response(status, &body)
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Turn a status code and body into the parsed JSON or an `Api` error.
///
/// An `error` object in the body takes precedence over the HTTP status, on
/// both failing and successful responses.
pub fn parse_response(status: u16, body: &str) -> WioResult<Value> {
    let parsed = serde_json::from_str::<Value>(body);

    if !(200..300).contains(&status) {
        if let Some(err) = parsed.as_ref().ok().and_then(|v| server_error(status, v)) {
            return Err(err);
        }
        return Err(WioError::api(status, None, format!("HTTP {}: {}", status, body)));
    }

    let value = parsed
        .map_err(|e| WioError::api(status, None, format!("Invalid JSON response: {}", e)))?;

    match server_error(status, &value) {
        Some(err) => Err(err),
        None => Ok(value),
    }
}

fn server_error(status: u16, value: &Value) -> Option<WioError> {
    let error = value.get("error").filter(|e| !e.is_null())?;

    let (message, code) = match error {
        Value::Object(obj) => (
            obj.get("message").and_then(Value::as_str),
            obj.get("code").and_then(code_string),
        ),
        Value::String(message) => (Some(message.as_str()), None),
        _ => (None, None),
    };

    Some(WioError::api(status, code, message.unwrap_or("API Error")))
}

fn code_string(code: &Value) -> Option<String> {
    match code {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_body() {
        let value = parse_response(200, r#"{"id": "pay_1"}"#).unwrap();
        assert_eq!(value, json!({"id": "pay_1"}));
    }

    #[test]
    fn test_error_object_beats_status() {
        let err = parse_response(
            422,
            r#"{"error": {"message": "Order already paid", "code": "order_paid"}}"#,
        )
        .unwrap_err();

        match err {
            WioError::Api { status, code, message } => {
                assert_eq!(status, 422);
                assert_eq!(code.as_deref(), Some("order_paid"));
                assert_eq!(message, "Order already paid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_in_success_response() {
        let err = parse_response(200, r#"{"error": {"code": 4001}}"#).unwrap_err();
        assert_eq!(err.api_code(), Some("4001"));
        assert_eq!(err.to_string(), "API error [200]: API Error");
    }

    #[test]
    fn test_null_error_is_not_an_error() {
        let value = parse_response(200, r#"{"error": null, "id": "x"}"#).unwrap();
        assert_eq!(value["id"], json!("x"));
    }

    #[test]
    fn test_plain_http_failure() {
        let err = parse_response(502, "Bad Gateway").unwrap_err();
        assert!(matches!(err, WioError::Api { status: 502, code: None, .. }));
        assert_eq!(err.to_string(), "API error [502]: HTTP 502: Bad Gateway");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_malformed_success_body() {
        let err = parse_response(200, "<html>oops</html>").unwrap_err();
        match err {
            WioError::Api { status, message, .. } => {
                assert_eq!(status, 200);
                assert!(message.starts_with("Invalid JSON response"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_headers() {
        let get = HttpTransport::headers(&RequestOptions::new().with_header("Authorization", "Bearer k"))
            .unwrap();
        assert_eq!(get.get(ACCEPT).unwrap(), JSON);
        assert!(get.get(CONTENT_TYPE).is_none());
        assert_eq!(get.get("authorization").unwrap(), "Bearer k");

        let post = HttpTransport::headers(&RequestOptions::new().with_json(json!({}))).unwrap();
        assert_eq!(post.get(CONTENT_TYPE).unwrap(), JSON);

        assert!(HttpTransport::headers(&RequestOptions::new().with_header("bad header", "x")).is_err());
    }

    #[test]
    fn test_tls_verification_toggle() {
        let transport = HttpTransport::new(&WioConfig::new("k")).unwrap();
        assert!(transport.verifies_tls());

        let transport = HttpTransport::new(&WioConfig::new("k").with_verify_tls(false)).unwrap();
        assert!(!transport.verifies_tls());
    }

    #[test]
    fn test_url_joins_trimmed_base() {
        let config = WioConfig::new("k").with_base_url("https://gw.example.com/");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.url("/api/v1/create-payment"),
            "https://gw.example.com/api/v1/create-payment"
        );
    }
}
