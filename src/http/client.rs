//! HTTP client for function probing
//!
//! Thin wrapper around reqwest that resolves paths against the base URL,
//! bounds every call with a timeout and parses response bodies leniently.

use anyhow::{Context, Result};
use reqwest::{header::CONTENT_TYPE, Client, Method};
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Printed for response fields the function did not send
pub const ABSENT: &str = "None";

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    #[error("Failed to read response body: {0}")]
    BodyRead(String),
}

/// HTTP client bound to one base URL
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            // Every probe gets its own connection, closed once the call ends
            .pool_max_idle_per_host(0)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full URL
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// GET `{base_url}{path}`
    pub async fn get(&self, path: &str) -> Result<HttpResponse> {
        self.send::<()>(Method::GET, path, None).await
    }

    /// POST a JSON body to `{base_url}{path}`
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<HttpResponse> {
        self.send(Method::POST, path, Some(payload)).await
    }

    async fn send<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&T>,
    ) -> Result<HttpResponse> {
        let url = self.build_url(path);
        debug!("Sending {} request to {}", method, url);

        let mut req_builder = self.client.request(method, &url);
        if let Some(payload) = payload {
            req_builder = req_builder
                .header(CONTENT_TYPE, "application/json")
                .json(payload);
        }

        let start = Instant::now();

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow::anyhow!(HttpError::Timeout(self.timeout_secs))
            } else if e.is_connect() {
                anyhow::anyhow!(HttpError::ConnectionRefused(url.clone()))
            } else {
                anyhow::anyhow!(HttpError::RequestFailed(e.to_string()))
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                anyhow::anyhow!(HttpError::Timeout(self.timeout_secs))
            } else {
                anyhow::anyhow!(HttpError::BodyRead(e.to_string()))
            }
        })?;
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            json: ResponseBody::parse(&text),
            text,
            duration_ms,
        })
    }
}

/// HTTP response with a best-effort JSON view of the body
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status_code: u16,
    pub text: String,
    pub json: ResponseBody,
    pub duration_ms: u64,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

/// JSON object returned by the function, read field by field
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponseBody(Map<String, Value>);

impl ResponseBody {
    /// Parse a body; anything other than a JSON object yields an empty body
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Self(map),
            Ok(_) => Self::default(),
            Err(e) => {
                debug!("Response body is not JSON: {}", e);
                Self::default()
            }
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.field(key).and_then(Value::as_bool)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    /// Render a field for diagnostics, using the absent marker when missing
    pub fn display_field(&self, key: &str) -> String {
        match self.field(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => ABSENT.to_string(),
        }
    }
}

impl std::fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_response_body_fields() {
        let body = ResponseBody::parse(r#"{"success": false, "error": "Title is required"}"#);
        assert_eq!(body.bool_field("success"), Some(false));
        assert_eq!(body.str_field("error"), Some("Title is required"));
        assert!(body.has_field("error"));
        assert!(body.field("description").is_none());
        assert_eq!(body.display_field("description"), ABSENT);
    }

    #[test]
    fn test_response_body_tolerates_garbage() {
        assert_eq!(ResponseBody::parse("<html>oops</html>"), ResponseBody::default());
        assert_eq!(ResponseBody::parse("[1, 2, 3]"), ResponseBody::default());
        assert_eq!(ResponseBody::parse(""), ResponseBody::default());
    }

    #[test]
    fn test_display_field_renders_non_strings_as_json() {
        let body = ResponseBody::parse(r#"{"models_available": ["a", "b"], "ok": true}"#);
        assert_eq!(body.display_field("models_available"), r#"["a","b"]"#);
        assert_eq!(body.display_field("ok"), "true");
    }

    #[test]
    fn test_build_url_joins_base_and_path() {
        let client = HttpClient::new("http://localhost:7071/api/", 30).unwrap();
        assert_eq!(
            client.build_url("/health"),
            "http://localhost:7071/api/health"
        );
    }

    #[tokio::test]
    async fn test_get_parses_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
            .mount(&server)
            .await;

        let client = HttpClient::new(format!("{}/api", server.uri()), 5).unwrap();
        let resp = client.get("/health").await.unwrap();
        assert!(resp.is_ok());
        assert_eq!(resp.json.str_field("status"), Some("healthy"));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-description"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"title": "Lamp", "category": "Furniture"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(format!("{}/api", server.uri()), 5).unwrap();
        let resp = client
            .post_json(
                "/generate-description",
                &json!({"title": "Lamp", "category": "Furniture"}),
            )
            .await
            .unwrap();
        assert_eq!(resp.json.bool_field("success"), Some(true));
    }

    #[tokio::test]
    async fn test_non_json_body_yields_empty_map() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = HttpClient::new(server.uri(), 5).unwrap();
        let resp = client.get("/health").await.unwrap();
        assert_eq!(resp.status_code, 502);
        assert_eq!(resp.text, "Bad Gateway");
        assert_eq!(resp.json, ResponseBody::default());
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let client = HttpClient::new(server.uri(), 1).unwrap();
        let err = client.get("/slow").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HttpError>(),
            Some(HttpError::Timeout(1))
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_an_error() {
        let client = HttpClient::new("http://127.0.0.1:9", 2).unwrap();
        assert!(client.get("/health").await.is_err());
    }
}
