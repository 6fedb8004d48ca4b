use anyhow::Result;
use http_body_util::{BodyExt, Full};
use hyper::{body::Bytes, Method, Request, Response, StatusCode};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde_json::Value;
use std::collections::HashMap;

pub const SYNTHESIZE_PATH: &str = "/api/tts/synthesize";

/// Talks to a running voxtag server over plain HTTP
#[derive(Clone)]
pub struct TestClient {
    base_url: String,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl TestClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            client: Client::builder(TokioExecutor::new()).build_http(),
        }
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::GET, path, Full::new(Bytes::new())).await
    }

    /// POST a synthesis request body as JSON
    pub async fn synthesize(&self, body: Value) -> Result<ApiResponse> {
        let payload = Full::new(Bytes::from(serde_json::to_vec(&body)?));
        self.send(Method::POST, SYNTHESIZE_PATH, payload).await
    }

    /// Synthesize plain text with no extra options
    pub async fn synthesize_text(&self, text: &str) -> Result<ApiResponse> {
        self.synthesize(serde_json::json!({ "text": text })).await
    }

    async fn send(&self, method: Method, path: &str, body: Full<Bytes>) -> Result<ApiResponse> {
        let request = Request::builder()
            .method(method)
            .uri(format!("{}{}", self.base_url, path))
            .header("content-type", "application/json")
            .body(body)?;

        ApiResponse::read(self.client.request(request).await?).await
    }
}

/// A fully buffered response. Header names are lowercase.
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub body_bytes: Vec<u8>,
    /// Parsed body when it is JSON
    pub body: Option<Value>,
}

impl ApiResponse {
    async fn read(response: Response<hyper::body::Incoming>) -> Result<Self> {
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body_bytes = response.into_body().collect().await?.to_bytes().to_vec();
        let body = serde_json::from_slice(&body_bytes).ok();

        Ok(Self {
            status,
            headers,
            body_bytes,
            body,
        })
    }

    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "unexpected status, body: {:?}",
            self.body
        );
        self
    }

    /// Checks the `message` field of an error body
    pub fn assert_error_message(&self, fragment: &str) -> &Self {
        let message = self
            .json_str("message")
            .expect("error body should carry a message");
        assert!(
            message.contains(fragment),
            "expected '{}' in error message '{}'",
            fragment,
            message
        );
        self
    }

    pub fn json_str(&self, field: &str) -> Option<&str> {
        self.body.as_ref()?.get(field)?.as_str()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn assert_header(&self, name: &str, value: &str) -> &Self {
        assert_eq!(self.header(name), Some(value), "header '{}'", name);
        self
    }

    pub fn assert_request_id(&self) -> &Self {
        assert!(
            self.header("x-request-id").is_some_and(|id| !id.is_empty()),
            "missing x-request-id"
        );
        self
    }

    pub fn assert_attempts(&self, attempts: u32) -> &Self {
        self.assert_header("x-attempts", &attempts.to_string())
    }

    /// Annotation value returned for `emotion`, `face` or `action`
    pub fn annotation(&self, kind: &str) -> Option<&str> {
        self.header(&format!("x-{kind}"))
    }
}
