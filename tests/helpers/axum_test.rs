// ABOUTME: Axum HTTP testing utilities for integration tests
// ABOUTME: Drives routers with oneshot requests and reads SSE responses frame by frame

use axum::{
    body::{Body, BodyDataStream},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use futures_util::StreamExt;
use serde::Serialize;
use std::time::Duration;
use tower::ServiceExt;

/// Helper to build and execute HTTP requests against Axum routers
pub struct AxumTestRequest {
    method: Method,
    uri: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl AxumTestRequest {
    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Create a new GET request
    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    /// Create a new POST request
    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    /// Create a new PUT request
    pub fn put(uri: &str) -> Self {
        Self::new(Method::PUT, uri)
    }

    /// Create a new OPTIONS request
    pub fn options(uri: &str) -> Self {
        Self::new(Method::OPTIONS, uri)
    }

    /// Add a header to the request
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Add JSON body to the request
    pub fn json<T: Serialize>(mut self, data: &T) -> Self {
        self.body = Some(serde_json::to_string(data).expect("Failed to serialize JSON"));
        self.headers.push((
            header::CONTENT_TYPE.as_str().to_owned(),
            "application/json".to_owned(),
        ));
        self
    }

    /// Add a raw body to the request
    pub fn raw_body(mut self, body: &str, content_type: &str) -> Self {
        self.body = Some(body.to_owned());
        self.headers.push((
            header::CONTENT_TYPE.as_str().to_owned(),
            content_type.to_owned(),
        ));
        self
    }

    async fn dispatch(self, app: Router) -> axum::http::Response<Body> {
        let mut builder = Request::builder().method(self.method).uri(self.uri);

        for (key, value) in self.headers {
            builder = builder.header(key, value);
        }

        let request = builder
            .body(Body::from(self.body.unwrap_or_default()))
            .expect("Failed to build request");

        app.oneshot(request)
            .await
            .expect("Failed to execute request")
    }

    /// Execute the request against an Axum router
    pub async fn send(self, app: Router) -> AxumTestResponse {
        AxumTestResponse::from_response(self.dispatch(app).await).await
    }

    /// Execute the request and keep the streaming body open for SSE reads
    pub async fn open_stream(self, app: Router) -> SseTestStream {
        let response = self.dispatch(app).await;
        SseTestStream {
            status: response.status(),
            headers: response.headers().clone(),
            body: response.into_body().into_data_stream(),
            buffer: String::new(),
        }
    }
}

/// Wrapper around Axum HTTP response for testing
pub struct AxumTestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl AxumTestResponse {
    async fn from_response(response: axum::http::Response<Body>) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body")
            .to_vec();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Get the response status code as u16 for easy assertion
    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Response header value as a string
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
    }

    /// Get the response body as a JSON value
    pub fn json<T: serde::de::DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to deserialize JSON response")
    }

    /// Get the response body as a string
    pub fn text(self) -> String {
        String::from_utf8(self.body).expect("Failed to decode response as UTF-8")
    }

    /// Assert that the status code matches
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}: {}",
            expected,
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }
}

/// One parsed SSE event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// Event name, `message` when absent
    pub event: String,
    /// Joined data lines
    pub data: String,
}

impl SseFrame {
    /// Parse the data field as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.data).expect("SSE data is not JSON")
    }

    fn parse(block: &str) -> Option<Self> {
        let mut event = None;
        let mut data = Vec::new();

        for line in block.lines() {
            if line.starts_with(':') {
                continue;
            }
            if let Some(value) = line.strip_prefix("event:") {
                event = Some(value.trim_start().to_owned());
            } else if let Some(value) = line.strip_prefix("data:") {
                data.push(value.strip_prefix(' ').unwrap_or(value).to_owned());
            }
        }

        if event.is_none() && data.is_empty() {
            // Comment-only block, e.g. keep-alive
            return None;
        }

        Some(Self {
            event: event.unwrap_or_else(|| "message".to_owned()),
            data: data.join("\n"),
        })
    }
}

/// Open SSE response whose body is read incrementally
pub struct SseTestStream {
    status: StatusCode,
    headers: HeaderMap,
    body: BodyDataStream,
    buffer: String,
}

/// Outcome of waiting for the next SSE event
#[derive(Debug)]
pub enum SseRead {
    /// A complete event arrived
    Event(SseFrame),
    /// The server finished the body
    Ended,
    /// Nothing arrived within the wait
    TimedOut,
}

impl SseRead {
    /// Unwrap an event, panicking on end or timeout
    pub fn expect_event(self) -> SseFrame {
        match self {
            Self::Event(frame) => frame,
            other => panic!("Expected an SSE event, got {other:?}"),
        }
    }
}

impl SseTestStream {
    /// Response status code
    pub const fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Response header value as a string
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
    }

    /// Wait up to `wait` for the next event, skipping keep-alive comments
    pub async fn next_event_within(&mut self, wait: Duration) -> SseRead {
        let deadline = tokio::time::Instant::now() + wait;

        loop {
            if let Some(frame) = self.take_buffered_event() {
                return SseRead::Event(frame);
            }

            match tokio::time::timeout_at(deadline, self.body.next()).await {
                Err(_) => return SseRead::TimedOut,
                Ok(None) => return SseRead::Ended,
                Ok(Some(Err(e))) => panic!("SSE body error: {e}"),
                Ok(Some(Ok(bytes))) => {
                    self.buffer
                        .push_str(&String::from_utf8_lossy(&bytes).replace("\r\n", "\n"));
                }
            }
        }
    }

    /// Wait for the next event with a default timeout
    pub async fn next_event(&mut self) -> SseRead {
        self.next_event_within(Duration::from_secs(2)).await
    }

    fn take_buffered_event(&mut self) -> Option<SseFrame> {
        while let Some(end) = self.buffer.find("\n\n") {
            let block: String = self.buffer.drain(..end + 2).collect();
            if let Some(frame) = SseFrame::parse(&block) {
                return Some(frame);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Json};

    #[tokio::test]
    async fn test_axum_test_request_post_with_json() {
        let app = Router::new().route(
            "/test",
            axum::routing::post(|Json(body): Json<serde_json::Value>| async move {
                Json(serde_json::json!({"received": body}))
            }),
        );
        let response = AxumTestRequest::post("/test")
            .json(&serde_json::json!({"key": "value"}))
            .send(app)
            .await;
        assert_eq!(response.status(), 200);
        let json: serde_json::Value = response.json();
        assert_eq!(json["received"]["key"], "value");
    }

    #[tokio::test]
    async fn test_axum_test_request_get() {
        let app = Router::new().route("/test", get(|| async { "Hello" }));
        let response = AxumTestRequest::get("/test").send(app).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.text(), "Hello");
    }

    #[test]
    fn test_sse_frame_parsing() {
        let frame = SseFrame::parse("event: message\ndata: {\"count\":1}\n\n").unwrap();
        assert_eq!(frame.event, "message");
        assert_eq!(frame.json()["count"], 1);

        let compact = SseFrame::parse("event:message\ndata:x\n\n").unwrap();
        assert_eq!(compact.data, "x");

        assert!(SseFrame::parse(":keepalive\n\n").is_none());
    }
}
