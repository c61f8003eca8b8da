//! HTTP transport seam.
//!
//! [`Transport`] is the one place the access layer touches the network, so
//! every client above it can be exercised against [`MockTransport`] in
//! tests. The production impl wraps `reqwest` and reads the bearer token
//! from the persisted session store on every call — the store is the
//! authority, nothing here caches it.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde_json::Value;
use uuid::Uuid;

use crate::session::SessionStore;

use super::error::FetchError;

// ═══════════════════════════════════════════════════════════
// Request / response shapes
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// One logical backend request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    /// Attach the bearer token. Only the login call turns this off.
    pub authenticated: bool,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
            authenticated: true,
        }
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: Some(body),
            authenticated: true,
        }
    }

    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            url: url.into(),
            body: Some(body),
            authenticated: true,
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            url: url.into(),
            body: None,
            authenticated: true,
        }
    }

    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

/// Raw response: status plus the body captured as text. Parsing into
/// records happens above this layer so non-JSON bodies can be tolerated
/// where the contract requires it.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body into a record type.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_str(&self.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Human-readable message for a failed response: the server-authored
    /// `message`/`error` field when the body parses as JSON, else the
    /// transport status text. An unparseable error body is never an error
    /// of its own.
    pub fn error_message(&self) -> String {
        if let Ok(value) = serde_json::from_str::<Value>(&self.body) {
            for key in ["message", "error", "mensaje"] {
                if let Some(text) = value.get(key).and_then(Value::as_str) {
                    if !text.trim().is_empty() {
                        return text.to_string();
                    }
                }
            }
        }
        self.status_text.clone()
    }
}

// ═══════════════════════════════════════════════════════════
// Transport trait + production impl
// ═══════════════════════════════════════════════════════════

/// The network seam. One method: send a request, get the raw response.
/// No retry, no timeout beyond the client default, no cancellation.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// Production transport over `reqwest`.
pub struct ReqwestTransport {
    client: reqwest::Client,
    session: Arc<SessionStore>,
}

impl ReqwestTransport {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            session,
        }
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, FetchError> {
        let request_id = Uuid::new_v4();
        let started = Instant::now();
        tracing::debug!(
            %request_id,
            method = req.method.as_str(),
            url = %req.url,
            "backend request"
        );

        let mut builder = match req.method {
            Method::Get => self.client.get(&req.url),
            Method::Post => self.client.post(&req.url),
            Method::Put => self.client.put(&req.url),
            Method::Delete => self.client.delete(&req.url),
        };

        // Token read happens here, at call time — never at construction.
        if req.authenticated {
            if let Some(token) = self.session.token() {
                builder = builder.bearer_auth(token);
            }
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                FetchError::Connection("the server could not be reached".into())
            } else {
                FetchError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        let status_text = status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string();
        let body = response.text().await.unwrap_or_default();

        tracing::debug!(
            %request_id,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend response"
        );

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

// ═══════════════════════════════════════════════════════════
// MockTransport — scripted responses for tests
// ═══════════════════════════════════════════════════════════

/// In-memory transport for tests: scripted responses matched by method +
/// URL fragment, with every issued request recorded for assertions
/// (including the "zero network calls" properties).
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<MockRoute>>,
    requests: Mutex<Vec<HttpRequest>>,
}

struct MockRoute {
    method: Method,
    url_part: String,
    status: u16,
    body: String,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for requests whose URL contains `url_part`.
    /// Routes are matched in registration order; the first hit wins.
    pub fn respond(&self, method: Method, url_part: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().push(MockRoute {
            method,
            url_part: url_part.to_string(),
            status,
            body: body.to_string(),
        });
    }

    /// Every request issued through this transport, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests whose URL contains `url_part`.
    pub fn calls_to(&self, url_part: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.contains(url_part))
            .collect()
    }
}

impl Transport for MockTransport {
    async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, FetchError> {
        self.requests.lock().unwrap().push(req.clone());

        let routes = self.routes.lock().unwrap();
        let hit = routes
            .iter()
            .find(|r| r.method == req.method && req.url.contains(&r.url_part));

        match hit {
            Some(route) => Ok(HttpResponse {
                status: route.status,
                status_text: status_text_for(route.status).to_string(),
                body: route.body.clone(),
            }),
            None => Ok(HttpResponse {
                status: 404,
                status_text: "Not Found".to_string(),
                body: String::new(),
            }),
        }
    }
}

fn status_text_for(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown status",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_serves_scripted_response() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/pacientes/all", 200, r#"[{"id":1}]"#);

        let response = mock
            .execute(HttpRequest::get("http://x/api/pacientes/all"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"[{"id":1}]"#);
    }

    #[tokio::test]
    async fn mock_records_requests_in_order() {
        let mock = MockTransport::new();
        mock.execute(HttpRequest::get("http://x/a")).await.unwrap();
        mock.execute(HttpRequest::delete("http://x/b")).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(requests[1].method, Method::Delete);
    }

    #[tokio::test]
    async fn mock_unmatched_request_is_404() {
        let mock = MockTransport::new();
        let response = mock
            .execute(HttpRequest::get("http://x/nowhere"))
            .await
            .unwrap();
        assert_eq!(response.status, 404);
    }

    #[test]
    fn error_message_prefers_server_authored_text() {
        let response = HttpResponse {
            status: 409,
            status_text: "Conflict".into(),
            body: r#"{"message":"La cédula ya está registrada"}"#.into(),
        };
        assert_eq!(response.error_message(), "La cédula ya está registrada");
    }

    #[test]
    fn error_message_falls_back_on_non_json_body() {
        let response = HttpResponse {
            status: 502,
            status_text: "Bad Gateway".into(),
            body: "<html>upstream died</html>".into(),
        };
        assert_eq!(response.error_message(), "Bad Gateway");
    }

    #[test]
    fn error_message_falls_back_on_empty_message_field() {
        let response = HttpResponse {
            status: 500,
            status_text: "Internal Server Error".into(),
            body: r#"{"message":""}"#.into(),
        };
        assert_eq!(response.error_message(), "Internal Server Error");
    }

    #[test]
    fn unauthenticated_builder_clears_flag() {
        let req = HttpRequest::post("http://x/auth/login", serde_json::json!({})).unauthenticated();
        assert!(!req.authenticated);
    }
}
