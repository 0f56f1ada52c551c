//! Mock HTTP client for testing.
//!
//! Responses are queued per method and URL. Each call takes the next queued
//! response; the last one stays in place and answers every later call.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::traits::{header_value, Headers, HttpClient, HttpError, HttpRequest, Method, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Header value by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        header_value(&self.headers, name)
    }

    /// The request body parsed as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response with any status
    Success(Response),
    /// Fail at the transport level
    Error(HttpError),
}

impl MockResponse {
    /// A response with a JSON body.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &value))
    }

    /// A response with an empty body.
    pub fn status(status: u16) -> Self {
        MockResponse::Success(Response::new(status, bytes::Bytes::new()))
    }
}

#[derive(Debug)]
struct Route {
    method: Option<Method>,
    url: String,
    queue: VecDeque<MockResponse>,
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use therapy_chat::adapters::mock::{MockHttpClient, MockResponse};
/// use therapy_chat::traits::Method;
///
/// let client = MockHttpClient::new();
/// client.push_response(Method::Get, "http://api/Chats/", MockResponse::status(401));
/// client.push_response(Method::Get, "http://api/Chats/", MockResponse::json(200, json!([])));
///
/// // first call gets 401, every later call gets 200
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    routes: Arc<Mutex<Vec<Route>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request to `url`, whatever the method, with `response`.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut routes = self.routes.lock().unwrap();
        routes.retain(|route| !(route.method.is_none() && route.url == url));
        routes.push(Route {
            method: None,
            url: url.to_string(),
            queue: VecDeque::from([response]),
        });
    }

    /// Queue a response for `method` + `url`.
    pub fn push_response(&self, method: Method, url: &str, response: MockResponse) {
        let mut routes = self.routes.lock().unwrap();
        match routes
            .iter_mut()
            .find(|route| route.method == Some(method) && route.url == url)
        {
            Some(route) => route.queue.push_back(response),
            None => routes.push(Route {
                method: Some(method),
                url: url.to_string(),
                queue: VecDeque::from([response]),
            }),
        }
    }

    /// Response for URLs without a configured route.
    pub fn set_default_response(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Recorded requests for one method and URL, in order.
    pub fn requests_to(&self, method: Method, url: &str) -> Vec<RecordedRequest> {
        self.get_requests()
            .into_iter()
            .filter(|request| request.method == method && request.url == url)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn next_response(&self, method: Method, url: &str) -> Option<MockResponse> {
        let mut routes = self.routes.lock().unwrap();

        // Method-specific routes win over catch-all ones
        let position = routes
            .iter()
            .position(|route| route.method == Some(method) && route.url == url)
            .or_else(|| {
                routes
                    .iter()
                    .position(|route| route.method.is_none() && route.url == url)
            });

        if let Some(index) = position {
            let queue = &mut routes[index].queue;
            return if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
        }

        self.default_response.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: &HttpRequest) -> Result<Response, HttpError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
        });
        let response = self.next_response(request.method, &request.url);

        // Yield once so concurrent callers interleave the way real I/O would
        tokio::task::yield_now().await;

        match response {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "No mock response for {} {}",
                request.method, request.url
            ))),
        }
    }
}
