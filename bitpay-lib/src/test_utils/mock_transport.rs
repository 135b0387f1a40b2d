//! Recording mock transport.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::transport::{ApiRequest, HttpMethod, RawResponse, Transport, TransportError};

#[derive(Default)]
struct MockState {
    routes: Vec<(HttpMethod, String, RawResponse)>,
    requests: Vec<ApiRequest>,
}

/// Transport answering from canned responses and recording every request.
///
/// Routes match on method and path; the first match wins and stays
/// registered. Unmatched requests fail with a transport error. Cloning
/// shares the same state.
#[derive(Clone)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
    can_sign: bool,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Mock that accepts signed requests.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
            can_sign: true,
        }
    }

    /// Mock that behaves like a client without a private key.
    pub fn without_identity() -> Self {
        Self {
            can_sign: false,
            ..Self::new()
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Answer `method path` with `response`.
    pub fn with_response(self, method: HttpMethod, path: &str, response: RawResponse) -> Self {
        self.state()
            .routes
            .push((method, path.to_string(), response));
        self
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn with_json(self, method: HttpMethod, path: &str, status: u16, body: Value) -> Self {
        self.with_response(method, path, RawResponse::new(status, body.to_string()))
    }

    /// Every request executed so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state().requests.clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state().requests.last().cloned()
    }

    /// Requests sent to `path`.
    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.state()
            .requests
            .iter()
            .filter(|r| r.path.eq(path))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let mut state = self.state();
        state.requests.push(request.clone());
        state
            .routes
            .iter()
            .find(|(method, path, _)| *method == request.method && request.path.eq(path.as_str()))
            .map(|(_, _, response)| response.clone())
            .ok_or_else(|| {
                TransportError::Request(format!(
                    "no mock response for {} {}",
                    request.method, request.path
                ))
            })
    }

    fn can_sign(&self) -> bool {
        self.can_sign
    }
}
