use std::fmt;

use async_trait::async_trait;

use crate::params::Params;

/// HTTP method of an API request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// GET and DELETE carry their parameters in the query string.
    pub fn uses_query(&self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource path relative to the base URL, kept as separate segments.
///
/// Each segment is percent-encoded on its own when the URL is built, so an
/// id containing `/`, `?` or `#` cannot leave its segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePath(Vec<String>);

impl ResourcePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

/// A fixed route such as `"payoutBatches"` or `"invoices/pay"`; split on `/`.
impl From<&'static str> for ResourcePath {
    fn from(route: &'static str) -> Self {
        Self::new(route.split('/').filter(|s| !s.is_empty()))
    }
}

/// One segment per element, taken verbatim.
impl<const N: usize> From<[&str; N]> for ResourcePath {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl PartialEq<str> for ResourcePath {
    fn eq(&self, other: &str) -> bool {
        self.0.iter().map(String::as_str).eq(other.split('/'))
    }
}

/// One API call: method, resource path relative to the base URL, parameters
/// and whether the call must carry identity headers.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: ResourcePath,
    pub params: Params,
    pub sign: bool,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<ResourcePath>, params: Params) -> Self {
        Self {
            method,
            path: path.into(),
            params,
            sign: true,
        }
    }

    pub fn get(path: impl Into<ResourcePath>, params: Params) -> Self {
        Self::new(HttpMethod::Get, path, params)
    }

    pub fn post(path: impl Into<ResourcePath>, params: Params) -> Self {
        Self::new(HttpMethod::Post, path, params)
    }

    pub fn put(path: impl Into<ResourcePath>, params: Params) -> Self {
        Self::new(HttpMethod::Put, path, params)
    }

    pub fn delete(path: impl Into<ResourcePath>, params: Params) -> Self {
        Self::new(HttpMethod::Delete, path, params)
    }

    /// Set whether the request is signed.
    pub fn signed(mut self, sign: bool) -> Self {
        self.sign = sign;
        self
    }
}

/// Status and body of a completed HTTP exchange, whatever the status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures before a response was received.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("signed request without a private key")]
    MissingIdentity,
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
    #[error("failed to build HTTP client: {0}")]
    Build(String),
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("connection to {target} failed: {reason}")]
    Connect { target: String, reason: String },
    #[error("request failed: {0}")]
    Request(String),
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Executes API requests against the BitPay REST API.
///
/// Any HTTP status is a successful exchange; only failures to get a response
/// at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;

    /// Whether signed requests can be executed.
    fn can_sign(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_literal_splits_on_slash() {
        let path = ResourcePath::from("invoices/pay");
        assert_eq!(path.segments(), ["invoices", "pay"]);
        assert!(path.eq("invoices/pay"));
    }

    #[test]
    fn test_array_segments_kept_whole() {
        let path = ResourcePath::from(["bills", "a/b", "deliveries"]);
        assert_eq!(path.segments().len(), 3);
        assert_eq!(path.to_string(), "bills/a/b/deliveries");
        assert!(!path.eq("bills/a"));
    }
}
