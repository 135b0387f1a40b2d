//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, warn};

use super::signer::{RequestSigner, IDENTITY_HEADER, SIGNATURE_HEADER};
use super::{ApiRequest, HttpMethod, RawResponse, Transport, TransportError};
use crate::config::ClientConfig;

/// API version requested from the server.
pub const API_VERSION: &str = "2.0.0";

/// Client identification sent with every request.
pub const PLUGIN_INFO: &str = concat!("BitPay_Rust_Client_v", env!("CARGO_PKG_VERSION"));

/// A request ready to be sent: resolved URL, body and headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<String>,
    pub headers: Vec<(&'static str, String)>,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Transport talking to the BitPay REST API over HTTPS.
pub struct HttpTransport {
    base_url: Url,
    signer: RequestSigner,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for `config`, signing with `signer`.
    pub fn new(config: &ClientConfig, signer: RequestSigner) -> Result<Self, TransportError> {
        let api_url = config.api_url();
        let base_url =
            Url::parse(&api_url).map_err(|e| TransportError::InvalidUrl(format!("{}: {}", api_url, e)))?;

        let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| TransportError::Build(format!("invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self {
            base_url,
            signer,
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    /// Base URL every request path is resolved against.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Resolve the URL and body of `request` and compute its headers.
    pub fn prepare(&self, request: &ApiRequest) -> Result<PreparedRequest, TransportError> {
        let segments = request.path.segments();
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || *s == "." || *s == "..")
        {
            return Err(TransportError::InvalidUrl(format!(
                "{}: invalid path segment {:?}",
                request.path, bad
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        let body = if request.method.uses_query() {
            let pairs = request.params.query_pairs();
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
            None
        } else {
            Some(request.params.to_body())
        };

        let mut headers = vec![
            ("x-accept-version", API_VERSION.to_string()),
            ("Content-Type", "application/json".to_string()),
            ("x-bitpay-plugin-info", PLUGIN_INFO.to_string()),
        ];
        if request.sign {
            let signing = self.signer.sign(url.as_str(), body.as_deref())?;
            headers.push((IDENTITY_HEADER, signing.identity));
            headers.push((SIGNATURE_HEADER, signing.signature));
        }

        Ok(PreparedRequest {
            method: request.method,
            url: url.into(),
            body,
            headers,
        })
    }

    fn map_reqwest_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_ms: self.timeout_secs * 1000,
            }
        } else if e.is_connect() {
            TransportError::Connect {
                target: self.base_url.to_string(),
                reason: e.to_string(),
            }
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let prepared = self.prepare(request)?;
        debug!(
            method = %request.method,
            path = %request.path,
            signed = request.sign,
            "Sending BitPay request"
        );

        let method = match prepared.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, prepared.url.as_str());
        for (name, value) in &prepared.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(body) = prepared.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        let response = RawResponse::new(status, body);
        if response.is_success() {
            debug!(status, path = %request.path, "BitPay response received");
        } else {
            warn!(status, path = %request.path, "BitPay request returned error status");
        }
        Ok(response)
    }

    fn can_sign(&self) -> bool {
        self.signer.has_identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::identity::Identity;
    use crate::params::Params;
    use std::sync::Arc;

    const TEST_KEY: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    fn transport(signer: RequestSigner) -> HttpTransport {
        HttpTransport::new(&ClientConfig::new(Environment::Test), signer).unwrap()
    }

    fn signed_transport() -> (HttpTransport, Arc<Identity>) {
        let identity = Arc::new(Identity::from_hex(TEST_KEY).unwrap());
        (
            transport(RequestSigner::new(Some(identity.clone()))),
            identity,
        )
    }

    #[test]
    fn test_get_uses_query_string() {
        let (transport, _) = signed_transport();
        let request = ApiRequest::get(
            "invoices/abc",
            Params::new().with("token", "t 1").with("limit", 5),
        );

        let prepared = transport.prepare(&request).unwrap();
        assert_eq!(
            prepared.url,
            "https://test.bitpay.com/invoices/abc?limit=5&token=t+1"
        );
        assert!(prepared.body.is_none());
        assert_eq!(prepared.header("x-accept-version"), Some("2.0.0"));
        assert!(prepared
            .header("x-bitpay-plugin-info")
            .unwrap()
            .starts_with("BitPay_Rust_Client_v"));
    }

    #[test]
    fn test_post_signs_url_and_body() {
        let (transport, identity) = signed_transport();
        let request = ApiRequest::post("invoices", Params::new().with("price", 10));

        let prepared = transport.prepare(&request).unwrap();
        assert_eq!(prepared.url, "https://test.bitpay.com/invoices");
        assert_eq!(prepared.body.as_deref(), Some(r#"{"price":10}"#));
        assert_eq!(prepared.header("x-identity"), Some(identity.public_key_hex()));

        let signature = prepared.header("x-signature").unwrap();
        assert!(identity.verify(
            br#"https://test.bitpay.com/invoices{"price":10}"#,
            signature
        ));
    }

    #[test]
    fn test_unsigned_request_has_no_identity_headers() {
        let transport = transport(RequestSigner::unsigned());
        let request = ApiRequest::get("rates", Params::new()).signed(false);

        let prepared = transport.prepare(&request).unwrap();
        assert_eq!(prepared.url, "https://test.bitpay.com/rates");
        assert!(prepared.header("x-identity").is_none());
        assert!(prepared.header("x-signature").is_none());
    }

    #[test]
    fn test_signed_request_without_identity_fails() {
        let transport = transport(RequestSigner::unsigned());
        let err = transport
            .prepare(&ApiRequest::get("invoices", Params::new()))
            .unwrap_err();
        assert!(matches!(err, TransportError::MissingIdentity));
        assert!(!transport.can_sign());
    }

    #[test]
    fn test_ids_stay_inside_their_segment() {
        let (transport, identity) = signed_transport();
        let token = || Params::new().with("token", "merchant-token");

        let prepared = transport
            .prepare(&ApiRequest::get(["invoices", "../ledgers/BTC"], token()))
            .unwrap();
        assert_eq!(
            prepared.url,
            "https://test.bitpay.com/invoices/..%2Fledgers%2FBTC?token=merchant-token"
        );

        let prepared = transport
            .prepare(&ApiRequest::get(["invoices", "abc#x", "a?b"], token()))
            .unwrap();
        assert_eq!(
            prepared.url,
            "https://test.bitpay.com/invoices/abc%23x/a%3Fb?token=merchant-token"
        );
        // What is signed is exactly what is sent.
        assert!(identity.verify(
            prepared.url.as_bytes(),
            prepared.header("x-signature").unwrap()
        ));
    }

    #[test]
    fn test_dot_segments_rejected() {
        let (transport, _) = signed_transport();
        for id in ["..", ".", ""] {
            let err = transport
                .prepare(&ApiRequest::delete(["invoices", id], Params::new()))
                .unwrap_err();
            assert!(matches!(err, TransportError::InvalidUrl(_)), "{:?}", id);
        }
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let config = ClientConfig::new(Environment::Test).with_base_url("https://proxy.example/bitpay");
        let transport = HttpTransport::new(&config, RequestSigner::unsigned()).unwrap();

        let prepared = transport
            .prepare(&ApiRequest::get(["rates", "BTC", "USD"], Params::new()).signed(false))
            .unwrap();
        assert_eq!(prepared.url, "https://proxy.example/bitpay/rates/BTC/USD");
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        let config = ClientConfig::new(Environment::Test).with_proxy("not a url");
        assert!(matches!(
            HttpTransport::new(&config, RequestSigner::unsigned()),
            Err(TransportError::Build(_))
        ));
    }
}
