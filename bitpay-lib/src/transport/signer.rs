//! Request signing.
//!
//! The signed payload is the full request URL (query string included)
//! followed by the serialized body, or by nothing when there is no body.

use std::sync::Arc;

use crate::identity::Identity;

use super::TransportError;

/// Header carrying the compressed public key.
pub const IDENTITY_HEADER: &str = "x-identity";

/// Header carrying the DER signature.
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Identity headers of one signed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningHeaders {
    pub identity: String,
    pub signature: String,
}

/// Produces identity headers for signed requests.
#[derive(Clone, Debug, Default)]
pub struct RequestSigner {
    identity: Option<Arc<Identity>>,
}

impl RequestSigner {
    pub fn new(identity: Option<Arc<Identity>>) -> Self {
        Self { identity }
    }

    /// Signer that rejects every signed request.
    pub fn unsigned() -> Self {
        Self::default()
    }

    pub fn has_identity(&self) -> bool {
        self.identity.is_some()
    }

    /// Bytes that are signed for `url` and `body`.
    pub fn canonical(url: &str, body: Option<&str>) -> String {
        let mut canonical = String::with_capacity(url.len() + body.map_or(0, str::len));
        canonical.push_str(url);
        if let Some(body) = body {
            canonical.push_str(body);
        }
        canonical
    }

    /// Sign a request to `url` with `body`.
    pub fn sign(&self, url: &str, body: Option<&str>) -> Result<SigningHeaders, TransportError> {
        let identity = self
            .identity
            .as_ref()
            .ok_or(TransportError::MissingIdentity)?;
        let canonical = Self::canonical(url, body);
        Ok(SigningHeaders {
            identity: identity.public_key_hex().to_string(),
            signature: identity.sign(canonical.as_bytes()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    fn signer() -> (RequestSigner, Arc<Identity>) {
        let identity = Arc::new(Identity::from_hex(TEST_KEY).unwrap());
        (RequestSigner::new(Some(identity.clone())), identity)
    }

    #[test]
    fn test_canonical_is_url_then_body() {
        assert_eq!(
            RequestSigner::canonical("https://test.bitpay.com/invoices", Some(r#"{"a":1}"#)),
            r#"https://test.bitpay.com/invoices{"a":1}"#
        );
        assert_eq!(
            RequestSigner::canonical("https://test.bitpay.com/invoices?token=x", None),
            "https://test.bitpay.com/invoices?token=x"
        );
    }

    #[test]
    fn test_headers_verify() {
        let (signer, identity) = signer();
        let url = "https://test.bitpay.com/invoices";
        let body = r#"{"price":10,"token":"abc"}"#;

        let headers = signer.sign(url, Some(body)).unwrap();
        assert_eq!(headers.identity, identity.public_key_hex());
        assert!(identity.verify(format!("{}{}", url, body).as_bytes(), &headers.signature));
        assert_eq!(headers, signer.sign(url, Some(body)).unwrap());
    }

    #[test]
    fn test_missing_identity() {
        let err = RequestSigner::unsigned()
            .sign("https://test.bitpay.com/invoices", None)
            .unwrap_err();
        assert!(matches!(err, TransportError::MissingIdentity));
    }
}
