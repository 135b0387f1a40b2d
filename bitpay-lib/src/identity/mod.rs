//! Request identity.
//!
//! The client authenticates requests by signing them with a secp256k1 private
//! key and presenting the compressed public key alongside the signature. The
//! private key never leaves this module.

mod keyfile;

use std::fmt;
use std::path::Path;

use rand::RngCore;
use secp256k1::{ecdsa, All, Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

pub use keyfile::{open_private_key, seal_private_key, KeyFileError};

/// Private key loading and parsing failures.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("private key is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("private key must be 32 bytes, got {0}")]
    InvalidLength(usize),
    #[error("private key is not a valid secp256k1 scalar")]
    InvalidScalar,
    #[error("failed to read private key file {path}: {reason}")]
    Read { path: String, reason: String },
    #[error(transparent)]
    KeyFile(#[from] KeyFileError),
    #[error("key file content is not UTF-8")]
    NotUtf8,
}

/// Signing identity of a client.
///
/// Holds exactly one private key for its whole lifetime. The compressed
/// public key is derived once at construction.
pub struct Identity {
    secp: Secp256k1<All>,
    secret: SecretKey,
    public_hex: String,
}

impl Identity {
    /// Build an identity from a raw secret key.
    pub fn from_secret_key(secret: SecretKey) -> Self {
        let secp = Secp256k1::new();
        let public = PublicKey::from_secret_key(&secp, &secret);
        Self {
            public_hex: hex::encode(public.serialize()),
            secp,
            secret,
        }
    }

    /// Parse a hex-encoded 32-byte private key.
    pub fn from_hex(key_hex: &str) -> Result<Self, KeyError> {
        let bytes = Zeroizing::new(hex::decode(key_hex.trim())?);
        if bytes.len() != 32 {
            return Err(KeyError::InvalidLength(bytes.len()));
        }
        let secret = SecretKey::from_slice(&bytes).map_err(|_| KeyError::InvalidScalar)?;
        Ok(Self::from_secret_key(secret))
    }

    /// Load a private key file.
    ///
    /// Without a secret the file holds the hex key as text. With a secret it
    /// is a sealed blob written by [`seal_private_key`].
    pub fn from_file(path: impl AsRef<Path>, secret: Option<&str>) -> Result<Self, KeyError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|e| KeyError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        match secret {
            Some(secret) => {
                let key = Zeroizing::new(open_private_key(&raw, secret)?);
                let key_hex = std::str::from_utf8(&key).map_err(|_| KeyError::NotUtf8)?;
                Self::from_hex(key_hex)
            }
            None => {
                let raw = Zeroizing::new(raw);
                let key_hex = std::str::from_utf8(&raw).map_err(|_| KeyError::NotUtf8)?;
                Self::from_hex(key_hex)
            }
        }
    }

    /// Generate a fresh random identity.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let mut bytes = Zeroizing::new([0u8; 32]);
            rng.fill_bytes(&mut *bytes);
            // Out-of-range scalars are astronomically rare; draw again.
            if let Ok(secret) = SecretKey::from_slice(&*bytes) {
                return Self::from_secret_key(secret);
            }
        }
    }

    /// Export the private key as hex, for persisting a generated identity.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.secret.secret_bytes()))
    }

    /// Compressed public key, hex-encoded (66 characters).
    pub fn public_key_hex(&self) -> &str {
        &self.public_hex
    }

    /// Sign `payload` and return the DER-encoded signature as hex.
    ///
    /// ECDSA over the SHA-256 digest of the payload with RFC 6979 nonces, so
    /// the same key and payload always give the same signature.
    pub fn sign(&self, payload: &[u8]) -> String {
        let digest: [u8; 32] = Sha256::digest(payload).into();
        let message = Message::from_digest(digest);
        let signature = self.secp.sign_ecdsa(&message, &self.secret);
        hex::encode(signature.serialize_der().to_vec())
    }

    /// Verify a hex signature produced by [`Identity::sign`].
    pub fn verify(&self, payload: &[u8], signature_hex: &str) -> bool {
        let Ok(der) = hex::decode(signature_hex) else {
            return false;
        };
        let Ok(signature) = ecdsa::Signature::from_der(&der) else {
            return false;
        };
        let digest: [u8; 32] = Sha256::digest(payload).into();
        let message = Message::from_digest(digest);
        let public = PublicKey::from_secret_key(&self.secp, &self.secret);
        self.secp.verify_ecdsa(&message, &signature, &public).is_ok()
    }
}

impl Identity {
    /// Overwrite the secret key in place.
    fn erase(&mut self) {
        self.secret.non_secure_erase();
    }
}

impl Drop for Identity {
    fn drop(&mut self) {
        self.erase();
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("public_key", &self.public_hex)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TEST_KEY: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    #[test]
    fn test_public_key_of_scalar_one() {
        let identity = Identity::from_hex(TEST_KEY).unwrap();
        // secp256k1 generator point, compressed
        assert_eq!(
            identity.public_key_hex(),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_sign_is_deterministic_and_verifies() {
        let identity = Identity::from_hex(TEST_KEY).unwrap();
        let payload = b"https://test.bitpay.com/invoices{\"price\":10}";

        let first = identity.sign(payload);
        let second = identity.sign(payload);
        assert_eq!(first, second);
        assert!(identity.verify(payload, &first));
        assert!(!identity.verify(b"tampered", &first));
    }

    #[test]
    fn test_invalid_keys_rejected() {
        assert!(matches!(
            Identity::from_hex("zz"),
            Err(KeyError::InvalidHex(_))
        ));
        assert!(matches!(
            Identity::from_hex("abcd"),
            Err(KeyError::InvalidLength(2))
        ));
        assert!(matches!(
            Identity::from_hex(&"00".repeat(32)),
            Err(KeyError::InvalidScalar)
        ));
    }

    #[test]
    fn test_generate_roundtrips_through_hex() {
        let identity = Identity::generate();
        let restored = Identity::from_hex(&identity.to_hex()).unwrap();
        assert_eq!(identity.public_key_hex(), restored.public_key_hex());
    }

    #[test]
    fn test_plain_key_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  {}  ", TEST_KEY).unwrap();

        let identity = Identity::from_file(file.path(), None).unwrap();
        assert!(identity.public_key_hex().starts_with("0279be66"));
    }

    #[test]
    fn test_sealed_key_file() {
        let sealed = seal_private_key(TEST_KEY.as_bytes(), "hunter2").unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&sealed).unwrap();

        let identity = Identity::from_file(file.path(), Some("hunter2")).unwrap();
        assert!(identity.public_key_hex().starts_with("0279be66"));

        let err = Identity::from_file(file.path(), Some("wrong")).unwrap_err();
        assert!(matches!(err, KeyError::KeyFile(_)));
    }

    #[test]
    fn test_missing_key_file() {
        let err = Identity::from_file("/nonexistent/bitpay.key", None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bitpay.key"));
    }

    #[test]
    fn test_erase_overwrites_secret() {
        let mut identity = Identity::generate();
        let original = identity.to_hex();

        identity.erase();
        assert_ne!(*identity.to_hex(), *original);
    }

    #[test]
    fn test_debug_hides_secret() {
        let identity = Identity::from_hex(TEST_KEY).unwrap();
        let debug = format!("{:?}", identity);
        assert!(!debug.contains(TEST_KEY));
    }
}
