//! Sealed private key files.
//!
//! A private key stored at rest can be sealed with a secret. The key used for
//! AES-256-GCM is derived from the secret with Argon2id and a per-file salt.
//!
//! # Wire Format
//!
//! ```text
//! [1 byte version][16 bytes salt][12 bytes nonce][N bytes ciphertext][16 bytes auth tag]
//! ```

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::Argon2;
use rand::RngCore;
use zeroize::Zeroizing;

/// Current key file format version.
const KEYFILE_VERSION: u8 = 1;

const SALT_SIZE: usize = 16;

/// Size of the nonce in bytes (96 bits for GCM).
const NONCE_SIZE: usize = 12;

/// Size of the authentication tag in bytes.
const TAG_SIZE: usize = 16;

/// Key file errors.
#[derive(Debug, thiserror::Error)]
pub enum KeyFileError {
    #[error("key file encryption failed: {0}")]
    SealFailed(String),
    #[error("key file decryption failed (wrong secret or corrupted file)")]
    OpenFailed,
    #[error("key file is too short or malformed")]
    InvalidFormat,
    #[error("unsupported key file version: {0}")]
    UnsupportedVersion(u8),
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),
}

fn derive_key(secret: &str, salt: &[u8]) -> Result<Zeroizing<[u8; 32]>, KeyFileError> {
    let mut key = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(secret.as_bytes(), salt, &mut *key)
        .map_err(|e| KeyFileError::KeyDerivation(e.to_string()))?;
    Ok(key)
}

/// Seal `private_key` (usually the hex text of the key) with `secret`.
pub fn seal_private_key(private_key: &[u8], secret: &str) -> Result<Vec<u8>, KeyFileError> {
    let mut rng = rand::thread_rng();
    let mut salt = [0u8; SALT_SIZE];
    rng.fill_bytes(&mut salt);
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(secret, &salt)?;
    let cipher = Aes256Gcm::new_from_slice(&*key)
        .map_err(|e| KeyFileError::SealFailed(e.to_string()))?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), private_key)
        .map_err(|e| KeyFileError::SealFailed(e.to_string()))?;

    let mut sealed = Vec::with_capacity(1 + SALT_SIZE + NONCE_SIZE + ciphertext.len());
    sealed.push(KEYFILE_VERSION);
    sealed.extend_from_slice(&salt);
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Open a key file sealed by [`seal_private_key`].
pub fn open_private_key(sealed: &[u8], secret: &str) -> Result<Vec<u8>, KeyFileError> {
    if sealed.len() < 1 + SALT_SIZE + NONCE_SIZE + TAG_SIZE {
        return Err(KeyFileError::InvalidFormat);
    }
    if sealed[0] != KEYFILE_VERSION {
        return Err(KeyFileError::UnsupportedVersion(sealed[0]));
    }

    let salt = &sealed[1..1 + SALT_SIZE];
    let nonce_bytes = &sealed[1 + SALT_SIZE..1 + SALT_SIZE + NONCE_SIZE];
    let ciphertext = &sealed[1 + SALT_SIZE + NONCE_SIZE..];

    let key = derive_key(secret, salt)?;
    let cipher = Aes256Gcm::new_from_slice(&*key).map_err(|_| KeyFileError::OpenFailed)?;
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| KeyFileError::OpenFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_then_open() {
        let sealed = seal_private_key(b"deadbeef", "secret").unwrap();
        assert_eq!(sealed[0], KEYFILE_VERSION);
        assert_eq!(open_private_key(&sealed, "secret").unwrap(), b"deadbeef");
    }

    #[test]
    fn test_wrong_secret() {
        let sealed = seal_private_key(b"deadbeef", "secret").unwrap();
        assert!(matches!(
            open_private_key(&sealed, "other"),
            Err(KeyFileError::OpenFailed)
        ));
    }

    #[test]
    fn test_tampered_ciphertext() {
        let mut sealed = seal_private_key(b"deadbeef", "secret").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        assert!(open_private_key(&sealed, "secret").is_err());
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            open_private_key(b"short", "secret"),
            Err(KeyFileError::InvalidFormat)
        ));

        let mut sealed = seal_private_key(b"deadbeef", "secret").unwrap();
        sealed[0] = 9;
        assert!(matches!(
            open_private_key(&sealed, "secret"),
            Err(KeyFileError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn test_salt_and_nonce_are_random() {
        let a = seal_private_key(b"deadbeef", "secret").unwrap();
        let b = seal_private_key(b"deadbeef", "secret").unwrap();
        assert_ne!(a, b);
    }
}
