//! Keygen command - create a private key for signing requests

use std::path::Path;

use anyhow::{bail, Context, Result};
use bitpay_lib::identity::seal_private_key;
use bitpay_lib::Identity;
use tracing::debug;

use crate::ui;

/// Generate a key and write it to `output`, sealed when `secret` is given.
pub fn run(output: &Path, secret: Option<&str>, force: bool) -> Result<Identity> {
    ui::title("Generate Private Key");

    if output.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            output.display()
        );
    }

    let identity = Identity::generate();
    let key_hex = identity.to_hex();
    let contents = match secret {
        Some(secret) => seal_private_key(key_hex.as_bytes(), secret)?,
        None => key_hex.as_bytes().to_vec(),
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, contents)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(output, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Failed to restrict permissions of {}", output.display()))?;
    }
    debug!(path = %output.display(), sealed = secret.is_some(), "Key file written");

    ui::success(&format!("Private key written to {}", output.display()));
    ui::field("Public Key", identity.public_key_hex());
    ui::field("Sealed", if secret.is_some() { "yes" } else { "no" });
    ui::rule();
    ui::info("Pair this key with a facade token in the BitPay dashboard before signing requests");
    Ok(identity)
}

/// Print the public key of an existing key file.
pub fn show(path: &Path, secret: Option<&str>) -> Result<()> {
    let identity = Identity::from_file(path, secret)
        .with_context(|| format!("Failed to load key {}", path.display()))?;
    ui::title("Identity");
    ui::field("Key File", &path.display().to_string());
    ui::field("Public Key", identity.public_key_hex());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_plain_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys/bitpay.key");

        let identity = run(&path, None, false).unwrap();
        let loaded = Identity::from_file(&path, None).unwrap();
        assert_eq!(identity.public_key_hex(), loaded.public_key_hex());
    }

    #[test]
    fn test_generate_sealed_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bitpay.key");

        let identity = run(&path, Some("hunter2"), false).unwrap();
        let loaded = Identity::from_file(&path, Some("hunter2")).unwrap();
        assert_eq!(identity.public_key_hex(), loaded.public_key_hex());
        assert!(Identity::from_file(&path, None).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bitpay.key");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        run(&path, None, true).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bitpay.key");
        run(&path, None, false).unwrap();

        assert!(run(&path, None, false).is_err());
        assert!(run(&path, None, true).is_ok());
    }
}
