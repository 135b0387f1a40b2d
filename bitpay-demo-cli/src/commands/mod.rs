//! CLI command implementations

pub mod currencies;
pub mod invoice;
pub mod keygen;
pub mod ledgers;
pub mod rates;
pub mod wallets;

use std::path::Path;

use anyhow::{Context, Result};
use bitpay_lib::{Client, ClientConfig, Environment};
use tracing::debug;

use crate::ui;

/// Resolve the client configuration.
///
/// An explicit file wins, then `BITPAY_*` environment variables. Without
/// either the client runs unauthenticated against `fallback`, which is enough
/// for the public endpoints.
pub fn load_config(config_path: Option<&Path>, fallback: Environment) -> Result<ClientConfig> {
    if let Some(path) = config_path {
        return ClientConfig::from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()));
    }
    if let Some(config) = ClientConfig::from_env().context("Invalid BITPAY_* environment")? {
        return Ok(config);
    }
    Ok(ClientConfig::new(fallback))
}

/// Build a client, loading the currency table from the server.
pub async fn connect(config_path: Option<&Path>, fallback: Environment, verbose: bool) -> Result<Client> {
    let config = load_config(config_path, fallback)?;
    if config.private_key.is_none() {
        ui::warning("No private key configured; only public endpoints are available");
    }
    if verbose {
        ui::info(&format!("Connecting to {}", config.api_url()));
    }
    debug!(
        environment = %config.environment,
        signed = config.private_key.is_some(),
        tokens = config.tokens.len(),
        "Building BitPay client"
    );
    let client = Client::builder(config).build().await?;
    debug!(currencies = client.currencies().len(), "BitPay client ready");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"BitPayConfiguration": {"Environment": "Prod", "EnvConfig": {"Prod": {
                "PrivateKeyPath": "0000000000000000000000000000000000000000000000000000000000000001",
                "ApiTokens": {"merchant": "m"}
            }}}}"#,
        )
        .unwrap();

        let config = load_config(Some(file.path()), Environment::Test).unwrap();
        assert_eq!(config.environment, Environment::Prod);
        assert!(config.private_key.is_some());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/bitpay.json")), Environment::Test)
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bitpay.json"));
    }
}
