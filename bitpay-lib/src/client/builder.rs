use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::Client;
use crate::config::ClientConfig;
use crate::errors::BitPayError;
use crate::identity::Identity;
use crate::models::CurrencyTable;
use crate::transport::{HttpTransport, RequestSigner, Transport};
use crate::Result;

/// Builds a [`Client`].
///
/// Building loads the private key, sets up the transport and fetches the
/// currency table used to round payout amounts, unless one is supplied.
pub struct ClientBuilder {
    config: ClientConfig,
    identity: Option<Identity>,
    transport: Option<Arc<dyn Transport>>,
    currencies: Option<CurrencyTable>,
}

impl ClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            identity: None,
            transport: None,
            currencies: None,
        }
    }

    /// Load the configuration from a JSON or YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = ClientConfig::from_file(path).map_err(|e| {
            BitPayError::generic(format!("failed to initialize BitPay Client (Config) : {}", e))
                .with_source(e)
        })?;
        Ok(Self::new(config))
    }

    /// Sign with `identity` instead of the configured private key.
    ///
    /// Only used by the built-in HTTP transport; combining it with
    /// [`ClientBuilder::with_transport`] makes [`ClientBuilder::build`] fail.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Use a custom transport. The configured key is then not loaded; the
    /// transport does its own signing.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use `currencies` instead of fetching them from the server.
    pub fn with_currencies(mut self, currencies: CurrencyTable) -> Self {
        self.currencies = Some(currencies);
        self
    }

    fn load_identity(&mut self) -> Result<Option<Identity>> {
        if let Some(identity) = self.identity.take() {
            return Ok(Some(identity));
        }
        let Some(source) = &self.config.private_key else {
            return Ok(None);
        };
        source.load().map(Some).map_err(|e| {
            BitPayError::generic(format!("failed to initialize BitPay Client (Config) : {}", e))
                .with_source(e)
        })
    }

    /// Build the client.
    pub async fn build(mut self) -> Result<Client> {
        if self.transport.is_some() && self.identity.is_some() {
            return Err(BitPayError::generic(
                "failed to initialize BitPay Client : an identity cannot be used with a custom transport",
            ));
        }
        let transport: Arc<dyn Transport> = match self.transport.take() {
            Some(transport) => transport,
            None => {
                let identity = self.load_identity()?.map(Arc::new);
                let signer = RequestSigner::new(identity);
                let transport = HttpTransport::new(&self.config, signer).map_err(|e| {
                    BitPayError::generic(format!("failed to initialize BitPay Client : {}", e))
                        .with_source(e)
                })?;
                Arc::new(transport)
            }
        };

        let mut client = Client {
            environment: self.config.environment,
            tokens: self.config.tokens,
            transport,
            currencies: CurrencyTable::default(),
        };

        client.currencies = match self.currencies {
            Some(currencies) => currencies,
            None => {
                let currencies = client.get_currencies().await.map_err(|e| {
                    BitPayError::generic(format!("failed to load the currencies : {}", e))
                        .with_source(e)
                })?;
                CurrencyTable::new(currencies)
            }
        };
        debug!(
            environment = %client.environment,
            currencies = client.currencies.len(),
            "BitPay client ready"
        );

        Ok(client)
    }
}

impl Client {
    /// Build a client from a configuration file.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        ClientBuilder::from_file(path)?.build().await
    }

    /// Build a client from `BITPAY_*` environment variables.
    pub async fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()
            .map_err(|e| {
                BitPayError::generic(format!("failed to initialize BitPay Client (Config) : {}", e))
                    .with_source(e)
            })?
            .ok_or_else(|| BitPayError::generic("BITPAY_PRIVATE_KEY is not set"))?;
        ClientBuilder::new(config).build().await
    }
}
