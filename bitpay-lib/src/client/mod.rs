//! The BitPay client.
//!
//! Every operation follows the same path: resolve the token of the
//! operation's facade, build the parameters, send the (usually signed)
//! request, and decode the response into a typed result. Failures at any
//! step surface as a [`BitPayError`] in the operation's category.
//!
//! ```rust,ignore
//! use bitpay_lib::prelude::*;
//!
//! let config = ClientConfig::from_file("bitpay.config.json")?;
//! let client = Client::builder(config).build().await?;
//! let invoice = client
//!     .create_invoice(Invoice::new(dec!(10), "USD"), Facade::Merchant, true)
//!     .await?;
//! ```

mod bills;
mod builder;
mod invoices;
mod ledgers;
mod payouts;
mod public;
mod recipients;
mod refunds;
mod settlements;
mod subscriptions;

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::Environment;
use crate::errors::{BitPayError, ErrorCategory};
use crate::models::{CurrencyInfo, CurrencyTable};
use crate::params::Params;
use crate::response::{self, ResponseError};
use crate::tokens::{Facade, TokenStore};
use crate::transport::{ApiRequest, RawResponse, Transport, TransportError};
use crate::Result;

pub use builder::ClientBuilder;

/// Gateway to the BitPay REST API.
///
/// Immutable once built; share it behind an `Arc` to issue calls from
/// several tasks.
pub struct Client {
    environment: Environment,
    tokens: TokenStore,
    transport: Arc<dyn Transport>,
    currencies: CurrencyTable,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("environment", &self.environment)
            .field("tokens", &self.tokens)
            .field("currencies", &self.currencies.len())
            .finish_non_exhaustive()
    }
}

/// A fetched resource carried no token of its own.
#[derive(Debug, thiserror::Error)]
#[error("{0} has no resource token")]
struct MissingResourceToken(&'static str);

/// What an operation is called in error messages, and its error category.
#[derive(Clone, Copy)]
struct Op {
    category: ErrorCategory,
    resource: &'static str,
}

impl Op {
    const fn new(category: ErrorCategory, resource: &'static str) -> Self {
        Self { category, resource }
    }

    /// Failure while building or sending the request, or reported by the server.
    fn request_error<E>(self, err: E) -> BitPayError
    where
        E: StdError + Send + Sync + 'static,
    {
        BitPayError::new(
            self.category,
            format!("failed to serialize {} object : {}", self.resource, err),
        )
        .with_source(err)
    }

    /// Failure of a preliminary call made on behalf of this operation.
    fn wrap(self, err: BitPayError) -> BitPayError {
        let api_code = err.api_code().to_string();
        self.request_error(err).with_api_code(Some(api_code))
    }

    /// Server-reported errors keep their API code; anything else is a
    /// decoding failure.
    fn decode_error(self, err: ResponseError) -> BitPayError {
        match err {
            ResponseError::Api { code, message } => {
                let api_code = code.clone();
                self.request_error(ResponseError::Api { code, message })
                    .with_api_code(api_code)
            }
            other => self.response_error(other),
        }
    }

    /// Failure while decoding the server response.
    fn response_error<E>(self, err: E) -> BitPayError
    where
        E: StdError + Send + Sync + 'static,
    {
        BitPayError::new(
            self.category,
            format!(
                "failed to deserialize BitPay server response ({}) : {}",
                self.resource, err
            ),
        )
        .with_source(err)
    }
}

impl Client {
    /// Start building a client from `config`.
    pub fn builder(config: crate::config::ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    /// Environment the client talks to.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Configured facade tokens.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Currencies loaded when the client was built.
    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    /// Cached properties of currency `code`.
    pub fn currency_info(&self, code: &str) -> Option<&CurrencyInfo> {
        self.currencies.get(code)
    }

    fn token(&self, op: Op, facade: Facade) -> Result<String> {
        self.tokens
            .resolve(facade)
            .map(str::to_string)
            .map_err(|e| op.request_error(e))
    }

    fn params_from<T: Serialize>(&self, op: Op, model: &T) -> Result<Params> {
        Params::from_serialize(model).map_err(|e| op.request_error(e))
    }

    /// Send `request` and return the raw response.
    async fn execute(&self, op: Op, request: ApiRequest) -> Result<RawResponse> {
        if request.sign && !self.transport.can_sign() {
            return Err(BitPayError::generic(format!(
                "missing private key, cannot sign {} {}",
                request.method, request.path
            )));
        }

        self.transport.execute(&request).await.map_err(|e| match e {
            TransportError::MissingIdentity => {
                BitPayError::generic(format!("missing private key : {}", e)).with_source(e)
            }
            other => op.request_error(other),
        })
    }

    /// Send `request` and return the decoded payload.
    async fn send(&self, op: Op, request: ApiRequest) -> Result<Value> {
        let response = self.execute(op, request).await?;
        response::decode(&response).map_err(|e| op.decode_error(e))
    }

    /// Send `request` and decode the payload into `T`.
    async fn call<T: DeserializeOwned>(&self, op: Op, request: ApiRequest) -> Result<T> {
        let payload = self.send(op, request).await?;
        serde_json::from_value(payload).map_err(|e| op.response_error(e))
    }

    /// Send `request` and report whether the server answered with success.
    async fn call_status(&self, op: Op, request: ApiRequest) -> Result<bool> {
        let response = self.execute(op, request).await?;
        response::decode_status(&response).map_err(|e| op.decode_error(e))
    }
}
