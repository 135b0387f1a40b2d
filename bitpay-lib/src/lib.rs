//! BitPay REST API client.
//!
//! Requests are authenticated with a secp256k1 identity: every signed call
//! carries the compressed public key and an ECDSA signature over the request
//! URL and body. Access is scoped by facade tokens (`merchant`, `payout`,
//! `pos`).
//!
//! # Features
//!
//! - **Signed transport**: reqwest-based HTTP transport behind the
//!   [`Transport`](transport::Transport) trait, with proxy and timeout support
//! - **Typed resources**: invoices, refunds, bills, payouts, payout batches,
//!   recipients, settlements, subscriptions, ledgers, rates, wallets and
//!   currencies
//! - **Structured errors**: every failure is a [`BitPayError`] naming the
//!   operation that failed and carrying the server's error code
//!
//! # Example
//!
//! ```ignore
//! use bitpay_lib::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let config = ClientConfig::new(Environment::Test)
//!     .with_private_key(PrivateKeySource::Hex(key_hex))
//!     .with_token(Facade::Merchant, merchant_token);
//! let client = Client::builder(config).build().await?;
//!
//! let invoice = client
//!     .create_invoice(Invoice::new(dec!(10), "USD"), Facade::Merchant, true)
//!     .await?;
//! println!("pay at {}", invoice.url.unwrap_or_default());
//! ```

pub mod client;
pub mod config;
pub mod errors;
pub mod identity;
pub mod models;
pub mod params;
pub mod prelude;
pub mod response;
pub mod tokens;
pub mod transport;

/// Test utilities for client testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ConfigError, Environment, PrivateKeySource};
pub use errors::{BitPayError, ErrorCategory, DEFAULT_API_CODE};
pub use identity::{Identity, KeyError};
pub use tokens::{Facade, TokenError, TokenStore};

/// Common result alias for BitPay operations.
pub type Result<T> = std::result::Result<T, BitPayError>;
