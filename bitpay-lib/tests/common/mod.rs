//! Shared helpers for client integration tests.

#![allow(dead_code)]

use bitpay_lib::models::{CurrencyInfo, CurrencyTable};
use bitpay_lib::{Client, ClientConfig, Environment, Facade, Identity, PrivateKeySource};
use wiremock::MockServer;

/// Private key with scalar 1.
pub const PRIVATE_KEY: &str = "0000000000000000000000000000000000000000000000000000000000000001";

pub const MERCHANT_TOKEN: &str = "merchant-token";
pub const PAYOUT_TOKEN: &str = "payout-token";

pub fn identity() -> Identity {
    Identity::from_hex(PRIVATE_KEY).expect("valid key")
}

pub fn currencies() -> CurrencyTable {
    CurrencyTable::new(vec![
        CurrencyInfo::new("BTC", 8),
        CurrencyInfo::new("USD", 2),
    ])
}

/// Configuration pointing at the mock server, with both facade tokens.
pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(Environment::Test)
        .with_base_url(server.uri())
        .with_token(Facade::Merchant, MERCHANT_TOKEN)
        .with_token(Facade::Payout, PAYOUT_TOKEN)
        .with_timeout(5)
}

/// Signing client against the mock server. Currencies are preloaded.
pub async fn client(server: &MockServer) -> Client {
    Client::builder(config(server).with_private_key(PrivateKeySource::Hex(PRIVATE_KEY.to_string())))
        .with_currencies(currencies())
        .build()
        .await
        .expect("client builds")
}

/// Client without a private key.
pub async fn unsigned_client(server: &MockServer) -> Client {
    Client::builder(config(server))
        .with_currencies(currencies())
        .build()
        .await
        .expect("client builds")
}
