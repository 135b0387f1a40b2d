//! Test fixtures.

use std::sync::Arc;

use crate::client::Client;
use crate::config::{ClientConfig, Environment};
use crate::identity::Identity;
use crate::models::{CurrencyInfo, CurrencyTable};
use crate::tokens::{Facade, TokenStore};

use super::MockTransport;

/// Commonly used test values.
pub struct TestFixtures;

impl TestFixtures {
    /// Private key with scalar 1; its public key is the curve generator.
    pub const PRIVATE_KEY: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000001";

    /// Compressed public key of [`TestFixtures::PRIVATE_KEY`].
    pub const PUBLIC_KEY: &'static str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    pub const MERCHANT_TOKEN: &'static str = "merchant-token";
    pub const PAYOUT_TOKEN: &'static str = "payout-token";

    /// Currency table with BTC at 8 decimal places and USD at 2.
    pub fn currencies() -> CurrencyTable {
        CurrencyTable::new(vec![
            CurrencyInfo::new("BTC", 8),
            CurrencyInfo::new("USD", 2),
        ])
    }
}

/// Identity of [`TestFixtures::PRIVATE_KEY`].
pub fn test_identity() -> Identity {
    Identity::from_hex(TestFixtures::PRIVATE_KEY).expect("fixture key is valid")
}

/// Merchant and payout tokens.
pub fn test_tokens() -> TokenStore {
    TokenStore::new()
        .with_token(Facade::Merchant, TestFixtures::MERCHANT_TOKEN)
        .with_token(Facade::Payout, TestFixtures::PAYOUT_TOKEN)
}

/// Test-environment client over `transport` with [`test_tokens`] and
/// [`TestFixtures::currencies`].
pub async fn mock_client(transport: MockTransport) -> Client {
    Client::builder(ClientConfig::new(Environment::Test).with_tokens(test_tokens()))
        .with_transport(Arc::new(transport))
        .with_currencies(TestFixtures::currencies())
        .build()
        .await
        .expect("mock client builds without I/O")
}
