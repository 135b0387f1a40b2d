//! Public endpoints: no token, no signature.

use super::{Client, Op};
use crate::errors::ErrorCategory;
use crate::models::{CurrencyInfo, Rate, Rates, Wallet};
use crate::params::Params;
use crate::transport::{ApiRequest, ResourcePath};
use crate::Result;

const RATES: Op = Op::new(ErrorCategory::RateQuery, "Rates");
const WALLETS: Op = Op::new(ErrorCategory::WalletQuery, "Wallet");
const CURRENCIES: Op = Op::new(ErrorCategory::CurrencyQuery, "Currency");

fn public_get(path: impl Into<ResourcePath>) -> ApiRequest {
    ApiRequest::get(path, Params::new()).signed(false)
}

impl Client {
    /// Exchange rates of every currency against BTC.
    #[tracing::instrument(skip(self))]
    pub async fn get_rates(&self) -> Result<Rates> {
        self.call(RATES, public_get("rates")).await
    }

    /// Exchange rates of every currency against `base_currency`.
    #[tracing::instrument(skip(self))]
    pub async fn get_currency_rates(&self, base_currency: &str) -> Result<Rates> {
        self.call(RATES, public_get(["rates", base_currency]))
            .await
    }

    /// Exchange rate of `currency` against `base_currency`.
    #[tracing::instrument(skip(self))]
    pub async fn get_currency_pair_rate(&self, base_currency: &str, currency: &str) -> Result<Rate> {
        self.call(
            RATES,
            public_get(["rates", base_currency, currency]),
        )
        .await
    }

    /// Wallets buyers can pay with.
    #[tracing::instrument(skip(self))]
    pub async fn get_supported_wallets(&self) -> Result<Vec<Wallet>> {
        self.call(WALLETS, public_get("supportedWallets")).await
    }

    /// Currencies supported by BitPay, fetched from the server.
    ///
    /// The client keeps the table loaded at build time; see
    /// [`Client::currency_info`].
    #[tracing::instrument(skip(self))]
    pub async fn get_currencies(&self) -> Result<Vec<CurrencyInfo>> {
        self.call(CURRENCIES, public_get("currencies")).await
    }
}
