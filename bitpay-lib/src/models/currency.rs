use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places used for currencies missing from the table.
pub const DEFAULT_PRECISION: u32 = 2;

/// Round `amount` to `precision` decimal places, halves away from zero.
pub fn round_amount(amount: Decimal, precision: u32) -> Decimal {
    amount.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

/// Properties of a currency supported by BitPay.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyInfo {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currently_settled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanctioned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
}

impl CurrencyInfo {
    pub fn new(code: impl Into<String>, precision: u32) -> Self {
        Self {
            code: code.into(),
            precision: Some(precision),
            ..Default::default()
        }
    }
}

/// Currency lookup loaded once when the client is built.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyTable {
    currencies: Vec<CurrencyInfo>,
}

impl CurrencyTable {
    pub fn new(currencies: Vec<CurrencyInfo>) -> Self {
        Self { currencies }
    }

    /// Currency with code `code`, matched exactly.
    pub fn get(&self, code: &str) -> Option<&CurrencyInfo> {
        self.currencies.iter().find(|c| c.code == code)
    }

    /// Decimal places of `code`, [`DEFAULT_PRECISION`] when unknown.
    pub fn precision(&self, code: &str) -> u32 {
        self.get(code)
            .and_then(|c| c.precision)
            .unwrap_or(DEFAULT_PRECISION)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurrencyInfo> {
        self.currencies.iter()
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}
