use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exchange rate of one currency.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
}

/// A rate table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rates {
    pub rates: Vec<Rate>,
}

impl Rates {
    /// Rate for currency `code`, matched case-insensitively.
    pub fn get_rate(&self, code: &str) -> Option<Decimal> {
        self.rates
            .iter()
            .find(|r| r.code.as_deref().is_some_and(|c| c.eq_ignore_ascii_case(code)))
            .and_then(|r| r.rate)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
