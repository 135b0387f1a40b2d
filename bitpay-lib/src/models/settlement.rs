use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default page size when listing settlements.
pub const DEFAULT_SETTLEMENT_LIMIT: u32 = 100;

/// A settlement: funds moved from the BitPay ledger to the merchant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_info: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_executed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_completed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_balance: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_entries_sum: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_holdings: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_holdings_sum: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_entries: Option<Vec<Value>>,
    /// Resource token, needed for the reconciliation report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Filters for listing settlements.
///
/// Every filter goes on the wire; an unset status is sent as an empty string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementQuery {
    pub currency: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub status: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl SettlementQuery {
    pub fn new(currency: impl Into<String>, date_start: NaiveDate, date_end: NaiveDate) -> Self {
        Self {
            currency: currency.into(),
            date_start,
            date_end,
            status: None,
            limit: DEFAULT_SETTLEMENT_LIMIT,
            offset: 0,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}
