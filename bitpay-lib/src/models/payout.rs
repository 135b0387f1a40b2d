use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::currency::round_amount;

/// A single payout to a recipient.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "notificationURL", skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopper_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_executed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rates: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Value>>,
}

impl Payout {
    /// New payout of `amount` in `currency`, settled from `ledger_currency`.
    pub fn new(amount: Decimal, currency: impl Into<String>, ledger_currency: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            currency: Some(currency.into()),
            ledger_currency: Some(ledger_currency.into()),
            ..Default::default()
        }
    }

    /// Round the amount to `precision` decimal places.
    pub fn format_amount(&mut self, precision: u32) {
        self.amount = self.amount.map(|a| round_amount(a, precision));
    }
}

/// One payout inside a batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutInstruction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopper_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Value>>,
}

impl PayoutInstruction {
    /// Instruction paying `amount` to the recipient with `email`.
    pub fn to_email(amount: Decimal, email: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            email: Some(email.into()),
            ..Default::default()
        }
    }

    /// Instruction paying `amount` to the recipient with id `recipient_id`.
    pub fn to_recipient(amount: Decimal, recipient_id: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            recipient_id: Some(recipient_id.into()),
            ..Default::default()
        }
    }
}

/// A batch of payouts submitted together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutBatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<PayoutInstruction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "notificationURL", skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_fee: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_total: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_executed: Option<String>,
}

impl PayoutBatch {
    /// New batch in `currency`; the amount is the sum of the instructions.
    pub fn new(
        currency: impl Into<String>,
        ledger_currency: impl Into<String>,
        instructions: Vec<PayoutInstruction>,
    ) -> Self {
        let amount = instructions.iter().filter_map(|i| i.amount).sum();
        Self {
            amount: Some(amount),
            currency: Some(currency.into()),
            ledger_currency: Some(ledger_currency.into()),
            instructions: Some(instructions),
            ..Default::default()
        }
    }

    /// Round every instruction amount and the batch amount to `precision`
    /// decimal places.
    pub fn format_amount(&mut self, precision: u32) {
        if let Some(instructions) = &mut self.instructions {
            for instruction in instructions.iter_mut() {
                instruction.amount = instruction.amount.map(|a| round_amount(a, precision));
            }
        }
        self.amount = self.amount.map(|a| round_amount(a, precision));
    }
}

/// Filters for listing payouts or payout batches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PayoutQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    /// Ignored when listing batches.
    pub reference: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PayoutQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}
