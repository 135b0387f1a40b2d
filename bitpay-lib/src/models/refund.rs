use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A refund of a paid invoice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub immediate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_pays_refund_fee: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_fee: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_refund_notification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_request: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_refund_fee: Option<Decimal>,
}

/// Parameters of a new refund.
#[derive(Clone, Debug, PartialEq)]
pub struct RefundRequest {
    pub invoice_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub preview: bool,
    pub immediate: bool,
    pub buyer_pays_refund_fee: bool,
}

impl RefundRequest {
    /// Refund `amount` of `currency` on `invoice_id`.
    pub fn new(invoice_id: impl Into<String>, amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            amount,
            currency: currency.into(),
            preview: false,
            immediate: false,
            buyer_pays_refund_fee: false,
        }
    }

    /// Only preview the refund; nothing is sent to the buyer.
    pub fn preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    pub fn buyer_pays_refund_fee(mut self, buyer_pays: bool) -> Self {
        self.buyer_pays_refund_fee = buyer_pays;
        self
    }
}
