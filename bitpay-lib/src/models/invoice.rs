use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Buyer details attached to an invoice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<bool>,
}

/// One line of an itemized invoice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemizedDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_fee: Option<bool>,
}

/// A BitPay invoice.
///
/// Fields set by the caller go on the wire when creating the invoice; the
/// rest are filled in by the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_data: Option<String>,
    #[serde(rename = "notificationURL", skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_speed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
    #[serde(rename = "redirectURL", skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(rename = "closeURL", skip_serializing_if = "Option::is_none")]
    pub close_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_redirect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_currencies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptance_window: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_buyer_selected_wallet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced_buyer_selected_transaction_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itemized_details: Option<Vec<ItemizedDetail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitpay_id_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_pay_pro_required: Option<bool>,

    // Server-populated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_status: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_fee_detected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_confirmations: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_address_request_pending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_provided_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_cancelled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_amount_paid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underpaid_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overpaid_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rates: Option<Value>,
}

impl Invoice {
    /// New invoice for `price` in `currency`.
    pub fn new(price: Decimal, currency: impl Into<String>) -> Self {
        Self {
            price: Some(price),
            currency: Some(currency.into()),
            ..Default::default()
        }
    }
}

/// Filters for listing invoices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvoiceQuery {
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub status: Option<String>,
    pub order_id: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl InvoiceQuery {
    /// Invoices created between `date_start` and `date_end`.
    pub fn new(date_start: NaiveDate, date_end: NaiveDate) -> Self {
        Self {
            date_start,
            date_end,
            status: None,
            order_id: None,
            limit: None,
            offset: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}
