//! Error types for BitPay operations.
//!
//! Every public operation fails with a [`BitPayError`] whose
//! [`ErrorCategory`] names the operation that failed ("failed while creating
//! an invoice", "failed while cancelling a payout"), independent of the
//! underlying cause. The cause is kept as the error source and its message is
//! appended to the error text.

use std::error::Error as StdError;
use std::fmt;

/// `apiCode` reported when the server did not supply one.
pub const DEFAULT_API_CODE: &str = "000000";

/// Operation category of a failure.
///
/// The discriminant is the fixed internal numeric code of the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCategory {
    /// Client or configuration could not be established
    Generic = 100,

    InvoiceCreation = 102,
    InvoiceQuery = 103,
    InvoiceUpdate = 104,
    InvoiceCancellation = 105,
    InvoiceNotification = 106,
    InvoicePayment = 107,

    RefundCreation = 112,
    RefundQuery = 113,
    RefundUpdate = 114,
    RefundCancellation = 115,
    RefundNotification = 116,

    BillCreation = 122,
    BillQuery = 123,
    BillUpdate = 124,
    BillDelivery = 125,

    LedgerQuery = 132,

    RateQuery = 142,

    SettlementQuery = 152,

    SubscriptionCreation = 162,
    SubscriptionQuery = 163,
    SubscriptionUpdate = 164,

    CurrencyQuery = 172,

    WalletQuery = 182,

    PayoutCreation = 192,
    PayoutQuery = 193,
    PayoutCancellation = 195,
    PayoutNotification = 196,

    PayoutBatchCreation = 202,
    PayoutBatchQuery = 203,
    PayoutBatchCancellation = 205,
    PayoutBatchNotification = 206,

    PayoutRecipientCreation = 212,
    PayoutRecipientQuery = 213,
    PayoutRecipientUpdate = 214,
    PayoutRecipientCancellation = 215,
    PayoutRecipientNotification = 216,
}

impl ErrorCategory {
    /// Internal numeric code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Fixed BitPay code string of the category, e.g. `BITPAY-INVOICE-GET`.
    pub fn bitpay_code(self) -> &'static str {
        match self {
            Self::Generic => "BITPAY-GENERIC",
            Self::InvoiceCreation => "BITPAY-INVOICE-CREATE",
            Self::InvoiceQuery => "BITPAY-INVOICE-GET",
            Self::InvoiceUpdate => "BITPAY-INVOICE-UPDATE",
            Self::InvoiceCancellation => "BITPAY-INVOICE-CANCEL",
            Self::InvoiceNotification => "BITPAY-INVOICE-NOTIFICATION",
            Self::InvoicePayment => "BITPAY-INVOICE-PAY-UPDATE",
            Self::RefundCreation => "BITPAY-REFUND-CREATE",
            Self::RefundQuery => "BITPAY-REFUND-GET",
            Self::RefundUpdate => "BITPAY-REFUND-UPDATE",
            Self::RefundCancellation => "BITPAY-REFUND-CANCEL",
            Self::RefundNotification => "BITPAY-REFUND-NOTIFICATION",
            Self::BillCreation => "BITPAY-BILL-CREATE",
            Self::BillQuery => "BITPAY-BILL-GET",
            Self::BillUpdate => "BITPAY-BILL-UPDATE",
            Self::BillDelivery => "BITPAY-BILL-DELIVERY",
            Self::LedgerQuery => "BITPAY-LEDGER-GET",
            Self::RateQuery => "BITPAY-RATES-GET",
            Self::SettlementQuery => "BITPAY-SETTLEMENTS-GET",
            Self::SubscriptionCreation => "BITPAY-SUBSCRIPTION-CREATE",
            Self::SubscriptionQuery => "BITPAY-SUBSCRIPTION-GET",
            Self::SubscriptionUpdate => "BITPAY-SUBSCRIPTION-UPDATE",
            Self::CurrencyQuery => "BITPAY-CURRENCY-GET",
            Self::WalletQuery => "BITPAY-WALLET-GET",
            Self::PayoutCreation => "BITPAY-PAYOUT-SUBMIT",
            Self::PayoutQuery => "BITPAY-PAYOUT-GET",
            Self::PayoutCancellation => "BITPAY-PAYOUT-CANCEL",
            Self::PayoutNotification => "BITPAY-PAYOUT-NOTIFICATION",
            Self::PayoutBatchCreation => "BITPAY-PAYOUT-BATCH-SUBMIT",
            Self::PayoutBatchQuery => "BITPAY-PAYOUT-BATCH-GET",
            Self::PayoutBatchCancellation => "BITPAY-PAYOUT-BATCH-CANCEL",
            Self::PayoutBatchNotification => "BITPAY-PAYOUT-BATCH-NOTIFICATION",
            Self::PayoutRecipientCreation => "BITPAY-PAYOUT-RECIPIENT-SUBMIT",
            Self::PayoutRecipientQuery => "BITPAY-PAYOUT-RECIPIENT-GET",
            Self::PayoutRecipientUpdate => "BITPAY-PAYOUT-RECIPIENT-UPDATE",
            Self::PayoutRecipientCancellation => "BITPAY-PAYOUT-RECIPIENT-CANCEL",
            Self::PayoutRecipientNotification => "BITPAY-PAYOUT-RECIPIENT-NOTIFICATION",
        }
    }

    /// Fixed human-readable label of the category.
    pub fn label(self) -> &'static str {
        match self {
            Self::Generic => "Unexpected BitPay exception",
            Self::InvoiceCreation => "Failed to create invoice",
            Self::InvoiceQuery => "Failed to retrieve invoice",
            Self::InvoiceUpdate => "Failed to update invoice",
            Self::InvoiceCancellation => "Failed to cancel invoice",
            Self::InvoiceNotification => "Failed to send invoice notification",
            Self::InvoicePayment => "Failed to pay invoice",
            Self::RefundCreation => "Failed to create refund",
            Self::RefundQuery => "Failed to retrieve refund",
            Self::RefundUpdate => "Failed to update refund",
            Self::RefundCancellation => "Failed to cancel refund",
            Self::RefundNotification => "Failed to send refund notification",
            Self::BillCreation => "Failed to create bill",
            Self::BillQuery => "Failed to retrieve bill",
            Self::BillUpdate => "Failed to update bill",
            Self::BillDelivery => "Failed to deliver bill",
            Self::LedgerQuery => "Failed to retrieve ledger",
            Self::RateQuery => "Failed to retrieve rates",
            Self::SettlementQuery => "Failed to retrieve settlements",
            Self::SubscriptionCreation => "Failed to create subscription",
            Self::SubscriptionQuery => "Failed to retrieve subscription",
            Self::SubscriptionUpdate => "Failed to update subscription",
            Self::CurrencyQuery => "Failed to retrieve currencies",
            Self::WalletQuery => "Failed to retrieve supported wallets",
            Self::PayoutCreation => "Failed to create payout",
            Self::PayoutQuery => "Failed to retrieve payout",
            Self::PayoutCancellation => "Failed to cancel payout",
            Self::PayoutNotification => "Failed to send payout notification",
            Self::PayoutBatchCreation => "Failed to create payout batch",
            Self::PayoutBatchQuery => "Failed to retrieve payout batch",
            Self::PayoutBatchCancellation => "Failed to cancel payout batch",
            Self::PayoutBatchNotification => "Failed to send payout batch notification",
            Self::PayoutRecipientCreation => "Failed to create payout recipient",
            Self::PayoutRecipientQuery => "Failed to retrieve payout recipient",
            Self::PayoutRecipientUpdate => "Failed to update payout recipient",
            Self::PayoutRecipientCancellation => "Failed to cancel payout recipient",
            Self::PayoutRecipientNotification => {
                "Failed to send payout recipient notification"
            }
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bitpay_code())
    }
}

/// Error returned by every BitPay client operation.
///
/// Created once at the boundary where a request could not be built, the HTTP
/// call failed, or the response could not be decoded; never mutated after.
#[derive(Debug)]
pub struct BitPayError {
    category: ErrorCategory,
    message: String,
    api_code: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl BitPayError {
    /// Create an error without a server code or underlying cause.
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            api_code: DEFAULT_API_CODE.to_string(),
            source: None,
        }
    }

    /// Create a client/configuration error.
    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Generic, message)
    }

    /// Attach the server-supplied error code. `None` keeps the sentinel.
    pub fn with_api_code(mut self, api_code: Option<String>) -> Self {
        if let Some(code) = api_code.filter(|c| !c.is_empty()) {
            self.api_code = code;
        }
        self
    }

    /// Attach the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Operation category that failed.
    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    /// Internal numeric code of the category.
    pub fn code(&self) -> u16 {
        self.category.code()
    }

    /// Server error code, or [`DEFAULT_API_CODE`].
    pub fn api_code(&self) -> &str {
        &self.api_code
    }

    /// Message without the category prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if the failure belongs to `category`.
    pub fn is(&self, category: ErrorCategory) -> bool {
        self.category == category
    }
}

impl fmt::Display for BitPayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}-> {}",
            self.category.bitpay_code(),
            self.category.label(),
            self.message
        )
    }
}

impl StdError for BitPayError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}
