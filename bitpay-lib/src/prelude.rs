//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use bitpay_lib::prelude::*;
//! ```

// Client
pub use crate::client::{Client, ClientBuilder};
pub use crate::config::{ClientConfig, Environment, PrivateKeySource};
pub use crate::tokens::{Facade, TokenStore};

// Error handling
pub use crate::errors::{BitPayError, ErrorCategory};
pub use crate::Result;

// Identity
pub use crate::identity::Identity;

// Resources
pub use crate::models::{
    Bill, BillData, Buyer, CurrencyInfo, CurrencyTable, Invoice, InvoiceQuery, Item, Ledger,
    LedgerEntry, Payout, PayoutBatch, PayoutInstruction, PayoutQuery, PayoutRecipient,
    PayoutRecipients, Rate, Rates, Refund, RefundRequest, Settlement, SettlementQuery,
    Subscription, Wallet,
};

// Transport trait
pub use crate::transport::Transport;
