//! Test utilities for the BitPay client.
//!
//! - A recording mock transport with canned responses per route
//! - Fixtures: a known key, tokens and a ready-made client
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bitpay_lib::test_utils::{mock_client, MockTransport};
//! use bitpay_lib::transport::HttpMethod;
//!
//! let transport = MockTransport::new()
//!     .with_json(HttpMethod::Get, "invoices/abc", 200, json!({"data": {"id": "abc"}}));
//! let client = mock_client(transport.clone()).await;
//!
//! let invoice = client.get_invoice("abc", Facade::Merchant, true).await?;
//! assert_eq!(transport.requests().len(), 1);
//! ```

mod fixtures;
mod mock_transport;

pub use fixtures::{mock_client, test_identity, test_tokens, TestFixtures};
pub use mock_transport::MockTransport;
