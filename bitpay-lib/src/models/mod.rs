//! Typed BitPay resources.
//!
//! Every field the server may omit is an `Option`, and unset fields are left
//! out of the JSON sent to the server. Unknown response fields are ignored.

mod bill;
mod currency;
mod invoice;
mod ledger;
mod payout;
mod rate;
mod recipient;
mod refund;
mod settlement;
mod subscription;
mod wallet;

pub use bill::{Bill, Item};
pub use currency::{round_amount, CurrencyInfo, CurrencyTable, DEFAULT_PRECISION};
pub use invoice::{Buyer, Invoice, InvoiceQuery, ItemizedDetail};
pub use ledger::{Ledger, LedgerEntry};
pub use payout::{Payout, PayoutBatch, PayoutInstruction, PayoutQuery};
pub use rate::{Rate, Rates};
pub use recipient::{PayoutRecipient, PayoutRecipients};
pub use refund::{Refund, RefundRequest};
pub use settlement::{Settlement, SettlementQuery, DEFAULT_SETTLEMENT_LIMIT};
pub use subscription::{BillData, Subscription};
pub use wallet::{Wallet, WalletCurrency};

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_unset_fields_omitted() {
        let invoice = Invoice {
            notification_url: Some("https://merchant.example/ipn".to_string()),
            full_notifications: Some(false),
            ..Invoice::new(dec!(10.50), "USD")
        };

        let value = serde_json::to_value(&invoice).unwrap();
        assert_eq!(
            value,
            json!({
                "price": 10.5,
                "currency": "USD",
                "notificationURL": "https://merchant.example/ipn",
                "fullNotifications": false
            })
        );
    }

    #[test]
    fn test_decode_tolerates_missing_and_unknown_fields() {
        let invoice: Invoice = serde_json::from_value(json!({
            "id": "abc",
            "status": "paid",
            "someFutureField": {"x": 1}
        }))
        .unwrap();

        assert_eq!(invoice.id.as_deref(), Some("abc"));
        assert_eq!(invoice.status.as_deref(), Some("paid"));
        assert!(invoice.price.is_none());
        assert!(invoice.buyer.is_none());
    }

    #[test]
    fn test_set_fields_survive_encode_and_decode() {
        let bill = Bill::new("bill-1", "USD", "buyer@example.com")
            .with_items(vec![Item::new("Widget", dec!(6.0), 2)]);
        let decoded: Bill = serde_json::from_value(serde_json::to_value(&bill).unwrap()).unwrap();
        assert_eq!(decoded, bill);
    }

    #[test]
    fn test_payout_rounding() {
        let mut payout = Payout::new(dec!(10.123456789), "BTC", "USD");
        payout.format_amount(8);
        assert_eq!(payout.amount, Some(dec!(10.12345679)));

        let mut payout = Payout::new(dec!(10.125), "USD", "USD");
        payout.format_amount(2);
        assert_eq!(payout.amount, Some(dec!(10.13)));
    }

    #[test]
    fn test_batch_amount_is_instruction_sum_and_rounds() {
        let mut batch = PayoutBatch::new(
            "USD",
            "USD",
            vec![
                PayoutInstruction::to_email(dec!(5.005), "a@example.com"),
                PayoutInstruction::to_recipient(dec!(4.994), "recipient-1"),
            ],
        );
        assert_eq!(batch.amount, Some(dec!(9.999)));

        batch.format_amount(2);
        let instructions = batch.instructions.as_ref().unwrap();
        assert_eq!(instructions[0].amount, Some(dec!(5.01)));
        assert_eq!(instructions[1].amount, Some(dec!(4.99)));
        assert_eq!(batch.amount, Some(dec!(10.00)));
    }

    #[test]
    fn test_currency_precision_lookup() {
        let table = CurrencyTable::new(vec![CurrencyInfo::new("BTC", 8), CurrencyInfo {
            code: "XYZ".to_string(),
            ..Default::default()
        }]);
        assert_eq!(table.precision("BTC"), 8);
        assert_eq!(table.precision("XYZ"), DEFAULT_PRECISION);
        assert_eq!(table.precision("EUR"), DEFAULT_PRECISION);
    }

    #[test]
    fn test_rates_lookup() {
        let rates: Rates = serde_json::from_value(json!([
            {"code": "USD", "name": "US Dollar", "rate": 41248.11},
            {"code": "EUR", "name": "Eurozone Euro", "rate": 33823.04}
        ]))
        .unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates.get_rate("usd"), Some(dec!(41248.11)));
        assert_eq!(rates.get_rate("GBP"), None);
    }

    #[test]
    fn test_ledger_entry_type_field() {
        let entry: LedgerEntry =
            serde_json::from_value(json!({"type": "Invoice", "amount": 1.5, "code": 1000})).unwrap();
        assert_eq!(entry.entry_type.as_deref(), Some("Invoice"));
        assert_eq!(entry.code, Some(1000));
    }
}
