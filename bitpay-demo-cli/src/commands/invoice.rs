//! Invoice commands - create, inspect and cancel invoices

use anyhow::Result;
use bitpay_lib::models::{Buyer, Invoice, InvoiceQuery};
use bitpay_lib::{Client, Facade};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::ui;

/// Fields collected from the command line for a new invoice.
#[derive(Debug, Default)]
pub struct NewInvoice {
    pub price: Decimal,
    pub currency: String,
    pub order_id: Option<String>,
    pub buyer_email: Option<String>,
    pub notification_url: Option<String>,
    pub description: Option<String>,
}

impl NewInvoice {
    pub fn into_invoice(self) -> Invoice {
        let mut invoice = Invoice::new(self.price, self.currency);
        invoice.order_id = self.order_id;
        invoice.notification_url = self.notification_url;
        invoice.item_desc = self.description;
        invoice.buyer = self.buyer_email.map(|email| Buyer {
            email: Some(email),
            notify: Some(true),
            ..Default::default()
        });
        invoice
    }
}

fn print_summary(invoice: &Invoice) {
    ui::field("Id", invoice.id.as_deref().unwrap_or("-"));
    ui::field("Status", invoice.status.as_deref().unwrap_or("-"));
    if let (Some(price), Some(currency)) = (invoice.price, invoice.currency.as_deref()) {
        ui::field("Price", &format!("{} {}", price, currency));
    }
    if let Some(url) = &invoice.url {
        ui::field("Payment URL", url);
    }
}

pub async fn create(client: &Client, request: NewInvoice, verbose: bool) -> Result<()> {
    ui::title("Create Invoice");
    let invoice = client
        .create_invoice(request.into_invoice(), Facade::Merchant, true)
        .await?;
    info!(invoice_id = ?invoice.id, "Invoice created");
    ui::success("Invoice created");
    print_summary(&invoice);
    if verbose {
        ui::rule();
        ui::print_json(&invoice)?;
    }
    Ok(())
}

pub async fn get(client: &Client, invoice_id: &str, verbose: bool) -> Result<()> {
    ui::title("Invoice");
    let invoice = client.get_invoice(invoice_id, Facade::Merchant, true).await?;
    print_summary(&invoice);
    if verbose {
        ui::rule();
        ui::print_json(&invoice)?;
    }
    Ok(())
}

pub async fn list(
    client: &Client,
    from: NaiveDate,
    to: NaiveDate,
    status: Option<String>,
    limit: Option<u32>,
) -> Result<()> {
    ui::title(&format!("Invoices {} to {}", from, to));
    let mut query = InvoiceQuery::new(from, to);
    if let Some(status) = status {
        query = query.with_status(status);
    }
    if let Some(limit) = limit {
        query = query.with_page(limit, 0);
    }

    let invoices = client.get_invoices(&query).await?;
    debug!(count = invoices.len(), "Invoices fetched");
    if invoices.is_empty() {
        ui::info("No invoices found");
        return Ok(());
    }
    for invoice in &invoices {
        ui::rule();
        print_summary(invoice);
    }
    Ok(())
}

pub async fn cancel(client: &Client, invoice_id: &str, force: bool) -> Result<()> {
    ui::title("Cancel Invoice");
    let invoice = client.cancel_invoice(invoice_id, force).await?;
    info!(invoice_id, force, "Invoice cancelled");
    ui::success("Invoice cancelled");
    print_summary(&invoice);
    Ok(())
}

pub async fn notify(client: &Client, invoice_id: &str) -> Result<()> {
    if client.request_invoice_notification(invoice_id).await? {
        ui::success("Notification requested");
    } else {
        ui::warning("Server did not confirm the notification request");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_invoice_mapping() {
        let invoice = NewInvoice {
            price: Decimal::new(1050, 2),
            currency: "USD".to_string(),
            order_id: Some("order-7".to_string()),
            buyer_email: Some("buyer@example.com".to_string()),
            ..Default::default()
        }
        .into_invoice();

        assert_eq!(invoice.price, Some(Decimal::new(1050, 2)));
        assert_eq!(invoice.order_id.as_deref(), Some("order-7"));
        let buyer = invoice.buyer.unwrap();
        assert_eq!(buyer.email.as_deref(), Some("buyer@example.com"));
        assert!(invoice.notification_url.is_none());
    }
}
