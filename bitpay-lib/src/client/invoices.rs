use chrono::NaiveDate;

use super::{Client, MissingResourceToken, Op};
use crate::config::Environment;
use crate::errors::{BitPayError, ErrorCategory};
use crate::models::{Invoice, InvoiceQuery};
use crate::params::Params;
use crate::tokens::Facade;
use crate::transport::ApiRequest;
use crate::Result;

const CREATE: Op = Op::new(ErrorCategory::InvoiceCreation, "Invoice");
const QUERY: Op = Op::new(ErrorCategory::InvoiceQuery, "Invoice");
const UPDATE: Op = Op::new(ErrorCategory::InvoiceUpdate, "Invoice");
const CANCEL: Op = Op::new(ErrorCategory::InvoiceCancellation, "Invoice");
const PAY: Op = Op::new(ErrorCategory::InvoicePayment, "Invoice");
const NOTIFY: Op = Op::new(ErrorCategory::InvoiceNotification, "Invoice");

pub(super) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl Client {
    /// Create an invoice.
    ///
    /// The invoice is authorized by the token of `facade`; a GUID is generated
    /// when the invoice has none.
    #[tracing::instrument(skip(self, invoice))]
    pub async fn create_invoice(
        &self,
        mut invoice: Invoice,
        facade: Facade,
        sign: bool,
    ) -> Result<Invoice> {
        invoice.token = Some(self.token(CREATE, facade)?);
        if invoice.guid.is_none() {
            invoice.guid = Some(uuid::Uuid::new_v4().to_string());
        }
        let params = self.params_from(CREATE, &invoice)?;
        self.call(CREATE, ApiRequest::post("invoices", params).signed(sign))
            .await
    }

    /// Retrieve an invoice by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_invoice(&self, invoice_id: &str, facade: Facade, sign: bool) -> Result<Invoice> {
        let params = Params::new().with("token", self.token(QUERY, facade)?);
        self.call(
            QUERY,
            ApiRequest::get(["invoices", invoice_id], params).signed(sign),
        )
        .await
    }

    /// List invoices matching `query`.
    #[tracing::instrument(skip(self))]
    pub async fn get_invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>> {
        let mut params = Params::new()
            .with("token", self.token(QUERY, Facade::Merchant)?)
            .with("dateStart", format_date(query.date_start))
            .with("dateEnd", format_date(query.date_end));
        params.insert_opt("status", query.status.clone());
        params.insert_opt("orderId", query.order_id.clone());
        params.insert_opt("limit", query.limit);
        params.insert_opt("offset", query.offset);

        self.call(QUERY, ApiRequest::get("invoices", params)).await
    }

    /// Update the buyer email of an invoice.
    #[tracing::instrument(skip(self, buyer_email))]
    pub async fn update_invoice(&self, invoice_id: &str, buyer_email: &str) -> Result<Invoice> {
        let params = Params::new()
            .with("token", self.token(UPDATE, Facade::Merchant)?)
            .with("buyerEmail", buyer_email);
        self.call(
            UPDATE,
            ApiRequest::put(["invoices", invoice_id], params),
        )
        .await
    }

    /// Cancel an invoice. `forceCancel` is only sent when `force` is set.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_invoice(&self, invoice_id: &str, force: bool) -> Result<Invoice> {
        let mut params = Params::new().with("token", self.token(CANCEL, Facade::Merchant)?);
        if force {
            params.insert("forceCancel", true);
        }
        self.call(
            CANCEL,
            ApiRequest::delete(["invoices", invoice_id], params),
        )
        .await
    }

    /// Simulate a payment of an invoice. Only available in the test environment.
    #[tracing::instrument(skip(self))]
    pub async fn pay_invoice(&self, invoice_id: &str, status: &str, complete: bool) -> Result<Invoice> {
        if self.environment != Environment::Test {
            return Err(BitPayError::new(
                PAY.category,
                "Pay Invoice method only available in test or demo environments",
            ));
        }
        let params = Params::new()
            .with("token", self.token(PAY, Facade::Merchant)?)
            .with("status", status)
            .with("complete", complete);
        self.call(
            PAY,
            ApiRequest::put(["invoices", "pay", invoice_id], params),
        )
        .await
    }

    /// Ask the server to resend the invoice webhook.
    ///
    /// The invoice is fetched first; the notification request is authorized
    /// by the invoice's own token.
    #[tracing::instrument(skip(self))]
    pub async fn request_invoice_notification(&self, invoice_id: &str) -> Result<bool> {
        let invoice = self
            .get_invoice(invoice_id, Facade::Merchant, true)
            .await
            .map_err(|e| NOTIFY.wrap(e))?;
        let token = invoice
            .token
            .ok_or_else(|| NOTIFY.request_error(MissingResourceToken("Invoice")))?;
        self.request_invoice_notification_with_token(invoice_id, &token)
            .await
    }

    /// Ask the server to resend the invoice webhook, authorized by `token`.
    #[tracing::instrument(skip(self, token))]
    pub async fn request_invoice_notification_with_token(
        &self,
        invoice_id: &str,
        token: &str,
    ) -> Result<bool> {
        let params = Params::new().with("token", token);
        self.call_status(
            NOTIFY,
            ApiRequest::post(["invoices", invoice_id, "notifications"], params),
        )
        .await
    }
}
