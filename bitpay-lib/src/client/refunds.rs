use super::{Client, Op};
use crate::errors::ErrorCategory;
use crate::models::{Refund, RefundRequest};
use crate::params::Params;
use crate::tokens::Facade;
use crate::transport::ApiRequest;
use crate::Result;

const CREATE: Op = Op::new(ErrorCategory::RefundCreation, "refund");
const QUERY: Op = Op::new(ErrorCategory::RefundQuery, "refund");
const UPDATE: Op = Op::new(ErrorCategory::RefundUpdate, "refund");
const CANCEL: Op = Op::new(ErrorCategory::RefundCancellation, "refund");
const NOTIFY: Op = Op::new(ErrorCategory::RefundNotification, "refund");

impl Client {
    /// Create a refund for a paid invoice.
    #[tracing::instrument(skip(self))]
    pub async fn create_refund(&self, request: &RefundRequest) -> Result<Refund> {
        let amount = serde_json::to_value(request.amount).map_err(|e| CREATE.request_error(e))?;
        let params = Params::new()
            .with("token", self.token(CREATE, Facade::Merchant)?)
            .with("invoiceId", request.invoice_id.as_str())
            .with("amount", amount)
            .with("currency", request.currency.as_str())
            .with("preview", request.preview)
            .with("immediate", request.immediate)
            .with("buyerPaysRefundFee", request.buyer_pays_refund_fee);
        self.call(CREATE, ApiRequest::post("refunds", params)).await
    }

    /// Retrieve a refund by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_refund(&self, refund_id: &str) -> Result<Refund> {
        let params = Params::new().with("token", self.token(QUERY, Facade::Merchant)?);
        self.call(QUERY, ApiRequest::get(["refunds", refund_id], params))
            .await
    }

    /// List the refunds of an invoice.
    #[tracing::instrument(skip(self))]
    pub async fn get_refunds(&self, invoice_id: &str) -> Result<Vec<Refund>> {
        let params = Params::new()
            .with("token", self.token(QUERY, Facade::Merchant)?)
            .with("invoiceId", invoice_id);
        self.call(QUERY, ApiRequest::get("refunds", params)).await
    }

    /// Update the status of a refund.
    #[tracing::instrument(skip(self))]
    pub async fn update_refund(&self, refund_id: &str, status: &str) -> Result<Refund> {
        let params = Params::new()
            .with("token", self.token(UPDATE, Facade::Merchant)?)
            .with("status", status);
        self.call(UPDATE, ApiRequest::put(["refunds", refund_id], params))
            .await
    }

    /// Cancel a refund that has not been sent yet.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_refund(&self, refund_id: &str) -> Result<Refund> {
        let params = Params::new().with("token", self.token(CANCEL, Facade::Merchant)?);
        self.call(
            CANCEL,
            ApiRequest::delete(["refunds", refund_id], params),
        )
        .await
    }

    /// Ask the server to resend the refund webhook.
    #[tracing::instrument(skip(self))]
    pub async fn send_refund_notification(&self, refund_id: &str) -> Result<bool> {
        let params = Params::new().with("token", self.token(NOTIFY, Facade::Merchant)?);
        self.call_status(
            NOTIFY,
            ApiRequest::post(["refunds", refund_id, "notifications"], params),
        )
        .await
    }
}
