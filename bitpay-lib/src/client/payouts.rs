use super::invoices::format_date;
use super::{Client, Op};
use crate::errors::ErrorCategory;
use crate::models::{Payout, PayoutBatch, PayoutQuery};
use crate::params::Params;
use crate::tokens::Facade;
use crate::transport::ApiRequest;
use crate::Result;

const CREATE: Op = Op::new(ErrorCategory::PayoutCreation, "Payout");
const QUERY: Op = Op::new(ErrorCategory::PayoutQuery, "Payout");
const CANCEL: Op = Op::new(ErrorCategory::PayoutCancellation, "Payout");
const NOTIFY: Op = Op::new(ErrorCategory::PayoutNotification, "Payout");

const BATCH_CREATE: Op = Op::new(ErrorCategory::PayoutBatchCreation, "PayoutBatch");
const BATCH_QUERY: Op = Op::new(ErrorCategory::PayoutBatchQuery, "PayoutBatch");
const BATCH_CANCEL: Op = Op::new(ErrorCategory::PayoutBatchCancellation, "PayoutBatch");
const BATCH_NOTIFY: Op = Op::new(ErrorCategory::PayoutBatchNotification, "PayoutBatch");

fn query_params(token: String, query: &PayoutQuery, with_reference: bool) -> Params {
    let mut params = Params::new().with("token", token);
    params.insert_opt("startDate", query.start_date.map(format_date));
    params.insert_opt("endDate", query.end_date.map(format_date));
    params.insert_opt("status", query.status.clone());
    if with_reference {
        params.insert_opt("reference", query.reference.clone());
    }
    params.insert_opt("limit", query.limit);
    params.insert_opt("offset", query.offset);
    params
}

impl Client {
    /// Decimal places used for amounts in `currency`.
    fn precision_of(&self, currency: Option<&str>) -> u32 {
        match currency {
            Some(code) => self.currencies.precision(code),
            None => crate::models::DEFAULT_PRECISION,
        }
    }

    /// Submit a payout. The amount is rounded to the precision of its
    /// currency first.
    #[tracing::instrument(skip(self, payout))]
    pub async fn submit_payout(&self, mut payout: Payout) -> Result<Payout> {
        payout.token = Some(self.token(CREATE, Facade::Payout)?);
        payout.format_amount(self.precision_of(payout.currency.as_deref()));
        let params = self.params_from(CREATE, &payout)?;
        self.call(CREATE, ApiRequest::post("payouts", params)).await
    }

    /// Retrieve a payout by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_payout(&self, payout_id: &str) -> Result<Payout> {
        let params = Params::new().with("token", self.token(QUERY, Facade::Payout)?);
        self.call(QUERY, ApiRequest::get(["payouts", payout_id], params))
            .await
    }

    /// List payouts matching `query`.
    #[tracing::instrument(skip(self))]
    pub async fn get_payouts(&self, query: &PayoutQuery) -> Result<Vec<Payout>> {
        let params = query_params(self.token(QUERY, Facade::Payout)?, query, true);
        self.call(QUERY, ApiRequest::get("payouts", params)).await
    }

    /// Cancel a payout.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_payout(&self, payout_id: &str) -> Result<bool> {
        let params = Params::new().with("token", self.token(CANCEL, Facade::Payout)?);
        self.call_status(
            CANCEL,
            ApiRequest::delete(["payouts", payout_id], params),
        )
        .await
    }

    /// Ask the server to resend the payout webhook.
    #[tracing::instrument(skip(self))]
    pub async fn request_payout_notification(&self, payout_id: &str) -> Result<bool> {
        let params = Params::new().with("token", self.token(NOTIFY, Facade::Payout)?);
        self.call_status(
            NOTIFY,
            ApiRequest::post(["payouts", payout_id, "notifications"], params),
        )
        .await
    }

    /// Submit a payout batch. The batch amount and every instruction amount
    /// are rounded to the precision of the batch currency first.
    #[tracing::instrument(skip(self, batch))]
    pub async fn submit_payout_batch(&self, mut batch: PayoutBatch) -> Result<PayoutBatch> {
        batch.token = Some(self.token(BATCH_CREATE, Facade::Payout)?);
        batch.format_amount(self.precision_of(batch.currency.as_deref()));
        let params = self.params_from(BATCH_CREATE, &batch)?;
        self.call(BATCH_CREATE, ApiRequest::post("payoutBatches", params))
            .await
    }

    /// Retrieve a payout batch by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_payout_batch(&self, batch_id: &str) -> Result<PayoutBatch> {
        let params = Params::new().with("token", self.token(BATCH_QUERY, Facade::Payout)?);
        self.call(
            BATCH_QUERY,
            ApiRequest::get(["payoutBatches", batch_id], params),
        )
        .await
    }

    /// List payout batches matching `query`.
    #[tracing::instrument(skip(self))]
    pub async fn get_payout_batches(&self, query: &PayoutQuery) -> Result<Vec<PayoutBatch>> {
        let params = query_params(self.token(BATCH_QUERY, Facade::Payout)?, query, false);
        self.call(BATCH_QUERY, ApiRequest::get("payoutBatches", params))
            .await
    }

    /// Cancel a payout batch.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_payout_batch(&self, batch_id: &str) -> Result<bool> {
        let params = Params::new().with("token", self.token(BATCH_CANCEL, Facade::Payout)?);
        self.call_status(
            BATCH_CANCEL,
            ApiRequest::delete(["payoutBatches", batch_id], params),
        )
        .await
    }

    /// Ask the server to resend the payout batch webhook.
    #[tracing::instrument(skip(self))]
    pub async fn request_payout_batch_notification(&self, batch_id: &str) -> Result<bool> {
        let params = Params::new().with("token", self.token(BATCH_NOTIFY, Facade::Payout)?);
        self.call_status(
            BATCH_NOTIFY,
            ApiRequest::post(["payoutBatches", batch_id, "notifications"], params),
        )
        .await
    }
}
