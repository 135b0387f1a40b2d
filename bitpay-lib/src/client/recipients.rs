use super::{Client, Op};
use crate::errors::ErrorCategory;
use crate::models::{PayoutRecipient, PayoutRecipients};
use crate::params::Params;
use crate::tokens::Facade;
use crate::transport::ApiRequest;
use crate::Result;

const CREATE: Op = Op::new(ErrorCategory::PayoutRecipientCreation, "PayoutRecipients");
const QUERY: Op = Op::new(ErrorCategory::PayoutRecipientQuery, "PayoutRecipient");
const UPDATE: Op = Op::new(ErrorCategory::PayoutRecipientUpdate, "PayoutRecipient");
const CANCEL: Op = Op::new(ErrorCategory::PayoutRecipientCancellation, "PayoutRecipient");
const NOTIFY: Op = Op::new(ErrorCategory::PayoutRecipientNotification, "PayoutRecipient");

impl Client {
    /// Invite payout recipients.
    #[tracing::instrument(skip(self, recipients))]
    pub async fn submit_payout_recipients(
        &self,
        mut recipients: PayoutRecipients,
    ) -> Result<Vec<PayoutRecipient>> {
        recipients.token = Some(self.token(CREATE, Facade::Payout)?);
        if recipients.guid.is_none() {
            recipients.guid = Some(uuid::Uuid::new_v4().to_string());
        }
        let params = self.params_from(CREATE, &recipients)?;
        self.call(CREATE, ApiRequest::post("recipients", params)).await
    }

    /// Retrieve a payout recipient by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_payout_recipient(&self, recipient_id: &str) -> Result<PayoutRecipient> {
        let params = Params::new().with("token", self.token(QUERY, Facade::Payout)?);
        self.call(
            QUERY,
            ApiRequest::get(["recipients", recipient_id], params),
        )
        .await
    }

    /// List payout recipients, optionally filtered by `status` and paged.
    #[tracing::instrument(skip(self))]
    pub async fn get_payout_recipients(
        &self,
        status: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<PayoutRecipient>> {
        let mut params = Params::new().with("token", self.token(QUERY, Facade::Payout)?);
        params.insert_opt("status", status);
        params.insert_opt("limit", limit);
        params.insert_opt("offset", offset);
        self.call(QUERY, ApiRequest::get("recipients", params)).await
    }

    /// Update a payout recipient.
    #[tracing::instrument(skip(self, recipient))]
    pub async fn update_payout_recipient(
        &self,
        recipient_id: &str,
        mut recipient: PayoutRecipient,
    ) -> Result<PayoutRecipient> {
        recipient.token = Some(self.token(UPDATE, Facade::Payout)?);
        let params = self.params_from(UPDATE, &recipient)?;
        self.call(
            UPDATE,
            ApiRequest::put(["recipients", recipient_id], params),
        )
        .await
    }

    /// Remove a payout recipient.
    #[tracing::instrument(skip(self))]
    pub async fn delete_payout_recipient(&self, recipient_id: &str) -> Result<bool> {
        let params = Params::new().with("token", self.token(CANCEL, Facade::Payout)?);
        self.call_status(
            CANCEL,
            ApiRequest::delete(["recipients", recipient_id], params),
        )
        .await
    }

    /// Ask the server to resend the recipient webhook.
    #[tracing::instrument(skip(self))]
    pub async fn request_payout_recipient_notification(&self, recipient_id: &str) -> Result<bool> {
        let params = Params::new().with("token", self.token(NOTIFY, Facade::Payout)?);
        self.call_status(
            NOTIFY,
            ApiRequest::post(["recipients", recipient_id, "notifications"], params),
        )
        .await
    }
}
