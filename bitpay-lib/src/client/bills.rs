use serde_json::Value;

use super::{Client, MissingResourceToken, Op};
use crate::errors::ErrorCategory;
use crate::models::Bill;
use crate::params::Params;
use crate::tokens::Facade;
use crate::transport::ApiRequest;
use crate::Result;

const CREATE: Op = Op::new(ErrorCategory::BillCreation, "Bill");
const QUERY: Op = Op::new(ErrorCategory::BillQuery, "Bill");
const UPDATE: Op = Op::new(ErrorCategory::BillUpdate, "Bill");
const DELIVER: Op = Op::new(ErrorCategory::BillDelivery, "Bill");

impl Client {
    /// Create a bill authorized by the token of `facade`.
    #[tracing::instrument(skip(self, bill))]
    pub async fn create_bill(&self, mut bill: Bill, facade: Facade, sign: bool) -> Result<Bill> {
        bill.token = Some(self.token(CREATE, facade)?);
        let params = self.params_from(CREATE, &bill)?;
        self.call(CREATE, ApiRequest::post("bills", params).signed(sign))
            .await
    }

    /// Retrieve a bill by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_bill(&self, bill_id: &str, facade: Facade, sign: bool) -> Result<Bill> {
        let params = Params::new().with("token", self.token(QUERY, facade)?);
        self.call(
            QUERY,
            ApiRequest::get(["bills", bill_id], params).signed(sign),
        )
        .await
    }

    /// List bills, optionally only those with `status`.
    #[tracing::instrument(skip(self))]
    pub async fn get_bills(&self, status: Option<&str>) -> Result<Vec<Bill>> {
        let mut params = Params::new().with("token", self.token(QUERY, Facade::Merchant)?);
        params.insert_opt("status", status);
        self.call(QUERY, ApiRequest::get("bills", params)).await
    }

    /// Update a bill.
    ///
    /// The bill is fetched first; the update is authorized by the bill's own
    /// token, not the merchant token.
    #[tracing::instrument(skip(self, bill))]
    pub async fn update_bill(&self, bill: Bill, bill_id: &str) -> Result<Bill> {
        let current = self
            .get_bill(bill_id, Facade::Merchant, true)
            .await
            .map_err(|e| UPDATE.wrap(e))?;
        let token = current
            .token
            .ok_or_else(|| UPDATE.request_error(MissingResourceToken("Bill")))?;
        self.update_bill_with_token(bill, bill_id, &token).await
    }

    /// Update a bill, authorized by `token`.
    #[tracing::instrument(skip(self, bill, token))]
    pub async fn update_bill_with_token(
        &self,
        mut bill: Bill,
        bill_id: &str,
        token: &str,
    ) -> Result<Bill> {
        bill.token = Some(token.to_string());
        let params = self.params_from(UPDATE, &bill)?;
        self.call(UPDATE, ApiRequest::put(["bills", bill_id], params))
            .await
    }

    /// Email a bill to its buyer. Returns the delivery status reported by the
    /// server, e.g. `Success`.
    #[tracing::instrument(skip(self, bill_token))]
    pub async fn deliver_bill(&self, bill_id: &str, bill_token: &str, sign: bool) -> Result<String> {
        let params = Params::new().with("token", bill_token);
        let payload = self
            .send(
                DELIVER,
                ApiRequest::post(["bills", bill_id, "deliveries"], params).signed(sign),
            )
            .await?;
        Ok(match payload {
            Value::String(status) => status,
            other => other.to_string().replace('"', ""),
        })
    }
}
