use super::invoices::format_date;
use super::{Client, MissingResourceToken, Op};
use crate::errors::ErrorCategory;
use crate::models::{Settlement, SettlementQuery};
use crate::params::Params;
use crate::tokens::Facade;
use crate::transport::ApiRequest;
use crate::Result;

const QUERY: Op = Op::new(ErrorCategory::SettlementQuery, "Settlement");

impl Client {
    /// List settlements matching `query`.
    #[tracing::instrument(skip(self))]
    pub async fn get_settlements(&self, query: &SettlementQuery) -> Result<Vec<Settlement>> {
        let params = Params::new()
            .with("token", self.token(QUERY, Facade::Merchant)?)
            .with("dateStart", format_date(query.date_start))
            .with("dateEnd", format_date(query.date_end))
            .with("currency", query.currency.as_str())
            .with("status", query.status.clone().unwrap_or_default())
            .with("limit", query.limit.to_string())
            .with("offset", query.offset.to_string());
        self.call(QUERY, ApiRequest::get("settlements", params)).await
    }

    /// Retrieve a settlement by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_settlement(&self, settlement_id: &str) -> Result<Settlement> {
        let params = Params::new().with("token", self.token(QUERY, Facade::Merchant)?);
        self.call(
            QUERY,
            ApiRequest::get(["settlements", settlement_id], params),
        )
        .await
    }

    /// Retrieve the reconciliation report of a settlement previously fetched
    /// with [`Client::get_settlement`], authorized by the settlement's token.
    #[tracing::instrument(skip(self, settlement), fields(settlement_id = ?settlement.id))]
    pub async fn get_settlement_reconciliation_report(
        &self,
        settlement: &Settlement,
    ) -> Result<Settlement> {
        let (Some(id), Some(token)) = (&settlement.id, &settlement.token) else {
            return Err(QUERY.request_error(MissingResourceToken("Settlement")));
        };
        let params = Params::new().with("token", token.as_str());
        self.call(
            QUERY,
            ApiRequest::get(["settlements", id.as_str(), "reconciliationReport"], params),
        )
        .await
    }
}
