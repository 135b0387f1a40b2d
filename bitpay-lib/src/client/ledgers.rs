use chrono::NaiveDate;

use super::invoices::format_date;
use super::{Client, Op};
use crate::errors::ErrorCategory;
use crate::models::{Ledger, LedgerEntry};
use crate::params::Params;
use crate::tokens::Facade;
use crate::transport::ApiRequest;
use crate::Result;

const QUERY: Op = Op::new(ErrorCategory::LedgerQuery, "Ledger");

impl Client {
    /// Ledger entries of `currency` between `start` and `end`.
    #[tracing::instrument(skip(self))]
    pub async fn get_ledger(
        &self,
        currency: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerEntry>> {
        let params = Params::new()
            .with("token", self.token(QUERY, Facade::Merchant)?)
            .with("currency", currency)
            .with("startDate", format_date(start))
            .with("endDate", format_date(end));
        self.call(QUERY, ApiRequest::get(["ledgers", currency], params))
            .await
    }

    /// Balances of every ledger currency.
    #[tracing::instrument(skip(self))]
    pub async fn get_ledgers(&self) -> Result<Vec<Ledger>> {
        let params = Params::new().with("token", self.token(QUERY, Facade::Merchant)?);
        self.call(QUERY, ApiRequest::get("ledgers", params)).await
    }
}
