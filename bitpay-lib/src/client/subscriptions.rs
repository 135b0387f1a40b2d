use super::{Client, MissingResourceToken, Op};
use crate::errors::ErrorCategory;
use crate::models::Subscription;
use crate::params::Params;
use crate::tokens::Facade;
use crate::transport::ApiRequest;
use crate::Result;

const CREATE: Op = Op::new(ErrorCategory::SubscriptionCreation, "Subscription");
const QUERY: Op = Op::new(ErrorCategory::SubscriptionQuery, "Subscription");
const UPDATE: Op = Op::new(ErrorCategory::SubscriptionUpdate, "Subscription");

impl Client {
    /// Create a recurring bill.
    #[tracing::instrument(skip(self, subscription))]
    pub async fn create_subscription(&self, mut subscription: Subscription) -> Result<Subscription> {
        subscription.token = Some(self.token(CREATE, Facade::Merchant)?);
        let params = self.params_from(CREATE, &subscription)?;
        self.call(CREATE, ApiRequest::post("subscriptions", params))
            .await
    }

    /// Retrieve a subscription by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_subscription(&self, subscription_id: &str) -> Result<Subscription> {
        let params = Params::new().with("token", self.token(QUERY, Facade::Merchant)?);
        self.call(
            QUERY,
            ApiRequest::get(["subscriptions", subscription_id], params),
        )
        .await
    }

    /// List subscriptions, optionally only those with `status`.
    #[tracing::instrument(skip(self))]
    pub async fn get_subscriptions(&self, status: Option<&str>) -> Result<Vec<Subscription>> {
        let mut params = Params::new().with("token", self.token(QUERY, Facade::Merchant)?);
        params.insert_opt("status", status);
        self.call(QUERY, ApiRequest::get("subscriptions", params)).await
    }

    /// Update a subscription.
    ///
    /// The subscription is fetched first; the update is authorized by its own
    /// token, not the merchant token.
    #[tracing::instrument(skip(self, subscription))]
    pub async fn update_subscription(
        &self,
        subscription: Subscription,
        subscription_id: &str,
    ) -> Result<Subscription> {
        let current = self
            .get_subscription(subscription_id)
            .await
            .map_err(|e| UPDATE.wrap(e))?;
        let token = current
            .token
            .ok_or_else(|| UPDATE.request_error(MissingResourceToken("Subscription")))?;
        self.update_subscription_with_token(subscription, subscription_id, &token)
            .await
    }

    /// Update a subscription, authorized by `token`.
    #[tracing::instrument(skip(self, subscription, token))]
    pub async fn update_subscription_with_token(
        &self,
        mut subscription: Subscription,
        subscription_id: &str,
        token: &str,
    ) -> Result<Subscription> {
        subscription.token = Some(token.to_string());
        let params = self.params_from(UPDATE, &subscription)?;
        self.call(
            UPDATE,
            ApiRequest::put(["subscriptions", subscription_id], params),
        )
        .await
    }
}
