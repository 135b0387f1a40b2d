use serde::{Deserialize, Serialize};

/// A payout recipient, invited by email.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRecipient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "notificationURL", skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopper_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl PayoutRecipient {
    pub fn new(email: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            label: Some(label.into()),
            ..Default::default()
        }
    }
}

/// Recipients invited in a single request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRecipients {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    pub recipients: Vec<PayoutRecipient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl PayoutRecipients {
    pub fn new(recipients: Vec<PayoutRecipient>) -> Self {
        Self {
            guid: None,
            recipients,
            token: None,
        }
    }
}
