use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Currency support of a wallet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletCurrency {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p2p: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dapp_browser: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_pro: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_connect: Option<bool>,
}

/// A wallet buyers can pay invoices with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_pro: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currencies: Option<Vec<WalletCurrency>>,
}
