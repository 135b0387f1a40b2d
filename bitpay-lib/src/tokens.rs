//! Facade tokens.
//!
//! A facade is a named permission scope; each one is authorized by its own
//! bearer token. The store is filled once when the client is built and is
//! read-only afterwards, so it can be shared across threads without locking.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Permission scope that decides which token authorizes a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facade {
    /// Invoices, bills, refunds, settlements, ledgers, subscriptions.
    Merchant,
    /// Payouts, payout batches and payout recipients.
    Payout,
    /// Point-of-sale invoice and bill creation.
    Pos,
}

impl Facade {
    /// Name used as the key in token configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merchant => "merchant",
            Self::Payout => "payout",
            Self::Pos => "pos",
        }
    }
}

impl fmt::Display for Facade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facade {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "merchant" => Ok(Self::Merchant),
            "payout" => Ok(Self::Payout),
            "pos" => Ok(Self::Pos),
            other => Err(TokenError::UnknownFacade(other.to_string())),
        }
    }
}

/// Token lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("missing token for facade {0}")]
    Missing(String),
    #[error("unknown facade: {0}")]
    UnknownFacade(String),
}

/// Mapping from facade name to bearer token.
///
/// Keys are facade names (`merchant`, `payout`, `pos`); entries the caller
/// never configured resolve to [`TokenError::Missing`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenStore {
    tokens: HashMap<String, String>,
}

impl TokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token for `facade`, replacing any previous one.
    pub fn with_token(mut self, facade: Facade, token: impl Into<String>) -> Self {
        self.tokens.insert(facade.as_str().to_string(), token.into());
        self
    }

    /// Build a store from `(facade name, token)` pairs, e.g. parsed configuration.
    ///
    /// Empty tokens are skipped so that a blank configuration entry behaves
    /// like a missing one.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let tokens = pairs
            .into_iter()
            .map(|(k, v)| (k.into().to_ascii_lowercase(), v.into()))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        Self { tokens }
    }

    /// Resolve the token authorizing `facade`.
    pub fn resolve(&self, facade: Facade) -> Result<&str, TokenError> {
        self.tokens
            .get(facade.as_str())
            .map(String::as_str)
            .ok_or_else(|| TokenError::Missing(facade.as_str().to_string()))
    }

    /// Returns true if a token is configured for `facade`.
    pub fn contains(&self, facade: Facade) -> bool {
        self.tokens.contains_key(facade.as_str())
    }

    /// Number of configured facades.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no facade is configured.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

// Tokens are bearer credentials; only the facade names are printed.
impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut facades: Vec<&str> = self.tokens.keys().map(String::as_str).collect();
        facades.sort_unstable();
        f.debug_struct("TokenStore").field("facades", &facades).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_present_facade() {
        let store = TokenStore::new()
            .with_token(Facade::Merchant, "merchant-token")
            .with_token(Facade::Payout, "payout-token");

        assert_eq!(store.resolve(Facade::Merchant).unwrap(), "merchant-token");
        assert_eq!(store.resolve(Facade::Payout).unwrap(), "payout-token");
    }

    #[test]
    fn test_resolve_missing_facade() {
        let store = TokenStore::new().with_token(Facade::Merchant, "merchant-token");
        let err = store.resolve(Facade::Payout).unwrap_err();
        assert_eq!(err, TokenError::Missing("payout".to_string()));
        assert_eq!(err.to_string(), "missing token for facade payout");
    }

    #[test]
    fn test_from_pairs_skips_empty_tokens() {
        let store = TokenStore::from_pairs([("Merchant", "abc"), ("payout", "")]);
        assert_eq!(store.resolve(Facade::Merchant).unwrap(), "abc");
        assert!(!store.contains(Facade::Payout));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_deserialize_from_config_map() {
        let store: TokenStore =
            serde_json::from_str(r#"{"merchant": "m-1", "payout": "p-1"}"#).unwrap();
        assert_eq!(store.resolve(Facade::Payout).unwrap(), "p-1");
    }

    #[test]
    fn test_debug_hides_tokens() {
        let store = TokenStore::new().with_token(Facade::Merchant, "super-secret");
        let debug = format!("{:?}", store);
        assert!(debug.contains("merchant"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_facade_parse() {
        assert_eq!("POS".parse::<Facade>().unwrap(), Facade::Pos);
        assert!("admin".parse::<Facade>().is_err());
    }
}
