//! Client configuration.
//!
//! A client needs an [`Environment`], an optional private key, the facade
//! tokens and an optional proxy. These come from a configuration file, from
//! environment variables or from code via the `with_*` builders.
//!
//! The configuration file keeps the layout used by the other BitPay SDKs:
//!
//! ```json
//! {
//!   "BitPayConfiguration": {
//!     "Environment": "Test",
//!     "EnvConfig": {
//!       "Test": {
//!         "PrivateKeyPath": "/secure/bitpay.key",
//!         "PrivateKeySecret": "secret",
//!         "ApiTokens": { "merchant": "...", "payout": "..." },
//!         "Proxy": null
//!       }
//!     }
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::identity::{Identity, KeyError};
use crate::tokens::{Facade, TokenStore};

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("config file is neither valid JSON nor YAML: {0}")]
    Parse(String),
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),
    #[error("no configuration section for environment {0}")]
    MissingEnvironment(String),
}

/// BitPay API environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Environment {
    /// Sandbox at test.bitpay.com.
    #[default]
    Test,
    /// Production at bitpay.com.
    Prod,
}

impl Environment {
    /// Base URL of the REST API, with trailing slash.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Test => "https://test.bitpay.com/",
            Self::Prod => "https://bitpay.com/",
        }
    }

    /// Name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "Test",
            Self::Prod => "Prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "test" => Ok(Self::Test),
            "prod" | "production" => Ok(Self::Prod),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Environment> for String {
    fn from(env: Environment) -> Self {
        env.as_str().to_string()
    }
}

/// Where the private key comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum PrivateKeySource {
    /// Hex-encoded key value.
    Hex(String),
    /// Key file, sealed when `secret` is set.
    File {
        path: PathBuf,
        secret: Option<String>,
    },
}

impl PrivateKeySource {
    /// Interpret a configured `PrivateKeyPath` value.
    ///
    /// A value naming an existing file is a key file; anything else is taken
    /// as the hex key itself.
    pub fn from_config_value(value: &str, secret: Option<String>) -> Self {
        let path = Path::new(value);
        if path.is_file() {
            Self::File {
                path: path.to_path_buf(),
                secret,
            }
        } else {
            Self::Hex(value.to_string())
        }
    }

    /// Load the signing identity.
    pub fn load(&self) -> Result<Identity, KeyError> {
        match self {
            Self::Hex(hex) => Identity::from_hex(hex),
            Self::File { path, secret } => Identity::from_file(path, secret.as_deref()),
        }
    }
}

// Never print key material or secrets.
impl fmt::Debug for PrivateKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(_) => f.write_str("Hex(..)"),
            Self::File { path, secret } => f
                .debug_struct("File")
                .field("path", path)
                .field("sealed", &secret.is_some())
                .finish(),
        }
    }
}

/// Everything needed to build a [`Client`](crate::Client).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// API environment.
    pub environment: Environment,

    /// Private key for signed requests. Without one only public endpoints work.
    pub private_key: Option<PrivateKeySource>,

    /// Facade tokens.
    pub tokens: TokenStore,

    /// Optional proxy URL every request is routed through.
    pub proxy: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Overrides the environment's base URL.
    pub base_url: Option<String>,
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Environment::default())
    }
}

impl ClientConfig {
    /// Create a configuration for `environment` with no key and no tokens.
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            private_key: None,
            tokens: TokenStore::new(),
            proxy: None,
            timeout_secs: default_timeout(),
            base_url: None,
        }
    }

    /// Set the private key source.
    pub fn with_private_key(mut self, source: PrivateKeySource) -> Self {
        self.private_key = Some(source);
        self
    }

    /// Add a facade token.
    pub fn with_token(mut self, facade: Facade, token: impl Into<String>) -> Self {
        self.tokens = self.tokens.with_token(facade, token);
        self
    }

    /// Replace all facade tokens.
    pub fn with_tokens(mut self, tokens: TokenStore) -> Self {
        self.tokens = tokens;
        self
    }

    /// Route requests through a proxy.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Send requests to `base_url` instead of the environment's host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Effective base URL, always ending with `/`.
    pub fn api_url(&self) -> String {
        match &self.base_url {
            Some(url) if url.ends_with('/') => url.clone(),
            Some(url) => format!("{}/", url),
            None => self.environment.base_url().to_string(),
        }
    }

    /// Load a configuration file, JSON or YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_str_content(&content)
    }

    /// Parse configuration file content, JSON first, then YAML.
    pub fn from_str_content(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = match serde_json::from_str(content) {
            Ok(file) => file,
            Err(json_err) => serde_yaml::from_str(content).map_err(|yaml_err| {
                ConfigError::Parse(format!("json: {}; yaml: {}", json_err, yaml_err))
            })?,
        };
        file.into_config()
    }

    /// Read the configuration from `BITPAY_*` environment variables.
    ///
    /// Returns `Ok(None)` when `BITPAY_PRIVATE_KEY` is unset.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an explicit variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let Some(key) = var("BITPAY_PRIVATE_KEY") else {
            return Ok(None);
        };
        let environment = match var("BITPAY_ENVIRONMENT") {
            Some(env) => env.parse()?,
            None => Environment::default(),
        };

        let mut config = Self::new(environment).with_private_key(
            PrivateKeySource::from_config_value(&key, var("BITPAY_PRIVATE_KEY_SECRET")),
        );
        for (facade, name) in [
            (Facade::Merchant, "BITPAY_MERCHANT_TOKEN"),
            (Facade::Payout, "BITPAY_PAYOUT_TOKEN"),
            (Facade::Pos, "BITPAY_POS_TOKEN"),
        ] {
            if let Some(token) = var(name) {
                config = config.with_token(facade, token);
            }
        }
        if let Some(proxy) = var("BITPAY_PROXY") {
            config = config.with_proxy(proxy);
        }
        Ok(Some(config))
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(rename = "BitPayConfiguration")]
    bitpay: ConfigRoot,
}

#[derive(Deserialize)]
struct ConfigRoot {
    #[serde(rename = "Environment")]
    environment: Environment,
    #[serde(rename = "EnvConfig", default)]
    env_config: HashMap<String, EnvSection>,
}

#[derive(Deserialize, Default)]
struct EnvSection {
    #[serde(rename = "PrivateKeyPath")]
    private_key_path: Option<String>,
    #[serde(rename = "PrivateKeySecret")]
    private_key_secret: Option<String>,
    #[serde(rename = "ApiTokens", default)]
    api_tokens: HashMap<String, Option<String>>,
    #[serde(rename = "Proxy")]
    proxy: Option<String>,
}

impl ConfigFile {
    fn into_config(self) -> Result<ClientConfig, ConfigError> {
        let environment = self.bitpay.environment;
        let section = self
            .bitpay
            .env_config
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(environment.as_str()))
            .map(|(_, section)| section)
            .ok_or_else(|| ConfigError::MissingEnvironment(environment.to_string()))?;

        let mut config = ClientConfig::new(environment).with_tokens(TokenStore::from_pairs(
            section
                .api_tokens
                .into_iter()
                .filter_map(|(facade, token)| token.map(|t| (facade, t))),
        ));

        let secret = section.private_key_secret.filter(|s| !s.is_empty());
        if let Some(key) = section.private_key_path.filter(|k| !k.is_empty()) {
            config = config.with_private_key(PrivateKeySource::from_config_value(&key, secret));
        }
        if let Some(proxy) = section.proxy.filter(|p| !p.is_empty()) {
            config = config.with_proxy(proxy);
        }
        Ok(config)
    }
}
