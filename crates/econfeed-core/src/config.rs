use url::Url;

use crate::credential::Credential;
use crate::ValidationError;

pub const DEFAULT_BASE_URL: &str = "https://api.tradingeconomics.com";
pub const DEFAULT_STREAM_URL: &str = "wss://stream.tradingeconomics.com/";

pub const BASE_URL_ENV: &str = "ECONFEED_BASE_URL";
pub const STREAM_URL_ENV: &str = "ECONFEED_STREAM_URL";
pub const API_KEY_ENV: &str = "ECONFEED_API_KEY";

/// Connection settings for a [`crate::Client`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    stream_url: String,
    credential: Option<Credential>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            stream_url: String::from(DEFAULT_STREAM_URL),
            credential: None,
        }
    }
}

impl ClientConfig {
    /// Read origins and credential from the environment, falling back to defaults.
    /// Empty variables count as unset.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();
        if let Some(base_url) = read(BASE_URL_ENV) {
            config = config.with_base_url(&base_url)?;
        }
        if let Some(stream_url) = read(STREAM_URL_ENV) {
            config.stream_url = stream_url;
        }
        if let Some(key) = read(API_KEY_ENV) {
            config.credential = Some(Credential::parse(&key)?);
        }
        Ok(config)
    }

    /// Override the API origin. Must be an absolute http(s) URL; a trailing `/` is dropped.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidBaseUrl {
            value: base_url.to_owned(),
        };
        let parsed = Url::parse(base_url).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(invalid());
        }
        self.base_url = base_url.trim_end_matches('/').to_owned();
        Ok(self)
    }

    pub fn with_stream_url(mut self, stream_url: impl Into<String>) -> Self {
        self.stream_url = stream_url.into();
        self
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn without_credential(mut self) -> Self {
        self.credential = None;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}
