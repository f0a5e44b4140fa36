//! Client configuration.
//!
//! Holds the base URL and the default headers sent with every request.
//! Partner credentials live here because they identify the integrating
//! server, not the logged-in user.

use std::time::Duration;

use crate::error::ConfigError;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.lifeplusbd.com/api/v2";

/// Header carrying the partner identifier.
pub const PARTNER_ID_HEADER: &str = "X-Partner-ID";

/// Header carrying the partner API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

pub const ENV_BASE_URL: &str = "LIFEPLUS_BASE_URL";
pub const ENV_PARTNER_ID: &str = "LIFEPLUS_PARTNER_ID";
pub const ENV_API_KEY: &str = "LIFEPLUS_API_KEY";

/// Base URL and default headers for one client instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    base_url: String,
    default_headers: Vec<(String, String)>,
    user_agent: String,
    timeout: Option<Duration>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Configuration {
    /// Trailing slashes are stripped so endpoint paths can be appended as-is.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers: Vec::new(),
            user_agent: format!("lifeplus-rust-sdk/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
        }
    }

    /// Build from `LIFEPLUS_BASE_URL`, `LIFEPLUS_PARTNER_ID` and
    /// `LIFEPLUS_API_KEY`. Partner headers are only set when both are present.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Configuration::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url);
        if let (Some(partner_id), Some(api_key)) = (lookup(ENV_PARTNER_ID), lookup(ENV_API_KEY)) {
            config.set_partner_credentials(&partner_id, &api_key);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Overall deadline per request. `None` waits indefinitely.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    pub fn default_header(&self, name: &str) -> Option<&str> {
        self.default_headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set a header sent with every request. An existing header with the same
    /// name (case-insensitive) is replaced in place.
    pub fn add_default_header(&mut self, name: &str, value: &str) {
        match self
            .default_headers
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.default_headers.push((name.to_string(), value.to_string())),
        }
    }

    pub fn set_partner_credentials(&mut self, partner_id: &str, api_key: &str) {
        self.add_default_header(PARTNER_ID_HEADER, partner_id);
        self.add_default_header(API_KEY_HEADER, api_key);
    }

    #[must_use]
    pub fn with_default_header(mut self, name: &str, value: &str) -> Self {
        self.add_default_header(name, value);
        self
    }

    #[must_use]
    pub fn with_partner_credentials(mut self, partner_id: &str, api_key: &str) -> Self {
        self.set_partner_credentials(partner_id, api_key);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::UnsupportedScheme(self.base_url.clone()));
        }
        Ok(())
    }
}
