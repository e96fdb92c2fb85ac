//! Client configuration.

use crate::defaults;
use crate::error::Result;
use std::time::Duration;
use url::Url;

/// Configuration for the weathered client.
///
/// Always fully populated; [`Default`] supplies every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// `User-Agent` header sent on every request
    pub user_agent: String,
    /// Root of the API, e.g. `https://api.weather.gov`
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: defaults::USER_AGENT.to_string(),
            base_url: defaults::BASE_URL.parse().expect("default base URL is valid"),
            timeout: defaults::TIMEOUT,
        }
    }
}

impl ClientOptions {
    /// Create options pointing at the given base URL
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            base_url,
            ..Default::default()
        })
    }

    /// Set custom user agent
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Shallow-merge `update` into these options.
    ///
    /// Fields left as `None` in the update keep their current value.
    pub fn merge(&mut self, update: OptionsUpdate) {
        if let Some(user_agent) = update.user_agent {
            self.user_agent = user_agent;
        }
        if let Some(base_url) = update.base_url {
            self.base_url = base_url;
        }
        if let Some(timeout) = update.timeout {
            self.timeout = timeout;
        }
    }
}

/// Partial set of options applied with [`Client::set_options`](crate::Client::set_options).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsUpdate {
    /// Replacement user agent
    pub user_agent: Option<String>,
    /// Replacement base URL
    pub base_url: Option<Url>,
    /// Replacement timeout
    pub timeout: Option<Duration>,
}

impl OptionsUpdate {
    /// An update that changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the user agent
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Replace the base URL
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Replace the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
