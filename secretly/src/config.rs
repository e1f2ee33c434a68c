//! Client configuration.

use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};

use crate::SecretlyResult;

/// Settings for a [`crate::Client`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Skip the cache so every resolution fetches afresh.
    pub disable_caching: bool,
    /// Version applied to fields still on the default sentinel.
    pub default_version: Option<String>,
    /// Upper bound on each fetch, in milliseconds.
    pub fetch_timeout_ms: Option<u64>,
}

impl ClientConfig {
    /// Layer environment variables named `{prefix}DISABLE_CACHING`,
    /// `{prefix}DEFAULT_VERSION` and `{prefix}FETCH_TIMEOUT_MS` over the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SecretlyError::Config`] when a variable holds a
    /// value of the wrong type.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretly::ClientConfig;
    ///
    /// let config = ClientConfig::load_from_env("SECRETLY_DOCTEST_UNSET_")?;
    /// assert_eq!(config, ClientConfig::default());
    /// # Ok::<(), secretly::SecretlyError>(())
    /// ```
    pub fn load_from_env(prefix: &str) -> SecretlyResult<Self> {
        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(prefix))
            .extract()?;
        Ok(config)
    }

    /// The fetch timeout as a [`Duration`].
    #[must_use]
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }
}
