//! A provider bundled with its cache and settings.

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::defaults::DEFAULT_VERSION;
use crate::process::fetch_cached;
use crate::{
    Bind, ClientConfig, MemoryCache, NoOpCache, ProcessContext, ProcessOption, SecretCache,
    SecretProvider, SecretlyResult, process, with_default_version,
};

/// Resolves records against one provider, reusing a cache across calls.
///
/// # Examples
///
/// ```
/// use secretly::{Client, MemoryProvider, Secrets};
///
/// #[derive(Default, Secrets)]
/// struct Spec {
///     #[secretly(type = "yaml", key = "Password", split_words)]
///     database_credentials: String,
/// }
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build()?.block_on(async {
/// let provider = MemoryProvider::new()
///     .with_secret("Database_Credentials", "0", "Username: u\nPassword: p\n");
/// let client = Client::new(provider);
/// let mut spec = Spec::default();
/// client.process(&mut spec, &[]).await?;
/// assert_eq!(spec.database_credentials, "p");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # })?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Client<P> {
    provider: P,
    cache: Arc<dyn SecretCache>,
    config: ClientConfig,
}

impl<P: fmt::Debug> fmt::Debug for Client<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("provider", &self.provider)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<P: SecretProvider> Client<P> {
    /// Wrap `provider` with an in-memory cache and default settings.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cache: Arc::new(MemoryCache::new()),
            config: ClientConfig::default(),
        }
    }

    /// Wrap `provider` using `config`.
    ///
    /// A disabled cache becomes [`NoOpCache`].
    #[must_use]
    pub fn with_config(provider: P, config: &ClientConfig) -> Self {
        let cache: Arc<dyn SecretCache> = if config.disable_caching {
            Arc::new(NoOpCache)
        } else {
            Arc::new(MemoryCache::new())
        };
        Self {
            provider,
            cache,
            config: config.clone(),
        }
    }

    /// Replace the cache, for example to share one between clients.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn SecretCache>) -> Self {
        self.cache = cache;
        self
    }

    /// The wrapped provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve every field of `spec`.
    ///
    /// A configured default version is applied before `options`, which then
    /// see fields already moved off the `"0"` sentinel.
    ///
    /// # Errors
    ///
    /// See [`process`].
    pub async fn process(&self, spec: &mut dyn Bind, options: &[ProcessOption]) -> SecretlyResult<()> {
        self.process_with_cancel(spec, options, CancellationToken::new())
            .await
    }

    /// Like [`Client::process`], aborting when `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`process`].
    pub async fn process_with_cancel(
        &self,
        spec: &mut dyn Bind,
        options: &[ProcessOption],
        cancel: CancellationToken,
    ) -> SecretlyResult<()> {
        let ctx = ProcessContext {
            cancel,
            fetch_timeout: self.config.fetch_timeout(),
        };
        match &self.config.default_version {
            Some(version) => {
                let mut chain = Vec::with_capacity(options.len() + 1);
                chain.push(with_default_version(version.clone()));
                chain.extend_from_slice(options);
                process(&self.provider, self.cache.as_ref(), spec, &chain, &ctx).await
            }
            None => process(&self.provider, self.cache.as_ref(), spec, options, &ctx).await,
        }
    }

    /// Fetch `name` at the default version, through the cache.
    ///
    /// # Errors
    ///
    /// Returns provider, cancellation and timeout errors.
    pub async fn get_secret(&self, name: &str) -> SecretlyResult<Vec<u8>> {
        let version = self
            .config
            .default_version
            .as_deref()
            .unwrap_or(DEFAULT_VERSION);
        self.get_secret_with_version(name, version).await
    }

    /// Fetch `name` at `version`, through the cache.
    ///
    /// # Errors
    ///
    /// Returns provider, cancellation and timeout errors.
    pub async fn get_secret_with_version(&self, name: &str, version: &str) -> SecretlyResult<Vec<u8>> {
        let ctx = ProcessContext {
            cancel: CancellationToken::new(),
            fetch_timeout: self.config.fetch_timeout(),
        };
        fetch_cached(&self.provider, self.cache.as_ref(), name, version, &ctx).await
    }
}
