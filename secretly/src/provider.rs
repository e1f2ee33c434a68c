//! The contract backends implement to supply secret content.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a [`SecretProvider`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// The backend has no secret at this name and version.
    #[error("secret {name:?} not found at version {version:?}")]
    NotFound {
        /// Requested secret.
        name: String,
        /// Requested version.
        version: String,
    },

    /// Any other backend failure.
    #[error(transparent)]
    Backend(Box<dyn Error + Send + Sync>),
}

impl ProviderError {
    /// Wrap a backend error.
    #[must_use]
    pub fn backend(source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Backend(source.into())
    }
}

/// Resolves a named secret at a version to its content.
///
/// The default version is `"0"`; providers translate it, and any other
/// alias, into their backend's notion of a revision.
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Fetch the content of `name` at `version`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the backend cannot supply the
    /// secret. The error reaches the caller unchanged.
    async fn fetch(&self, name: &str, version: &str) -> Result<Vec<u8>, ProviderError>;
}

#[async_trait]
impl<P: SecretProvider + ?Sized> SecretProvider for std::sync::Arc<P> {
    async fn fetch(&self, name: &str, version: &str) -> Result<Vec<u8>, ProviderError> {
        (**self).fetch(name, version).await
    }
}

/// Provider serving secrets from memory, for tests and local development.
///
/// # Examples
///
/// ```
/// use secretly::MemoryProvider;
///
/// let provider = MemoryProvider::new()
///     .with_secret("ServiceIntegrationToken", "0", "tok-value")
///     .with_secret("Database_Credentials", "0", "Password: p\n");
/// assert_eq!(provider.len(), 2);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryProvider {
    secrets: HashMap<(String, String), Vec<u8>>,
}

impl MemoryProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `content` under `name` and `version`.
    #[must_use]
    pub fn with_secret(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(name, version, content);
        self
    }

    /// Add or replace `content` under `name` and `version`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) {
        self.secrets
            .insert((name.into(), version.into()), content.into());
    }

    /// Number of stored secrets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Whether no secrets are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

#[async_trait]
impl SecretProvider for MemoryProvider {
    async fn fetch(&self, name: &str, version: &str) -> Result<Vec<u8>, ProviderError> {
        self.secrets
            .get(&(name.to_owned(), version.to_owned()))
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                name: name.to_owned(),
                version: version.to_owned(),
            })
    }
}

/// Adapts a synchronous function into a provider.
///
/// # Examples
///
/// ```
/// use secretly::{FnProvider, ProviderError};
///
/// let provider = FnProvider::new(|name: &str, version: &str| {
///     Ok::<_, ProviderError>(format!("{name}@{version}").into_bytes())
/// });
/// # let _ = provider;
/// ```
pub struct FnProvider<F> {
    fetch: F,
}

impl<F> FnProvider<F>
where
    F: Fn(&str, &str) -> Result<Vec<u8>, ProviderError> + Send + Sync,
{
    /// Wrap `fetch`.
    #[must_use]
    pub const fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<F> fmt::Debug for FnProvider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProvider").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F> SecretProvider for FnProvider<F>
where
    F: Fn(&str, &str) -> Result<Vec<u8>, ProviderError> + Send + Sync,
{
    async fn fetch(&self, name: &str, version: &str) -> Result<Vec<u8>, ProviderError> {
        (self.fetch)(name, version)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};

    use super::*;

    #[tokio::test]
    async fn memory_provider_serves_by_name_and_version() -> Result<()> {
        let provider = MemoryProvider::new().with_secret("token", "0", "tok-value");
        ensure!(provider.fetch("token", "0").await? == b"tok-value");
        let missing = provider.fetch("token", "1").await;
        ensure!(
            matches!(missing, Err(ProviderError::NotFound { ref version, .. }) if version == "1"),
            "unexpected result: {missing:?}"
        );
        Ok(())
    }

    #[tokio::test]
    async fn fn_provider_calls_through() -> Result<()> {
        let provider = FnProvider::new(|name: &str, version: &str| {
            if name == "down" {
                return Err(ProviderError::backend("backend unavailable"));
            }
            Ok(format!("{name}@{version}").into_bytes())
        });
        ensure!(provider.fetch("db", "3").await? == b"db@3");
        let err = provider.fetch("down", "0").await.err();
        ensure!(
            err.as_ref().map(ToString::to_string).as_deref() == Some("backend unavailable"),
            "unexpected error: {err:?}"
        );
        Ok(())
    }
}
