//! Resolution: walk, apply overrides, fetch and decode.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    Bind, Field, ProcessOption, SecretCache, SecretProvider, SecretlyError, SecretlyResult,
    decode, walk,
};

/// Controls applied to every fetch of one resolution.
#[derive(Debug, Clone, Default)]
pub struct ProcessContext {
    /// Cancelling this token aborts the outstanding fetch and the remaining
    /// fields.
    pub cancel: CancellationToken,
    /// Upper bound on each individual fetch.
    pub fetch_timeout: Option<Duration>,
}

impl ProcessContext {
    /// A context that observes `cancel`.
    #[must_use]
    pub fn with_cancel(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            fetch_timeout: None,
        }
    }

    /// Limit each fetch to `timeout`.
    #[must_use]
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }
}

/// Walk `spec` and apply `options` in order, returning the descriptors.
///
/// # Errors
///
/// Returns walk errors and the first option error.
pub fn resolve_fields<'a>(
    spec: &'a mut dyn Bind,
    options: &[ProcessOption],
) -> SecretlyResult<Vec<Field<'a>>> {
    let mut fields = walk(spec)?;
    for option in options {
        option.apply(&mut fields)?;
    }
    Ok(fields)
}

/// Resolve every field of `spec` against `provider`, one at a time, in
/// declaration order.
///
/// Content is read from `cache` when present; successful fetches are added
/// to it. Resolution stops at the first error and fields written before it
/// keep their new values.
///
/// # Errors
///
/// Returns walk, option and decode errors, [`SecretlyError::Cancelled`] or
/// [`SecretlyError::Timeout`] for an interrupted fetch, and provider errors
/// unchanged as [`SecretlyError::Provider`].
///
/// # Examples
///
/// ```
/// use secretly::{MemoryProvider, NoOpCache, ProcessContext, Secrets, process};
///
/// #[derive(Default, Secrets)]
/// struct Spec {
///     service_integration_token: String,
/// }
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build()?.block_on(async {
/// let provider = MemoryProvider::new().with_secret("ServiceIntegrationToken", "0", "tok-value");
/// let mut spec = Spec::default();
/// process(&provider, &NoOpCache, &mut spec, &[], &ProcessContext::default()).await?;
/// assert_eq!(spec.service_integration_token, "tok-value");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # })?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub async fn process(
    provider: &dyn SecretProvider,
    cache: &dyn SecretCache,
    spec: &mut dyn Bind,
    options: &[ProcessOption],
    ctx: &ProcessContext,
) -> SecretlyResult<()> {
    let mut fields = resolve_fields(spec, options)?;
    for field in &mut fields {
        let content =
            fetch_cached(provider, cache, field.secret_name(), field.secret_version(), ctx).await?;
        decode(field, &content)?;
        debug!(field = field.field_name(), secret = field.secret_name(), "field resolved");
    }
    Ok(())
}

/// Read `name` at `version` from `cache`, fetching and caching it on a miss.
pub(crate) async fn fetch_cached(
    provider: &dyn SecretProvider,
    cache: &dyn SecretCache,
    name: &str,
    version: &str,
    ctx: &ProcessContext,
) -> SecretlyResult<Vec<u8>> {
    if let Some(content) = cache.get(name, version) {
        debug!(secret = name, version, "cache hit");
        return Ok(content);
    }
    debug!(secret = name, version, "cache miss");
    let content = fetch(provider, name, version, ctx).await?;
    cache.add(name, version, content.clone());
    Ok(content)
}

async fn fetch(
    provider: &dyn SecretProvider,
    name: &str,
    version: &str,
    ctx: &ProcessContext,
) -> SecretlyResult<Vec<u8>> {
    let request = async {
        match ctx.fetch_timeout {
            Some(after) => match tokio::time::timeout(after, provider.fetch(name, version)).await {
                Ok(result) => result.map_err(SecretlyError::from),
                Err(_) => Err(SecretlyError::Timeout {
                    name: name.to_owned(),
                    version: version.to_owned(),
                    after,
                }),
            },
            None => provider.fetch(name, version).await.map_err(SecretlyError::from),
        }
    };
    tokio::select! {
        biased;
        () = ctx.cancel.cancelled() => Err(SecretlyError::Cancelled {
            name: name.to_owned(),
            version: version.to_owned(),
        }),
        result = request => result,
    }
}
