//! Override transforms applied to descriptors after the walk.
//!
//! Each [`ProcessOption`] receives the full descriptor list and edits it in
//! place. Options run in the order given, so a later option overrides an
//! earlier one wherever both match.

mod env;
mod patch;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::defaults::DEFAULT_VERSION;
use crate::{Field, SecretlyError, SecretlyResult};

pub use env::with_versions_from_env;
pub use patch::{with_patch, with_patch_file};

type Transform = dyn Fn(&mut [Field<'_>]) -> SecretlyResult<()> + Send + Sync;

/// A labelled transform over the descriptor list.
///
/// Cloning is cheap; clones share the transform.
#[derive(Clone)]
pub struct ProcessOption {
    label: &'static str,
    apply: Arc<Transform>,
}

impl ProcessOption {
    /// Wrap a caller-defined transform.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretly::ProcessOption;
    ///
    /// let pin = ProcessOption::new("pin", |fields| {
    ///     for field in fields {
    ///         field.spec_mut().secret_version = "7".into();
    ///     }
    ///     Ok(())
    /// });
    /// assert_eq!(pin.label(), "pin");
    /// ```
    #[must_use]
    pub fn new<F>(label: &'static str, apply: F) -> Self
    where
        F: Fn(&mut [Field<'_>]) -> SecretlyResult<()> + Send + Sync + 'static,
    {
        Self {
            label,
            apply: Arc::new(apply),
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Run the transform.
    ///
    /// # Errors
    ///
    /// Propagates the transform's error.
    pub fn apply(&self, fields: &mut [Field<'_>]) -> SecretlyResult<()> {
        debug!(option = self.label, fields = fields.len(), "applying option");
        (self.apply)(fields)
    }
}

impl fmt::Debug for ProcessOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessOption")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Replace the default version sentinel with `version`.
///
/// Use this to map unversioned fields onto a backend alias such as
/// `latest` or `AWSCURRENT`. Fields with an explicit version are untouched.
///
/// An empty `version` is rejected with [`SecretlyError::InvalidSecretVersion`]
/// when the option is applied.
#[must_use]
pub fn with_default_version(version: impl Into<String>) -> ProcessOption {
    let version = version.into();
    ProcessOption::new("default_version", move |fields| {
        if version.is_empty() {
            return Err(SecretlyError::InvalidSecretVersion {
                version: version.clone(),
            });
        }
        for field in fields
            .iter_mut()
            .filter(|field| field.secret_version() == DEFAULT_VERSION)
        {
            version.clone_into(&mut field.spec_mut().secret_version);
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests;
