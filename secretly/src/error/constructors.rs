//! Constructors for the context-carrying `SecretlyError` variants.

use super::{SecretlyError, TagError};

/// Origin label used for patches supplied as bytes.
pub(crate) const INLINE_ORIGIN: &str = "<inline>";

impl SecretlyError {
    /// Wrap a metadata failure with the field and key it came from.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretly::{SecretlyError, TagError};
    /// let err = SecretlyError::tag("Token", "type", TagError::InvalidSecretType("xml".into()));
    /// assert_eq!(
    ///     err.to_string(),
    ///     "field \"Token\": key \"type\": invalid secret type \"xml\", expected one of \"text\", \"json\" or \"yaml\""
    /// );
    /// ```
    #[must_use]
    pub fn tag(field: impl Into<String>, key: &'static str, source: TagError) -> Self {
        Self::Tag {
            field: field.into(),
            key,
            source,
        }
    }

    /// Wrap a read or parse failure for a patch document.
    #[must_use]
    pub fn patch(
        origin: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Patch {
            origin: origin.into(),
            source: source.into(),
        }
    }

    /// Returns the metadata failure when this error came from a field tag
    /// or a patch entry.
    #[must_use]
    pub const fn tag_error(&self) -> Option<&TagError> {
        match self {
            Self::Tag { source, .. } | Self::PatchEntry { source, .. } => Some(source),
            _ => None,
        }
    }
}
