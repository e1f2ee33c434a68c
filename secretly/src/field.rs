//! Field descriptors: how one record field maps to a secret.

use std::fmt;
use std::str::FromStr;

use crate::defaults::{
    DEFAULT_TYPE, DEFAULT_VERSION, TAG_KEY, TAG_NAME, TAG_SPLIT_WORDS, TAG_TYPE,
};
use crate::shape::version_from_tag;
use crate::{FieldMeta, FromTag, Scalar, SecretlyError, SecretlyResult, TagError, split_words};

/// Encoding of a secret's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SecretType {
    /// The content is the value itself.
    #[default]
    Text,
    /// The content is a JSON object; the value sits under a key.
    Json,
    /// The content is a YAML mapping; the value sits under a key.
    Yaml,
}

impl SecretType {
    /// Metadata spelling of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Whether values are drawn from a keyed map.
    #[must_use]
    pub const fn is_map(self) -> bool {
        matches!(self, Self::Json | Self::Yaml)
    }
}

impl fmt::Display for SecretType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecretType {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(TagError::InvalidSecretType(other.to_owned())),
        }
    }
}

impl FromTag for SecretType {
    fn from_tag(raw: &str) -> Result<Self, TagError> {
        raw.parse()
    }
}

/// Resolved metadata for one field.
///
/// Override transforms edit these values between the walk and the fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// How the content is encoded.
    pub secret_type: SecretType,
    /// Name requested from the provider.
    pub secret_name: String,
    /// Version requested from the provider.
    pub secret_version: String,
    /// Key selected inside a map secret; `None` for text secrets.
    pub map_key_name: Option<String>,
    /// Whether default names were case-segmented.
    pub split_words: bool,
}

impl FieldSpec {
    /// Build a validated descriptor from a field's declared name and metadata.
    ///
    /// # Errors
    ///
    /// Returns [`SecretlyError::Tag`] naming the field and key when a value is
    /// invalid, or when `key` is given for a text secret.
    ///
    /// # Examples
    ///
    /// ```
    /// use secretly::{FieldMeta, FieldSpec, SecretType};
    ///
    /// let meta = FieldMeta::new(
    ///     "DatabaseCredentials",
    ///     &[("type", "yaml"), ("key", "Password"), ("split_words", "true")],
    /// );
    /// let spec = FieldSpec::from_meta(&meta)?;
    /// assert_eq!(spec.secret_type, SecretType::Yaml);
    /// assert_eq!(spec.secret_name, "Database_Credentials");
    /// assert_eq!(spec.map_key_name.as_deref(), Some("Password"));
    /// # Ok::<(), secretly::SecretlyError>(())
    /// ```
    pub fn from_meta(meta: &FieldMeta) -> SecretlyResult<Self> {
        let split = meta.parse::<bool>(TAG_SPLIT_WORDS)?.unwrap_or(false);
        let secret_type = meta.parse::<SecretType>(TAG_TYPE)?.unwrap_or(DEFAULT_TYPE);
        let derived = || {
            if split {
                split_words(meta.name())
            } else {
                meta.name().to_owned()
            }
        };

        let secret_name = meta.parse::<String>(TAG_NAME)?.unwrap_or_else(derived);
        let map_key_name = if secret_type.is_map() {
            Some(meta.parse::<String>(TAG_KEY)?.unwrap_or_else(derived))
        } else if meta.contains(TAG_KEY) {
            return Err(SecretlyError::tag(
                meta.name(),
                TAG_KEY,
                TagError::SecretTypeDoesNotSupportKey,
            ));
        } else {
            None
        };
        let secret_version =
            version_from_tag(meta)?.unwrap_or_else(|| DEFAULT_VERSION.to_owned());

        Ok(Self {
            secret_type,
            secret_name,
            secret_version,
            map_key_name,
            split_words: split,
        })
    }

    /// Canonical name used to match overrides.
    ///
    /// Text secrets use the secret name. Map secrets append the key, joined
    /// with `_` when names are split, so two fields drawn from one secret
    /// stay distinct.
    #[must_use]
    pub fn name(&self) -> String {
        match (&self.map_key_name, self.secret_type.is_map()) {
            (Some(key), true) => {
                let separator = if self.split_words { "_" } else { "" };
                format!("{}{separator}{key}", self.secret_name)
            }
            _ => self.secret_name.clone(),
        }
    }
}

/// A descriptor bound to the field it writes into.
pub struct Field<'a> {
    field_name: &'static str,
    spec: FieldSpec,
    slot: &'a mut dyn Scalar,
}

impl<'a> Field<'a> {
    /// Build a field from its metadata and write handle.
    ///
    /// # Errors
    ///
    /// See [`FieldSpec::from_meta`].
    pub fn new(meta: &FieldMeta, slot: &'a mut dyn Scalar) -> SecretlyResult<Self> {
        Ok(Self {
            field_name: meta.name(),
            spec: FieldSpec::from_meta(meta)?,
            slot,
        })
    }

    /// Declared name of the underlying record field.
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        self.field_name
    }

    /// Canonical name; see [`FieldSpec::name`].
    #[must_use]
    pub fn name(&self) -> String {
        self.spec.name()
    }

    /// Resolved metadata.
    #[must_use]
    pub const fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Resolved metadata, for override transforms.
    pub const fn spec_mut(&mut self) -> &mut FieldSpec {
        &mut self.spec
    }

    /// Secret type.
    #[must_use]
    pub const fn secret_type(&self) -> SecretType {
        self.spec.secret_type
    }

    /// Secret name requested from the provider.
    #[must_use]
    pub fn secret_name(&self) -> &str {
        &self.spec.secret_name
    }

    /// Secret version requested from the provider.
    #[must_use]
    pub fn secret_version(&self) -> &str {
        &self.spec.secret_version
    }

    /// Map key for JSON and YAML secrets.
    #[must_use]
    pub fn map_key_name(&self) -> Option<&str> {
        self.spec.map_key_name.as_deref()
    }

    pub(crate) fn slot(&mut self) -> &mut dyn Scalar {
        &mut *self.slot
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("field_name", &self.field_name)
            .field("spec", &self.spec)
            .field("kind", &self.slot.kind())
            .finish()
    }
}
