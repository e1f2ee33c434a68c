//! Primary error enums for secret resolution flows.

use std::path::PathBuf;
use std::time::Duration;

use figment::Error as FigmentError;
use thiserror::Error;

use crate::ProviderError;

/// Errors that can occur while resolving a specification.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SecretlyError {
    /// The value handed to the walker is not a record.
    #[error("invalid specification: expected a mutable reference to a record")]
    InvalidSpecification,

    /// A field's metadata could not be interpreted.
    #[error("field {field:?}: key {key:?}: {source}")]
    Tag {
        /// Declared name of the offending field.
        field: String,
        /// Metadata key that failed.
        key: &'static str,
        /// Underlying metadata failure.
        #[source]
        source: TagError,
    },

    /// A version supplied through an override is unusable.
    #[error("invalid secret version {version:?}: versions must not be empty")]
    InvalidSecretVersion {
        /// Rejected version string.
        version: String,
    },

    /// A `json` secret could not be read as a map of scalars.
    #[error("secret {secret:?} is not valid json: {source}")]
    InvalidJsonSecret {
        /// Secret whose content failed to parse.
        secret: String,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },

    /// A `yaml` secret could not be read as a map of scalars.
    #[error("secret {secret:?} is not valid yaml: {message}")]
    InvalidYamlSecret {
        /// Secret whose content failed to parse.
        secret: String,
        /// Parser failure, rendered.
        message: String,
    },

    /// A map secret does not contain the requested key.
    #[error("secret {secret:?} is missing key {key:?}")]
    SecretMissingKey {
        /// Secret that was searched.
        secret: String,
        /// Key that was not present.
        key: String,
    },

    /// Secret content could not be converted into the field's type.
    #[error("failed to convert secret {secret:?} key {key:?} to {target}: {source}")]
    Convert {
        /// Secret that supplied the content.
        secret: String,
        /// Map key the content came from; empty for text secrets.
        key: String,
        /// Name of the target kind, such as `int16` or `duration`.
        target: &'static str,
        /// Conversion failure.
        #[source]
        source: ConvertError,
    },

    /// A patch file has an extension with no known parser.
    #[error("invalid file type {extension:?} for patch file '{}'", path.display())]
    InvalidFileType {
        /// Path of the patch file.
        path: PathBuf,
        /// Extension that was not recognised; empty when absent.
        extension: String,
    },

    /// A patch document could not be read or parsed.
    #[error("patch error in '{origin}': {source}")]
    Patch {
        /// File path, or `<inline>` for in-memory patches.
        origin: String,
        /// Underlying read or parse failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A patch entry carries an unusable value.
    #[error("patch entry {entry:?}: key {key:?}: {source}")]
    PatchEntry {
        /// Canonical field name the entry targets.
        entry: String,
        /// Entry key that failed.
        key: &'static str,
        /// Underlying metadata failure.
        #[source]
        source: TagError,
    },

    /// Client configuration could not be gathered.
    #[error("failed to load client configuration: {0}")]
    Config(#[source] Box<FigmentError>),

    /// The caller cancelled resolution while a fetch was outstanding.
    #[error("fetching secret {name:?} at version {version:?} was cancelled")]
    Cancelled {
        /// Secret being fetched.
        name: String,
        /// Version being fetched.
        version: String,
    },

    /// A fetch did not complete within the configured limit.
    #[error("fetching secret {name:?} at version {version:?} timed out after {after:?}")]
    Timeout {
        /// Secret being fetched.
        name: String,
        /// Version being fetched.
        version: String,
        /// Limit that elapsed.
        after: Duration,
    },

    /// The provider failed; its error is passed through untouched.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Failures interpreting a single metadata value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TagError {
    /// The `type` value is not one of the supported secret types.
    #[error("invalid secret type {0:?}, expected one of \"text\", \"json\" or \"yaml\"")]
    InvalidSecretType(String),

    /// A `key` was supplied for a secret type without map keys.
    #[error("secret type does not support \"key\"")]
    SecretTypeDoesNotSupportKey,

    /// A value could not be parsed as the type the key expects.
    #[error("invalid struct tag key value {value:?}: expected {expected}")]
    InvalidStructTagValue {
        /// Raw value as written.
        value: String,
        /// Name of the expected type.
        expected: &'static str,
    },

    /// A `version` was supplied but is empty.
    #[error("invalid secret version: version must not be empty")]
    InvalidSecretVersion,
}

/// Failures converting text into a scalar field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The text does not follow the target's syntax.
    #[error("parsing {0:?}: invalid syntax")]
    InvalidSyntax(String),

    /// The text is well formed but does not fit the target.
    #[error("parsing {0:?}: value out of range")]
    OutOfRange(String),

    /// The content is not UTF-8 and cannot become text.
    #[error("content is not valid UTF-8")]
    NotUtf8,
}
