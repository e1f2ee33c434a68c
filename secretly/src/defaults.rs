//! Default values and recognised metadata keys.
//!
//! These are plain constants: nothing in the crate mutates defaults at
//! runtime. Callers that need a different default version apply
//! [`crate::with_default_version`] instead.

use crate::SecretType;

/// Secret type used when a field carries no `type` key.
pub const DEFAULT_TYPE: SecretType = SecretType::Text;

/// Sentinel version used when a field carries no `version` key.
///
/// Providers translate it to their own notion of "current" or "latest".
pub const DEFAULT_VERSION: &str = "0";

/// Metadata key excluding a field from the walk.
pub const TAG_IGNORED: &str = "ignored";
/// Metadata key selecting the map key inside a JSON or YAML secret.
pub const TAG_KEY: &str = "key";
/// Metadata key overriding the secret name.
pub const TAG_NAME: &str = "name";
/// Metadata key enabling case segmentation of default names.
pub const TAG_SPLIT_WORDS: &str = "split_words";
/// Metadata key selecting the secret type.
pub const TAG_TYPE: &str = "type";
/// Metadata key selecting the secret version.
pub const TAG_VERSION: &str = "version";
