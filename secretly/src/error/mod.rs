//! Error types produced while resolving secrets.

mod constructors;
mod conversions;
mod types;

pub(crate) use constructors::INLINE_ORIGIN;
pub use types::{ConvertError, SecretlyError, TagError};

/// Result alias used throughout the crate.
pub type SecretlyResult<T> = Result<T, SecretlyError>;
