//! Trait-based conversions between external error types and `SecretlyError`.

use figment::Error as FigmentError;

use super::SecretlyError;

impl From<FigmentError> for SecretlyError {
    fn from(e: FigmentError) -> Self {
        Self::Config(Box::new(e))
    }
}
