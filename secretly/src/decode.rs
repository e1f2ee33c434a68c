//! Writes fetched secret content into fields.

use std::collections::BTreeMap;

use serde_json::value::RawValue;
use tracing::debug;

use crate::{ConvertError, Field, SecretType, SecretlyError, SecretlyResult, yaml};

type SecretMap = BTreeMap<String, String>;

/// Read a JSON object of scalars, keeping each value's text as written.
///
/// Strings are unescaped. Numbers and booleans keep their source spelling,
/// so `1.10` stays `1.10`. Objects, arrays and null are rejected.
fn json_map(content: &[u8]) -> Result<SecretMap, serde_json::Error> {
    let raw: BTreeMap<String, Box<RawValue>> = serde_json::from_slice(content)?;
    raw.into_iter()
        .map(|(key, value)| json_scalar(&value).map(|text| (key, text)))
        .collect()
}

fn json_scalar(value: &RawValue) -> Result<String, serde_json::Error> {
    let text = value.get();
    match text.as_bytes().first() {
        Some(b'"') => serde_json::from_str(text),
        Some(b'{' | b'[' | b'n') | None => Err(serde::de::Error::custom(format_args!(
            "expected a string, number or boolean, found {text}"
        ))),
        Some(_) => Ok(text.to_owned()),
    }
}

/// Decode `content` into `field` according to its secret type.
///
/// # Errors
///
/// Returns [`SecretlyError::InvalidJsonSecret`] or
/// [`SecretlyError::InvalidYamlSecret`] for malformed map secrets,
/// [`SecretlyError::SecretMissingKey`] when the key is absent, and
/// [`SecretlyError::Convert`] when the value does not fit the field.
pub fn decode(field: &mut Field<'_>, content: &[u8]) -> SecretlyResult<()> {
    match field.secret_type() {
        SecretType::Text => set_text(field, content, ""),
        SecretType::Json => {
            let map = json_map(content).map_err(|source| SecretlyError::InvalidJsonSecret {
                secret: field.secret_name().to_owned(),
                source,
            })?;
            set_from_map(field, map)
        }
        SecretType::Yaml => {
            let map: SecretMap =
                yaml::from_slice(content).map_err(|err| SecretlyError::InvalidYamlSecret {
                    secret: field.secret_name().to_owned(),
                    message: err.to_string(),
                })?;
            set_from_map(field, map)
        }
    }
}

fn set_from_map(field: &mut Field<'_>, mut map: SecretMap) -> SecretlyResult<()> {
    let key = field.map_key_name().unwrap_or_default().to_owned();
    let value = map.remove(&key).ok_or_else(|| SecretlyError::SecretMissingKey {
        secret: field.secret_name().to_owned(),
        key: key.clone(),
    })?;
    set_text(field, value.as_bytes(), &key)
}

fn set_text(field: &mut Field<'_>, content: &[u8], key: &str) -> SecretlyResult<()> {
    let kind = field.slot().kind();
    if !kind.is_supported() {
        debug!(field = field.field_name(), kind = kind.name(), "unsupported field kind left unset");
        return Ok(());
    }
    let secret = field.secret_name().to_owned();
    let convert = |source| SecretlyError::Convert {
        secret: secret.clone(),
        key: key.to_owned(),
        target: kind.name(),
        source,
    };
    let text = std::str::from_utf8(content).map_err(|_| convert(ConvertError::NotUtf8))?;
    field.slot().set_text(text).map_err(convert)
}
