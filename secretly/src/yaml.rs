//! YAML parsing backed by `serde-saphyr`.

use serde::de::DeserializeOwned;
use serde_saphyr::Options;

/// Parse YAML `contents` using strict boolean semantics, so only `true` and
/// `false` read as booleans and spellings such as `yes` stay strings.
pub(crate) fn from_str<T: DeserializeOwned>(contents: &str) -> Result<T, serde_saphyr::Error> {
    serde_saphyr::from_str_with_options(
        contents,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
}

/// Parse YAML bytes, rejecting content that is not UTF-8.
pub(crate) fn from_slice<T: DeserializeOwned>(
    contents: &[u8],
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    let text = std::str::from_utf8(contents)?;
    Ok(from_str(text)?)
}
