//! Patch documents mapping canonical field names to partial overrides.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::ProcessOption;
use crate::defaults::TAG_TYPE;
use crate::error::INLINE_ORIGIN;
use crate::{Field, SecretType, SecretlyError, SecretlyResult, yaml};

/// One entry of a patch document. Empty values leave the field untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PatchEntry {
    #[serde(rename = "type")]
    secret_type: String,
    name: String,
    key: String,
    version: String,
    split_words: bool,
}

type PatchDocument = HashMap<String, PatchEntry>;

#[derive(Debug, Clone, Copy)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> SecretlyResult<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(SecretlyError::InvalidFileType {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    fn parse<T: DeserializeOwned>(self, origin: &str, contents: &[u8]) -> SecretlyResult<T> {
        match self {
            Self::Json => serde_json::from_slice(contents).map_err(|err| SecretlyError::patch(origin, err)),
            Self::Yaml => yaml::from_slice(contents).map_err(|err| SecretlyError::patch(origin, err)),
        }
    }
}

/// Override descriptor values from an in-memory YAML patch.
///
/// YAML-compatible JSON is accepted. Top-level keys are canonical field
/// names (see [`Field::name`]); each value may set `type`, `name`, `key`,
/// `version` and `split_words`.
///
/// # Examples
///
/// ```
/// use secretly::{Secrets, resolve_fields, with_patch};
///
/// #[derive(Default, Secrets)]
/// struct Spec {
///     api_key: String,
/// }
///
/// let mut spec = Spec::default();
/// let fields = resolve_fields(&mut spec, &[with_patch("ApiKey:\n  version: \"3\"\n")])?;
/// assert_eq!(fields[0].secret_version(), "3");
/// # Ok::<(), secretly::SecretlyError>(())
/// ```
#[must_use]
pub fn with_patch(patch: impl Into<Vec<u8>>) -> ProcessOption {
    let patch = patch.into();
    ProcessOption::new("patch", move |fields| {
        let document = Format::Yaml.parse(INLINE_ORIGIN, &patch)?;
        apply_patch(&document, fields)
    })
}

/// Override descriptor values from a patch file.
///
/// The extension selects the parser: `.json`, or `.yaml`/`.yml`. The file
/// is read when the option is applied.
///
/// # Errors
///
/// Applying the option fails with [`SecretlyError::InvalidFileType`] for
/// other extensions and [`SecretlyError::Patch`] when the file cannot be
/// read or parsed.
#[must_use]
pub fn with_patch_file(path: impl Into<PathBuf>) -> ProcessOption {
    let path = path.into();
    ProcessOption::new("patch_file", move |fields| {
        let origin = path.display().to_string();
        let format = Format::from_path(&path)?;
        let contents = std::fs::read(&path).map_err(|err| SecretlyError::patch(&origin, err))?;
        let document = format.parse(&origin, &contents)?;
        apply_patch(&document, fields)
    })
}

fn apply_patch(document: &PatchDocument, fields: &mut [Field<'_>]) -> SecretlyResult<()> {
    for field in fields.iter_mut() {
        let name = field.name();
        let Some(entry) = document.get(&name) else {
            continue;
        };
        debug!(field = %name, "patch entry matched");
        let spec = field.spec_mut();
        if !entry.secret_type.is_empty() {
            spec.secret_type = entry.secret_type.parse::<SecretType>().map_err(|source| {
                SecretlyError::PatchEntry {
                    entry: name.clone(),
                    key: TAG_TYPE,
                    source,
                }
            })?;
        }
        if !entry.name.is_empty() {
            spec.secret_name.clone_from(&entry.name);
        }
        if !entry.key.is_empty() {
            spec.map_key_name = Some(entry.key.clone());
        }
        if !entry.version.is_empty() {
            spec.secret_version.clone_from(&entry.version);
        }
        if entry.split_words {
            spec.split_words = true;
        }
    }
    Ok(())
}
