//! Version overrides read from environment variables.

use std::ffi::OsString;

use tracing::debug;

use super::ProcessOption;

/// Override versions from environment variables.
///
/// Each field is looked up under `prefix`, `_` and its canonical name, with
/// every `-` replaced by `_` and the whole name uppercased; the prefix and
/// its `_` are dropped when `prefix` is empty. `ServiceIntegrationToken`
/// with prefix `app` reads `APP_SERVICEINTEGRATIONTOKEN`. A variable that is
/// set, even to an empty string, replaces the version. Unset variables and
/// values that are not UTF-8 leave it alone.
#[must_use]
pub fn with_versions_from_env(prefix: impl Into<String>) -> ProcessOption {
    let prefix = prefix.into();
    ProcessOption::new("versions_from_env", move |fields| {
        for field in fields.iter_mut() {
            let var = variable_name(&prefix, &field.name());
            let Some(version) = std::env::var_os(&var).and_then(|value| version_from(&var, value))
            else {
                continue;
            };
            debug!(field = field.field_name(), variable = %var, "version read from environment");
            field.spec_mut().secret_version = version;
        }
        Ok(())
    })
}

fn variable_name(prefix: &str, name: &str) -> String {
    let joined = if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}_{name}")
    };
    joined.replace('-', "_").to_uppercase()
}

fn version_from(var: &str, value: OsString) -> Option<String> {
    value
        .into_string()
        .inspect_err(|_| debug!(variable = %var, "non UTF-8 version ignored"))
        .ok()
}
