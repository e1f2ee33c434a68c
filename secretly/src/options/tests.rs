//! Tests for the override transforms.

use anyhow::{Result, anyhow, bail, ensure};
use rstest::rstest;

use super::*;
use crate::{Secrets, SecretType, TagError, resolve_fields};

#[derive(Default, Secrets)]
struct Spec {
    service_integration_token: String,
    #[secretly(version = "5")]
    pinned: String,
    #[secretly(type = "json", key = "Username", split_words)]
    database_credentials: String,
}

fn with_jail<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut figment::Jail) -> Result<()>,
{
    figment::Jail::try_with(|j| f(j).map_err(|err| figment::Error::from(err.to_string())))
        .map_err(|err| anyhow!(err.to_string()))
}

fn versions(options: &[ProcessOption]) -> Result<Vec<String>> {
    let mut spec = Spec::default();
    let fields = resolve_fields(&mut spec, options)?;
    Ok(fields
        .iter()
        .map(|field| field.secret_version().to_owned())
        .collect())
}

#[test]
fn default_version_only_replaces_the_sentinel() -> Result<()> {
    let versions = versions(&[with_default_version("latest")])?;
    ensure!(versions == ["latest", "5", "latest"], "versions were {versions:?}");
    Ok(())
}

#[test]
fn empty_default_version_is_rejected() {
    let err = versions(&[with_default_version("")]).err();
    let rejected = err
        .as_ref()
        .and_then(|err| err.downcast_ref::<SecretlyError>())
        .is_some_and(|err| matches!(err, SecretlyError::InvalidSecretVersion { .. }));
    assert!(rejected, "unexpected result: {err:?}");
}

#[rstest]
#[case::default_then_patch(true, "1")]
#[case::patch_then_default(false, "1")]
fn default_version_never_replaces_a_patched_version(
    #[case] default_first: bool,
    #[case] expected: &str,
) -> Result<()> {
    let patch = || with_patch("ServiceIntegrationToken:\n  version: \"1\"\n");
    let default = || with_default_version("latest");
    let options = if default_first {
        [default(), patch()]
    } else {
        [patch(), default()]
    };
    let versions = versions(&options)?;
    let first = versions.first().ok_or_else(|| anyhow!("no fields"))?;
    ensure!(first == expected, "version was {first}");
    Ok(())
}

#[test]
fn patch_overrides_only_present_values() -> Result<()> {
    let patch = "\
Database_Credentials_Username:
  type: yaml
  name: shared-db
  key: User
  version: \"\"
Pinned:
  version: \"9\"
  split_words: false
Unknown:
  version: \"2\"
";
    let mut spec = Spec::default();
    let fields = resolve_fields(&mut spec, &[with_patch(patch)])?;
    let [token, pinned, db] = fields.as_slice() else {
        bail!("expected three fields, got {}", fields.len());
    };
    ensure!(token.secret_version() == "0");
    ensure!(pinned.secret_version() == "9" && !pinned.spec().split_words);
    ensure!(db.secret_type() == SecretType::Yaml);
    ensure!(db.secret_name() == "shared-db");
    ensure!(db.map_key_name() == Some("User"));
    ensure!(db.secret_version() == "0", "empty version must not override");
    Ok(())
}

#[test]
fn patch_with_invalid_type_names_the_entry() -> Result<()> {
    let err = versions(&[with_patch("Pinned:\n  type: xml\n")]).err();
    let Some(SecretlyError::PatchEntry { entry, key, source }) =
        err.as_ref().and_then(|err| err.downcast_ref::<SecretlyError>())
    else {
        bail!("expected patch entry error, got {err:?}");
    };
    ensure!(entry == "Pinned" && *key == "type");
    ensure!(*source == TagError::InvalidSecretType("xml".into()));
    Ok(())
}

#[test]
fn malformed_inline_patch_is_reported() {
    let err = versions(&[with_patch("Pinned: [oops")]).err();
    let origin = err
        .as_ref()
        .and_then(|err| err.downcast_ref::<SecretlyError>())
        .and_then(|err| match err {
            SecretlyError::Patch { origin, .. } => Some(origin.as_str()),
            _ => None,
        });
    assert_eq!(origin, Some("<inline>"));
}

#[rstest]
#[case::json("patch.json", r#"{"Pinned": {"version": "json"}}"#, "json")]
#[case::yaml("patch.yaml", "Pinned:\n  version: yaml\n", "yaml")]
#[case::yml_upper("PATCH.YML", "Pinned:\n  version: yml\n", "yml")]
fn patch_files_are_parsed_by_extension(
    #[case] file: &str,
    #[case] contents: &str,
    #[case] expected: &str,
) -> Result<()> {
    with_jail(|jail| {
        jail.create_file(file, contents)?;
        let versions = versions(&[with_patch_file(file)])?;
        ensure!(versions.get(1).map(String::as_str) == Some(expected), "versions were {versions:?}");
        Ok(())
    })
}

#[rstest]
#[case::toml("patch.toml", "toml")]
#[case::none("patch", "")]
fn unknown_patch_extensions_are_rejected(
    #[case] file: &str,
    #[case] expected: &str,
) -> Result<()> {
    with_jail(|jail| {
        jail.create_file(file, "")?;
        let err = versions(&[with_patch_file(file)]).err();
        let Some(SecretlyError::InvalidFileType { extension, .. }) =
            err.as_ref().and_then(|err| err.downcast_ref::<SecretlyError>())
        else {
            bail!("expected invalid file type, got {err:?}");
        };
        ensure!(extension == expected);
        Ok(())
    })
}

#[test]
fn missing_patch_file_is_a_patch_error() {
    let err = versions(&[with_patch_file("does/not/exist.yaml")]).err();
    let matched = err
        .as_ref()
        .and_then(|err| err.downcast_ref::<SecretlyError>())
        .is_some_and(|err| {
            matches!(err, SecretlyError::Patch { origin, .. } if origin == "does/not/exist.yaml")
        });
    assert!(matched, "unexpected result: {err:?}");
}

#[test]
fn environment_versions_override_per_field() -> Result<()> {
    with_jail(|jail| {
        jail.set_env("APP_SERVICEINTEGRATIONTOKEN", "from-env");
        jail.set_env("APP_DATABASE_CREDENTIALS_USERNAME", "");
        let versions = versions(&[with_versions_from_env("app")])?;
        ensure!(
            versions == ["from-env", "5", ""],
            "versions were {versions:?}"
        );
        Ok(())
    })
}

#[test]
fn hyphenated_prefixes_read_exportable_names() -> Result<()> {
    with_jail(|jail| {
        jail.set_env("MY_APP_SERVICEINTEGRATIONTOKEN", "3");
        let versions = versions(&[with_versions_from_env("my-app")])?;
        ensure!(versions == ["3", "5", "0"], "versions were {versions:?}");
        Ok(())
    })
}

#[test]
fn custom_options_see_every_field() -> Result<()> {
    let upper = ProcessOption::new("upper", |fields| {
        for field in fields {
            let name = field.secret_name().to_uppercase();
            field.spec_mut().secret_name = name;
        }
        Ok(())
    });
    let mut spec = Spec::default();
    let fields = resolve_fields(&mut spec, &[upper])?;
    let first = fields.first().map(Field::secret_name);
    ensure!(first == Some("SERVICEINTEGRATIONTOKEN"), "first was {first:?}");
    ensure!(format!("{:?}", with_default_version("x")).contains("default_version"));
    Ok(())
}
