//! Walking annotated structs into field descriptors.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use secretly::{Bind, SecretType, SecretlyError, Secrets, TagError, walk};

#[derive(Default, Secrets)]
struct SubSpecification {
    property: String,
}

#[derive(Default, Secrets)]
struct CorrectSpecification {
    text: String,
    #[secretly(split_words)]
    text_split_words: String,
    #[secretly(name = "a_secret")]
    text_secret_name: String,
    #[secretly(version = "latest")]
    text_version: String,
    #[secretly(name = "a_secret", version = "latest", split_words)]
    text_all: String,

    #[secretly(type = "json")]
    json: String,
    #[secretly(type = "json", split_words)]
    json_split_words: String,
    #[secretly(type = "json", name = "a_secret")]
    json_secret_name: String,
    #[secretly(type = "json", key = "a_key")]
    json_key_name: String,
    #[secretly(type = "json", version = "1")]
    json_version: String,

    #[secretly(type = "yaml", split_words)]
    yaml_split_words: String,
    #[secretly(type = "yaml", name = "a_secret", key = "a_key", version = "latest", split_words)]
    yaml_all: String,

    pointer: Option<String>,
    composed_specification: SubSpecification,
    composed_specification_ptr: Option<Box<SubSpecification>>,

    #[secretly(ignored)]
    ignored: String,
    #[secretly(ignored)]
    ignored_composed_specification: SubSpecification,
}

type Descriptor = (&'static str, SecretType, String, String, Option<String>);

fn describe(spec: &mut dyn Bind) -> Result<Vec<Descriptor>> {
    let fields = walk(spec)?;
    Ok(fields
        .iter()
        .map(|field| {
            (
                field.field_name(),
                field.secret_type(),
                field.secret_name().to_owned(),
                field.secret_version().to_owned(),
                field.map_key_name().map(str::to_owned),
            )
        })
        .collect())
}

fn text(field: &'static str, name: &str, version: &str) -> Descriptor {
    (field, SecretType::Text, name.to_owned(), version.to_owned(), None)
}

fn map(field: &'static str, kind: SecretType, name: &str, version: &str, key: &str) -> Descriptor {
    (field, kind, name.to_owned(), version.to_owned(), Some(key.to_owned()))
}

#[test]
fn walks_every_field_in_declaration_order() -> Result<()> {
    let mut spec = CorrectSpecification::default();
    let got = describe(&mut spec)?;
    let want = vec![
        text("Text", "Text", "0"),
        text("TextSplitWords", "Text_Split_Words", "0"),
        text("TextSecretName", "a_secret", "0"),
        text("TextVersion", "TextVersion", "latest"),
        text("TextAll", "a_secret", "latest"),
        map("Json", SecretType::Json, "Json", "0", "Json"),
        map("JsonSplitWords", SecretType::Json, "Json_Split_Words", "0", "Json_Split_Words"),
        map("JsonSecretName", SecretType::Json, "a_secret", "0", "JsonSecretName"),
        map("JsonKeyName", SecretType::Json, "JsonKeyName", "0", "a_key"),
        map("JsonVersion", SecretType::Json, "JsonVersion", "1", "JsonVersion"),
        map("YamlSplitWords", SecretType::Yaml, "Yaml_Split_Words", "0", "Yaml_Split_Words"),
        map("YamlAll", SecretType::Yaml, "a_secret", "latest", "a_key"),
        text("Pointer", "Pointer", "0"),
        text("Property", "Property", "0"),
        text("Property", "Property", "0"),
    ];
    ensure!(got == want, "unexpected descriptors {got:#?}");
    ensure!(spec.composed_specification_ptr.is_some(), "nested record was not allocated");
    Ok(())
}

#[derive(Default, Secrets)]
struct TextWithKey {
    #[secretly(key = "a_key")]
    text: String,
}

#[derive(Default, Secrets)]
struct BadType {
    #[secretly(type = "xml")]
    token: String,
}

#[derive(Default, Secrets)]
struct BadFlag {
    #[secretly(split_words = "maybe")]
    token: String,
}

#[derive(Default, Secrets)]
struct EmptyVersion {
    #[secretly(version = "")]
    token: String,
}

#[rstest]
#[case::key_on_text(Box::new(TextWithKey::default()), "Text", "key", TagError::SecretTypeDoesNotSupportKey)]
#[case::unknown_type(
    Box::new(BadType::default()),
    "Token",
    "type",
    TagError::InvalidSecretType("xml".into())
)]
#[case::non_bool_flag(
    Box::new(BadFlag::default()),
    "Token",
    "split_words",
    TagError::InvalidStructTagValue { value: "maybe".into(), expected: "bool" }
)]
#[case::empty_version(Box::new(EmptyVersion::default()), "Token", "version", TagError::InvalidSecretVersion)]
fn invalid_metadata_names_field_and_key(
    #[case] mut spec: Box<dyn Bind>,
    #[case] expected_field: &str,
    #[case] expected_key: &str,
    #[case] expected: TagError,
) -> Result<()> {
    let err = walk(spec.as_mut()).err().ok_or_else(|| anyhow!("expected an error"))?;
    match err {
        SecretlyError::Tag { field, key, source } => {
            ensure!(field == expected_field, "unexpected field {field}");
            ensure!(key == expected_key, "unexpected key {key}");
            ensure!(source == expected, "unexpected source {source:?}");
        }
        other => return Err(anyhow!("unexpected error {other}")),
    }
    Ok(())
}

#[rstest]
#[case::text(Box::new(String::new()))]
#[case::number(Box::new(0_u16))]
#[case::collection(Box::new(Vec::<String>::new()))]
fn non_records_are_rejected(#[case] mut spec: Box<dyn Bind>) -> Result<()> {
    let err = walk(spec.as_mut()).err();
    ensure!(
        matches!(err, Some(SecretlyError::InvalidSpecification)),
        "unexpected result {err:?}"
    );
    Ok(())
}

#[derive(Default, Secrets)]
#[secretly(rename_all = "camelCase")]
struct Renamed {
    #[secretly(split_words)]
    api_key: String,
    r#type: String,
}

#[test]
fn rename_rules_shape_the_declared_name() -> Result<()> {
    let mut spec = Renamed::default();
    let got = describe(&mut spec)?;
    ensure!(
        got == vec![text("apiKey", "api_Key", "0"), text("type", "type", "0")],
        "unexpected descriptors {got:#?}"
    );
    Ok(())
}

#[derive(Default, Secrets)]
struct RuntimeIgnored {
    #[secretly(ignored = "true")]
    skipped: String,
    #[secretly(ignored = "false")]
    kept: String,
}

#[test]
fn string_ignored_values_are_checked_while_walking() -> Result<()> {
    let mut spec = RuntimeIgnored::default();
    let got = describe(&mut spec)?;
    ensure!(got == vec![text("Kept", "Kept", "0")], "unexpected descriptors {got:#?}");
    Ok(())
}
