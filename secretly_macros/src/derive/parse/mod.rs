//! Parsing of `#[secretly(...)]` attributes.

use syn::meta::ParseNestedMeta;
use syn::parenthesized;
use syn::{Attribute, Token};

mod input;
mod literals;
#[cfg(test)]
mod tests;

pub(crate) use input::{ParsedField, SecretsInput, parse_input};
use literals::{flag_value, lit_str};

use super::naming::RenameAll;

/// Keys whose values are strings.
const STRING_KEYS: [&str; 4] = ["type", "name", "key", "version"];
/// Keys whose values are flags.
const FLAG_KEYS: [&str; 1] = ["split_words"];
/// Key excluding a field from the generated code.
const IGNORED: &str = "ignored";

/// Struct-level attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Rule turning field identifiers into declared names.
    pub rename_all: RenameAll,
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes, kept in the order they were written.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    /// Metadata passed through to the runtime as `(key, value)` pairs.
    pub tags: Vec<(String, String)>,
    /// Whether the field is left out of the walk.
    pub ignored: bool,
}

/// Iterate all `#[secretly(...)]` attributes once and apply a callback.
fn parse_secretly<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("secretly")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[secretly(...)]` metadata applied to a struct.
///
/// Recognises `rename_all` and `crate`; unknown keys are ignored.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_secretly(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("rename_all") => {
                let s = lit_str(meta, "rename_all")?;
                out.rename_all = RenameAll::parse(&s.value(), s.span())?;
                Ok(())
            }
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[secretly(...)]` attributes.
///
/// `type`, `name`, `key` and `version` take string literals. `split_words`
/// and `ignored` take a bool, a string or nothing. Unknown keys with string
/// values are passed through; other unknown forms are dropped.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_secretly(attrs, |meta| {
        let Some(key) = meta.path.get_ident().map(ToString::to_string) else {
            return discard_unknown(meta);
        };
        if STRING_KEYS.contains(&key.as_str()) {
            let value = lit_str(meta, &key)?.value();
            out.tags.push((key, value));
        } else if FLAG_KEYS.contains(&key.as_str()) {
            let value = flag_value(meta, &key)?;
            out.tags.push((key, value));
        } else if key == IGNORED {
            apply_ignored(meta, &mut out)?;
        } else if meta.input.peek(Token![=]) && meta.input.peek2(syn::LitStr) {
            let value = lit_str(meta, &key)?.value();
            out.tags.push((key, value));
        } else {
            discard_unknown(meta)?;
        }
        Ok(())
    })?;
    Ok(out)
}

/// Boolean literals decide at expansion time; string values are left to
/// the runtime.
fn apply_ignored(meta: &ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<()> {
    let value = flag_value(meta, IGNORED)?;
    match value.as_str() {
        "true" => out.ignored = true,
        "false" => {}
        _ => out.tags.push((IGNORED.to_owned(), value)),
    }
    Ok(())
}
