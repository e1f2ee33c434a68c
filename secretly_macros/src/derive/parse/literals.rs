//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr, Token};

/// Parses a literal from an attribute using `extractor`, naming `expected`
/// in the error when the literal has the wrong kind.
fn parse_lit<T, F>(
    meta: &ParseNestedMeta,
    key: &str,
    expected: &str,
    extractor: F,
) -> Result<T, syn::Error>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be {expected}")))
}

/// Parses a string literal from an attribute.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> Result<LitStr, syn::Error> {
    parse_lit(meta, key, "a string", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

/// Parses a flag written as `key`, `key = true` or `key = "true"`.
///
/// Boolean literals are rendered as text; string literals are kept as
/// written and validated when the record is walked.
pub(crate) fn flag_value(meta: &ParseNestedMeta, key: &str) -> Result<String, syn::Error> {
    if !meta.input.peek(Token![=]) {
        return Ok(String::from("true"));
    }
    parse_lit(meta, key, "a bool or a string", |lit| match lit {
        Lit::Bool(b) => Some(b.value.to_string()),
        Lit::Str(s) => Some(s.value()),
        _ => None,
    })
}
