//! Expansion of `#[derive(Secrets)]`.

mod crate_path;
mod generate;
mod naming;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Parse `input` and emit the trait implementations.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    Ok(generate::secrets_impl(&parsed, &krate))
}
