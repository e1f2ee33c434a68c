//! Procedural macros for `secretly`.
//!
//! [`Secrets`] implements `secretly::Record` and `secretly::Bind` for a
//! struct with named fields, so the struct can be walked and filled with
//! secrets. Field metadata is written with `#[secretly(...)]`:
//!
//! - `type = "text" | "json" | "yaml"` selects the secret encoding.
//! - `name = "..."` overrides the secret name.
//! - `key = "..."` selects the map key for JSON and YAML secrets.
//! - `version = "..."` selects the secret version.
//! - `split_words` derives default names by splitting on case boundaries.
//! - `ignored` leaves the field out entirely.
//!
//! Values are validated when the struct is walked, so an invalid `type` is
//! reported as a runtime error naming the field.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive `secretly::Record` and `secretly::Bind` for a struct.
///
/// Each field's declared name is its identifier in `PascalCase`, unless the
/// struct carries `#[secretly(rename_all = "camelCase" | "verbatim")]`.
/// `#[secretly(crate = "path")]` points generated code at a renamed
/// dependency.
#[proc_macro_derive(Secrets, attributes(secretly))]
pub fn derive_secrets(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
