//! Input parsing for the `Secrets` derive macro.
//!
//! This module gathers the struct identifier, fields and attribute metadata
//! in one pass so expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields, Generics, Ident};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// A named field with its parsed metadata.
pub(crate) struct ParsedField {
    pub ident: Ident,
    pub attrs: FieldAttrs,
}

/// Everything expansion needs from the derive input.
pub(crate) struct SecretsInput {
    pub ident: Ident,
    pub generics: Generics,
    pub fields: Vec<ParsedField>,
    pub struct_attrs: StructAttrs,
}

/// Gathers information from the user-provided struct.
///
/// Only structs with named fields are accepted.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<SecretsInput> {
    let ident = input.ident.clone();
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Secrets requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Secrets can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(field_ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "Secrets requires named fields"));
        };
        fields.push(ParsedField {
            ident: field_ident,
            attrs: parse_field_attrs(&field.attrs)?,
        });
    }
    Ok(SecretsInput {
        ident,
        generics: input.generics.clone(),
        fields,
        struct_attrs,
    })
}
