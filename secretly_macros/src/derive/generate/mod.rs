//! Token generation for `#[derive(Secrets)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, parse_quote};

use super::parse::{ParsedField, SecretsInput};

/// Emit the `Record` and `Bind` implementations.
pub(crate) fn secrets_impl(input: &SecretsInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let generics = bound_generics(&input.generics, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let visited: Vec<&ParsedField> = input
        .fields
        .iter()
        .filter(|field| !field.attrs.ignored)
        .collect();
    let body = visit_body(input, &visited, krate);

    quote! {
        impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
            fn visit_fields<'__secretly>(
                &'__secretly mut self,
                __secretly_visitor: &mut dyn #krate::FieldVisitor<'__secretly>,
            ) -> #krate::SecretlyResult<()> {
                #body
            }
        }

        impl #impl_generics #krate::Bind for #ident #ty_generics #where_clause {
            fn shape(&mut self) -> #krate::Shape<'_> {
                #krate::Shape::Record(self)
            }
        }
    }
}

/// Destructure `self` and offer each visited field to the visitor.
fn visit_body(input: &SecretsInput, visited: &[&ParsedField], krate: &TokenStream) -> TokenStream {
    if visited.is_empty() {
        return quote! {
            let _ = __secretly_visitor;
            ::core::result::Result::Ok(())
        };
    }
    let rename_all = input.struct_attrs.rename_all;
    let idents = visited.iter().map(|field| &field.ident);
    let visits = visited.iter().map(|field| {
        let binding = &field.ident;
        let name = rename_all.apply(&field.ident);
        let tags = field.attrs.tags.iter().map(|(key, value)| quote! { (#key, #value) });
        quote! {
            __secretly_visitor.visit(&#krate::FieldMeta::new(#name, &[#(#tags),*]), #binding)?;
        }
    });
    quote! {
        let Self { #(#idents,)* .. } = self;
        #(#visits)*
        ::core::result::Result::Ok(())
    }
}

/// Require `Bind` of every type parameter.
fn bound_generics(generics: &Generics, krate: &TokenStream) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(#krate::Bind));
    }
    generics
}
