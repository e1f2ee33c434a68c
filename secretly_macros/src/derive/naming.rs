//! Declared field names derived from Rust identifiers.

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use proc_macro2::Span;
use syn::Ident;
use syn::ext::IdentExt;

/// Conversion from a field identifier to its declared name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenameAll {
    /// `database_credentials` becomes `DatabaseCredentials`.
    #[default]
    PascalCase,
    /// `database_credentials` becomes `databaseCredentials`.
    CamelCase,
    /// The identifier as written, without any `r#` prefix.
    Verbatim,
}

impl RenameAll {
    pub(crate) fn parse(value: &str, span: Span) -> syn::Result<Self> {
        match value {
            "PascalCase" => Ok(Self::PascalCase),
            "camelCase" => Ok(Self::CamelCase),
            "verbatim" => Ok(Self::Verbatim),
            other => Err(syn::Error::new(
                span,
                format!(
                    "unknown rename_all '{other}'; expected one of \"PascalCase\", \"camelCase\", or \"verbatim\""
                ),
            )),
        }
    }

    pub(crate) fn apply(self, ident: &Ident) -> String {
        let raw = ident.unraw().to_string();
        match self {
            Self::PascalCase => raw.to_upper_camel_case(),
            Self::CamelCase => raw.to_lower_camel_case(),
            Self::Verbatim => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use rstest::rstest;
    use syn::parse_quote;

    use super::*;

    #[rstest]
    #[case(RenameAll::PascalCase, parse_quote!(service_integration_token), "ServiceIntegrationToken")]
    #[case(RenameAll::PascalCase, parse_quote!(r#type), "Type")]
    #[case(RenameAll::CamelCase, parse_quote!(database_credentials), "databaseCredentials")]
    #[case(RenameAll::Verbatim, parse_quote!(r#match), "match")]
    #[case(RenameAll::Verbatim, parse_quote!(HTTPServer), "HTTPServer")]
    fn identifiers_are_renamed(
        #[case] rule: RenameAll,
        #[case] ident: Ident,
        #[case] expected: &str,
    ) -> Result<()> {
        let name = rule.apply(&ident);
        ensure!(name == expected, "renamed to {name}");
        Ok(())
    }

    #[test]
    fn unknown_rules_are_rejected() {
        let err = RenameAll::parse("kebab-case", Span::call_site()).err();
        assert!(err.is_some_and(|err| err.to_string().contains("kebab-case")));
    }
}
