//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[secretly(crate = "...")]` attribute value into
//! the path generated code uses to reach the runtime crate.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `::secretly` when no override is present.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::secretly }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    //! Unit tests for crate path resolution with default and custom paths.

    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::default(None, ":: secretly")]
    #[case::custom(Some("vault_binding"), "vault_binding")]
    #[case::nested(Some("deps::secretly"), "deps :: secretly")]
    fn resolve_produces_expected_tokens(
        #[case] input: Option<&str>,
        #[case] expected: &str,
    ) -> Result<()> {
        let parsed = input
            .map(syn::parse_str::<syn::Path>)
            .transpose()
            .map_err(|err| anyhow!("invalid path: {err}"))?;
        let tokens = resolve(parsed.as_ref()).to_string();
        ensure!(tokens == expected, "resolved {tokens}");
        Ok(())
    }
}
