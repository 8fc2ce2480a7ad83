//! Literal parsing helpers for derive attributes.

use syn::{Lit, LitStr};

/// Parses `key = "..."`, reporting a typed error for any other literal.
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string literal"),
        )),
    }
}
