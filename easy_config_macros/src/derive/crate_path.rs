//! Crate path resolution for dependency aliasing support.
//!
//! Turns the optional `#[config(crate = "...")]` struct attribute into the
//! path prefix used for every runtime item referenced by generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the runtime crate path, defaulting to `::easy_config`.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::easy_config }, |path| quote! { #path })
}
