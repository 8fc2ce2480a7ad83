//! Procedural macros for `easy_config`.
//!
//! `#[derive(Populate)]` reads `#[config(...)]` field attributes and emits an
//! `easy_config::Populate` implementation: a field metadata table plus a
//! binder function that reads each field back in declaration order.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `easy_config::Populate`.
///
/// Field attributes:
///
/// - `env = "KEY"`: read from the environment variable `KEY`.
/// - `cli = "key"` or bare `cli`: read from the `key=value` argument, keyed on
///   the field name when no key is given.
/// - `env_or_cli = "key"`: read from the argument, then the environment.
/// - `required`: fail when no source supplies a value.
/// - `default = "raw"`: raw value used when no source supplies one.
///
/// Fields without a source attribute are set to `Default::default()`.
/// Struct attribute `#[config(crate = "path")]` overrides the runtime crate
/// path used by the generated code.
#[proc_macro_derive(Populate, attributes(config))]
pub fn derive_populate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
