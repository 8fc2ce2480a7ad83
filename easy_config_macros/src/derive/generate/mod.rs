//! Code generation for the `Populate` implementation.
//!
//! Two pieces are emitted per struct: `field_specs`, a metadata table with one
//! entry per sourced field, and `bind`, which reads every field back from the
//! binder in declaration order so the first failure short-circuits the rest.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use super::crate_path;
use super::parse::{ParsedField, ParsedInput, ParsedShape, SourceAttr, option_inner};


/// How the binder is asked for a field's value.
enum BindMode<'a> {
    /// No source attribute; the field takes `Default::default()`.
    Unsourced,
    /// `Option<T>` field; absent values become `None`.
    Optional(&'a syn::Type),
    /// Required or defaulted field; always resolves or fails.
    Value(&'a syn::Type),
    /// Optional non-`Option` field; absent values become `T::default()`.
    ValueOrDefault(&'a syn::Type),
}

fn bind_mode(field: &ParsedField) -> BindMode<'_> {
    if field.attrs.source.is_none() {
        return BindMode::Unsourced;
    }
    if let Some(inner) = option_inner(&field.ty) {
        return BindMode::Optional(inner);
    }
    if field.attrs.required || field.attrs.default.is_some() {
        BindMode::Value(&field.ty)
    } else {
        BindMode::ValueOrDefault(&field.ty)
    }
}

/// Emits the `FieldSpec` constructor for a sourced field.
fn spec_tokens(field: &ParsedField, krate: &TokenStream) -> Option<TokenStream> {
    let source = field.attrs.source.as_ref()?;
    let value_ty = option_inner(&field.ty).unwrap_or(&field.ty);
    let name = &field.name;
    let key = source.key();
    let kind = match source {
        SourceAttr::Env(_) => quote! { EnvironmentOnly },
        SourceAttr::Cli(_) => quote! { CommandLineOnly },
        SourceAttr::EnvOrCli(_) => quote! { EnvironmentOrCommandLine },
    };
    let required = field.attrs.required.then(|| quote! { .required() });
    let default = field
        .attrs
        .default
        .as_ref()
        .map(|raw| quote! { .with_default(#raw) });
    Some(quote! {
        #krate::FieldSpec::new(
            #name,
            #krate::SourceKind::#kind,
            #key,
            <#value_ty as #krate::FromRaw>::TYPE_TAG,
        )
        #required
        #default
    })
}

/// Emits the `let` binding that reads one field from the binder.
fn bind_tokens(field: &ParsedField) -> TokenStream {
    let ident = &field.ident;
    let name = &field.name;
    match bind_mode(field) {
        BindMode::Unsourced => quote! {
            let #ident = ::core::default::Default::default();
        },
        BindMode::Optional(inner) => quote! {
            let #ident = __binder.optional::<#inner>(#name)?;
        },
        BindMode::Value(ty) => quote! {
            let #ident = __binder.value::<#ty>(#name)?;
        },
        BindMode::ValueOrDefault(ty) => quote! {
            let #ident = __binder.value_or_default::<#ty>(#name)?;
        },
    }
}

/// Generates the complete `Populate` implementation for `input`.
pub(crate) fn generate_populate_impl(input: &DeriveInput, parsed: &ParsedInput) -> TokenStream {
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let (specs, body) = match &parsed.shape {
        ParsedShape::Named(fields) => {
            let specs: Vec<_> = fields
                .iter()
                .filter_map(|field| spec_tokens(field, &krate))
                .collect();
            let bindings = fields.iter().map(bind_tokens);
            let idents = fields.iter().map(|field| &field.ident);
            let body = quote! {
                #( #bindings )*
                ::core::result::Result::Ok(Self { #( #idents ),* })
            };
            (specs, body)
        }
        ParsedShape::Unit => (Vec::new(), quote! { ::core::result::Result::Ok(Self) }),
    };

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Populate for #ident #ty_generics #where_clause {
            fn field_specs() -> ::std::vec::Vec<#krate::FieldSpec> {
                ::std::vec![ #( #specs ),* ]
            }

            fn bind(__binder: &#krate::Binder<'_>) -> #krate::ConfigResult<Self> {
                #body
            }
        }
    }
}
