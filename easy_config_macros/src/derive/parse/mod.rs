//! Attribute parsing for the `Populate` derive macro.
//!
//! Unlike permissive attribute parsers, unknown `#[config(...)]` keys are
//! rejected: a misspelt source key would otherwise leave a field silently
//! unbound.

use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Fields};

mod literals;
mod type_utils;

use literals::lit_str;
pub(crate) use type_utils::option_inner;

/// Source attribute declared on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceAttr {
    Env(String),
    Cli(String),
    EnvOrCli(String),
}

impl SourceAttr {
    pub(crate) fn key(&self) -> &str {
        match self {
            Self::Env(key) | Self::Cli(key) | Self::EnvOrCli(key) => key,
        }
    }
}

/// Field-level attributes recognised by `#[derive(Populate)]`.
#[derive(Debug, Default, Clone)]
pub(crate) struct FieldAttrs {
    pub source: Option<SourceAttr>,
    pub required: bool,
    pub default: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// A named field paired with its parsed attributes.
pub(crate) struct ParsedField {
    pub ident: syn::Ident,
    /// Field identifier without any raw-identifier prefix.
    pub name: String,
    pub ty: syn::Type,
    pub attrs: FieldAttrs,
}

/// Shape of the struct being derived.
pub(crate) enum ParsedShape {
    Named(Vec<ParsedField>),
    Unit,
}

pub(crate) struct ParsedInput {
    pub struct_attrs: StructAttrs,
    pub shape: ParsedShape,
}

/// Iterate all `#[config(...)]` attributes and apply a callback to each entry.
fn parse_config_attrs<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("config")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn meta_key(meta: &ParseNestedMeta) -> String {
    meta.path
        .get_ident()
        .map(ToString::to_string)
        .unwrap_or_default()
}

fn non_empty_key(meta: &ParseNestedMeta, attr: &str) -> syn::Result<String> {
    let lit = lit_str(meta, attr)?;
    let value = lit.value();
    if value.is_empty() {
        return Err(syn::Error::new(lit.span(), format!("{attr} key must not be empty")));
    }
    Ok(value)
}

/// Parses struct-level `#[config(...)]` attributes.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_config_attrs(attrs, |meta| match meta_key(meta).as_str() {
        "crate" => {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            Ok(())
        }
        _ => Err(meta.error("unknown struct-level config attribute; expected `crate`")),
    })?;
    Ok(out)
}

fn set_source(
    out: &mut FieldAttrs,
    meta: &ParseNestedMeta,
    source: SourceAttr,
) -> syn::Result<()> {
    if out.source.is_some() {
        return Err(meta.error("a field may declare only one of `env`, `cli` or `env_or_cli`"));
    }
    out.source = Some(source);
    Ok(())
}

/// Parses field-level `#[config(...)]` attributes.
///
/// `name` is the field identifier used as the key for a bare `cli`.
pub(crate) fn parse_field_attrs(attrs: &[Attribute], name: &str) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    let mut policy_span: Option<Span> = None;
    parse_config_attrs(attrs, |meta| match meta_key(meta).as_str() {
        "env" => {
            let key = non_empty_key(meta, "env")?;
            set_source(&mut out, meta, SourceAttr::Env(key))
        }
        "cli" => {
            let key = if meta.input.peek(syn::Token![=]) {
                non_empty_key(meta, "cli")?
            } else {
                name.to_owned()
            };
            set_source(&mut out, meta, SourceAttr::Cli(key))
        }
        "env_or_cli" => {
            let key = non_empty_key(meta, "env_or_cli")?;
            set_source(&mut out, meta, SourceAttr::EnvOrCli(key))
        }
        "required" => {
            out.required = true;
            policy_span.get_or_insert(meta.path.span());
            Ok(())
        }
        "default" => {
            out.default = Some(lit_str(meta, "default")?.value());
            policy_span.get_or_insert(meta.path.span());
            Ok(())
        }
        _ => Err(meta.error(
            "unknown config attribute; expected one of `env`, `cli`, `env_or_cli`, `required` or `default`",
        )),
    })?;
    if let (None, Some(span)) = (&out.source, policy_span) {
        return Err(syn::Error::new(
            span,
            "`required` and `default` need a source: add `env`, `cli` or `env_or_cli`",
        ));
    }
    Ok(out)
}

/// Gathers the struct shape and all attribute metadata in one pass so that
/// expansion fails fast on invalid input.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Populate can only be derived for structs",
        ));
    };
    let shape = match &data.fields {
        Fields::Named(named) => ParsedShape::Named(
            named
                .named
                .iter()
                .map(parse_field)
                .collect::<syn::Result<Vec<_>>>()?,
        ),
        Fields::Unit => ParsedShape::Unit,
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                data.struct_token,
                "Populate requires named fields",
            ));
        }
    };
    Ok(ParsedInput {
        struct_attrs,
        shape,
    })
}

fn parse_field(field: &syn::Field) -> syn::Result<ParsedField> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Populate requires named fields"))?;
    let name = ident.unraw().to_string();
    let attrs = parse_field_attrs(&field.attrs, &name)?;
    Ok(ParsedField {
        ident,
        name,
        ty: field.ty.clone(),
        attrs,
    })
}
