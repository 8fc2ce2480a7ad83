//! Field metadata consumed by the resolver and binder.
//!
//! A [`FieldSpec`] records where a single configuration field may be read
//! from, whether it must be supplied, and the raw default used when no source
//! provides a value. The derive macro emits one spec per sourced field in
//! declaration order; hand-written [`crate::Populate`] implementations build
//! them with the constructors below.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::convert::TypeTag;


/// Input channel(s) a field may be populated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Only `key=value` command-line tokens are consulted.
    CommandLineOnly,
    /// Only process environment variables are consulted.
    EnvironmentOnly,
    /// Command-line tokens first, then environment variables.
    EnvironmentOrCommandLine,
}

impl SourceKind {
    /// Returns `true` when command-line tokens are consulted.
    #[must_use]
    pub const fn reads_command_line(self) -> bool {
        matches!(self, Self::CommandLineOnly | Self::EnvironmentOrCommandLine)
    }

    /// Returns `true` when environment variables are consulted.
    #[must_use]
    pub const fn reads_environment(self) -> bool {
        matches!(self, Self::EnvironmentOnly | Self::EnvironmentOrCommandLine)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CommandLineOnly => "command line",
            Self::EnvironmentOnly => "environment",
            Self::EnvironmentOrCommandLine => "command line or environment",
        })
    }
}

/// Immutable description of one configuration field.
///
/// # Examples
///
/// ```
/// use easy_config::{FieldSpec, SourceKind, TypeTag};
///
/// let spec = FieldSpec::env_or_cli("endpoint", "endpoint", TypeTag::Uri).required();
/// assert_eq!(spec.source_kind(), SourceKind::EnvironmentOrCommandLine);
/// assert!(spec.is_required());
/// assert_eq!(spec.default_value(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    name: Cow<'static, str>,
    value_type: TypeTag,
    source_kind: SourceKind,
    key: Cow<'static, str>,
    required: bool,
    default: Option<Cow<'static, str>>,
}

impl FieldSpec {
    /// Describes a field read from `source_kind` under `key`.
    #[must_use]
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        source_kind: SourceKind,
        key: impl Into<Cow<'static, str>>,
        value_type: TypeTag,
    ) -> Self {
        Self {
            name: name.into(),
            value_type,
            source_kind,
            key: key.into(),
            required: false,
            default: None,
        }
    }

    /// Describes a field read only from the environment variable `key`.
    #[must_use]
    pub fn env(
        name: impl Into<Cow<'static, str>>,
        key: impl Into<Cow<'static, str>>,
        value_type: TypeTag,
    ) -> Self {
        Self::new(name, SourceKind::EnvironmentOnly, key, value_type)
    }

    /// Describes a field read only from the command-line token `key=...`.
    #[must_use]
    pub fn cli(
        name: impl Into<Cow<'static, str>>,
        key: impl Into<Cow<'static, str>>,
        value_type: TypeTag,
    ) -> Self {
        Self::new(name, SourceKind::CommandLineOnly, key, value_type)
    }

    /// Describes a command-line field keyed on its own identifier.
    #[must_use]
    pub fn cli_named(name: &'static str, value_type: TypeTag) -> Self {
        Self::cli(name, name, value_type)
    }

    /// Describes a field read from the command line, falling back to the
    /// environment.
    #[must_use]
    pub fn env_or_cli(
        name: impl Into<Cow<'static, str>>,
        key: impl Into<Cow<'static, str>>,
        value_type: TypeTag,
    ) -> Self {
        Self::new(name, SourceKind::EnvironmentOrCommandLine, key, value_type)
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attaches a raw default used when no source supplies a value.
    ///
    /// A default takes precedence over [`FieldSpec::required`]: a field with
    /// both never reports a missing value.
    #[must_use]
    pub fn with_default(mut self, raw: impl Into<Cow<'static, str>>) -> Self {
        self.default = Some(raw.into());
        self
    }

    /// Public identifier of the field.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared value type.
    #[must_use]
    pub const fn value_type(&self) -> TypeTag {
        self.value_type
    }

    /// Source channel(s) consulted for this field.
    #[must_use]
    pub const fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    /// Lookup key used against arguments and environment.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the field must resolve to a value.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Raw default value, if declared.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }
}
