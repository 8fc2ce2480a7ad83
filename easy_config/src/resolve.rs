//! Source resolution with command-line precedence.
//!
//! Resolution is a pure lookup: it neither converts nor validates the raw
//! value and never consults a field's default.

use std::fmt;

use serde::Serialize;

use crate::field::{FieldSpec, SourceKind};
use crate::lookup::{RawLookup, RawText};

/// Where a raw value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOrigin {
    /// A `key=value` command-line token.
    CommandLine,
    /// A process environment variable.
    Environment,
    /// The field's declared default.
    Default,
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CommandLine => "command line",
            Self::Environment => "environment",
            Self::Default => "default",
        })
    }
}

/// Raw string found for a field together with its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedValue<'a> {
    /// Unconverted value.
    pub raw: &'a str,
    /// Source that supplied `raw`.
    pub origin: ValueOrigin,
    /// `raw` is a lossy decoding of a value that was not valid UTF-8.
    pub lossy: bool,
}

impl<'a> ResolvedValue<'a> {
    fn captured(text: &'a RawText, origin: ValueOrigin) -> Self {
        Self {
            raw: text.as_str(),
            origin,
            lossy: !text.is_unicode(),
        }
    }
}

/// Finds the raw value for `spec`, honouring its declared source kind.
///
/// For [`SourceKind::EnvironmentOrCommandLine`] the command line is checked
/// first so that ad hoc invocations override the environment.
///
/// # Examples
///
/// ```
/// use easy_config::{CommandLine, FieldSpec, RawLookup, TypeTag, ValueOrigin, resolve};
///
/// let spec = FieldSpec::env_or_cli("level", "LEVEL", TypeTag::String);
/// let lookup = RawLookup::new(CommandLine::parse(["LEVEL=debug"]), [("LEVEL", "info")]);
/// let found = resolve(&spec, &lookup).map(|value| (value.raw, value.origin));
/// assert_eq!(found, Some(("debug", ValueOrigin::CommandLine)));
/// ```
#[must_use]
pub fn resolve<'a>(spec: &FieldSpec, lookup: &'a RawLookup) -> Option<ResolvedValue<'a>> {
    let key = spec.key();
    let from_command_line = || {
        lookup
            .command_line_entry(key)
            .map(|text| ResolvedValue::captured(text, ValueOrigin::CommandLine))
    };
    let from_environment = || {
        lookup
            .environment_entry(key)
            .map(|text| ResolvedValue::captured(text, ValueOrigin::Environment))
    };
    match spec.source_kind() {
        SourceKind::CommandLineOnly => from_command_line(),
        SourceKind::EnvironmentOnly => from_environment(),
        SourceKind::EnvironmentOrCommandLine => from_command_line().or_else(from_environment),
    }
}
