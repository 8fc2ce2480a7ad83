//! Serializable description of a configuration type.
//!
//! Tooling can turn [`ConfigDocs`] into usage text, man pages or shell
//! completions; the library itself renders nothing.

use serde::Serialize;

use crate::Populate;
use crate::convert::TypeTag;
use crate::field::{FieldSpec, SourceKind};

/// Current schema version of [`ConfigDocs`].
pub const DOCS_VERSION: &str = "1.0";

/// Description of every sourced field of a configuration type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigDocs {
    /// Schema version, see [`DOCS_VERSION`].
    pub version: &'static str,
    /// Rust type name of the configuration struct.
    pub type_name: &'static str,
    /// Fields in declaration order.
    pub fields: Vec<FieldDoc>,
}

/// Description of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDoc {
    /// Field identifier.
    pub name: String,
    /// Source channel(s) consulted.
    pub source: SourceKind,
    /// Command-line key, when the command line is consulted.
    pub cli_key: Option<String>,
    /// Environment variable, when the environment is consulted.
    pub env_var: Option<String>,
    /// Whether the field must resolve to a value.
    pub required: bool,
    /// Raw default value.
    pub default: Option<String>,
    /// Declared value type.
    pub value_type: TypeTag,
}

impl From<&FieldSpec> for FieldDoc {
    fn from(spec: &FieldSpec) -> Self {
        let kind = spec.source_kind();
        Self {
            name: spec.name().to_owned(),
            source: kind,
            cli_key: kind.reads_command_line().then(|| spec.key().to_owned()),
            env_var: kind.reads_environment().then(|| spec.key().to_owned()),
            required: spec.is_required() && spec.default_value().is_none(),
            default: spec.default_value().map(str::to_owned),
            value_type: spec.value_type(),
        }
    }
}

impl ConfigDocs {
    /// Renders the description as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Describes the fields of `T`.
///
/// # Examples
///
/// ```
/// use easy_config::{Populate, docs};
///
/// #[derive(Populate)]
/// struct Settings {
///     #[config(env_or_cli = "number", required)]
///     number: i32,
/// }
///
/// let described = docs::describe::<Settings>();
/// assert_eq!(described.fields.len(), 1);
/// assert!(described.fields[0].required);
/// ```
#[must_use]
pub fn describe<T: Populate>() -> ConfigDocs {
    ConfigDocs {
        version: DOCS_VERSION,
        type_name: std::any::type_name::<T>(),
        fields: T::field_specs().iter().map(FieldDoc::from).collect(),
    }
}
