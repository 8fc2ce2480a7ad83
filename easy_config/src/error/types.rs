//! Primary error enum for populate calls.

use thiserror::Error;

use crate::convert::{ConversionError, TypeTag};
use crate::field::SourceKind;
use crate::resolve::ValueOrigin;

/// Result alias used throughout the crate.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that abort a populate call.
///
/// Only the first failing field is reported.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required field had no value in any of its sources and no default.
    #[error("missing required configuration '{field}': no value for `{key}` in {source_kind}")]
    Missing {
        /// Identifier of the field.
        field: String,
        /// Source channel(s) that were checked.
        source_kind: SourceKind,
        /// Lookup key checked in each channel.
        key: String,
    },

    /// A raw value could not be converted to the field's declared type.
    #[error("invalid {origin} value {raw:?} for '{field}': expected {expected}: {reason}")]
    TypeMismatch {
        /// Identifier of the field.
        field: String,
        /// Offending raw value.
        raw: String,
        /// Declared type of the field.
        expected: TypeTag,
        /// Source that supplied `raw`.
        origin: ValueOrigin,
        /// Underlying conversion failure.
        #[source]
        reason: ConversionError,
    },

    /// A binder requested a field that has no metadata entry.
    #[error("configuration type `{type_name}` has no field metadata for '{field}'")]
    UnknownField {
        /// Type being populated.
        type_name: &'static str,
        /// Field that was requested.
        field: String,
    },
}
