//! Constructors and accessors for `ConfigError`.

use crate::convert::ConversionError;
use crate::field::FieldSpec;
use crate::resolve::ResolvedValue;

use super::ConfigError;

impl ConfigError {
    /// Builds a missing-value error for `spec`.
    ///
    /// # Examples
    ///
    /// ```
    /// use easy_config::{ConfigError, FieldSpec, TypeTag};
    ///
    /// let spec = FieldSpec::env("token", "API_TOKEN", TypeTag::String).required();
    /// let err = ConfigError::missing(&spec);
    /// assert!(err.is_missing());
    /// assert_eq!(err.field(), "token");
    /// ```
    #[must_use]
    pub fn missing(spec: &FieldSpec) -> Self {
        Self::Missing {
            field: spec.name().to_owned(),
            source_kind: spec.source_kind(),
            key: spec.key().to_owned(),
        }
    }

    /// Builds a type-mismatch error for `spec` from the value that failed.
    #[must_use]
    pub fn type_mismatch(
        spec: &FieldSpec,
        value: ResolvedValue<'_>,
        reason: ConversionError,
    ) -> Self {
        Self::TypeMismatch {
            field: spec.name().to_owned(),
            raw: value.raw.to_owned(),
            expected: spec.value_type(),
            origin: value.origin,
            reason,
        }
    }

    /// Builds an error for a binder asking about an undeclared field.
    #[must_use]
    pub fn unknown_field(type_name: &'static str, field: &str) -> Self {
        Self::UnknownField {
            type_name,
            field: field.to_owned(),
        }
    }

    /// Identifier of the field that failed.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::UnknownField { field, .. } => field,
        }
    }

    /// Returns `true` for [`ConfigError::Missing`].
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    /// Returns `true` for [`ConfigError::TypeMismatch`].
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}
