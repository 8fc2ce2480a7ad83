//! Policy enforcement and conversion for individual fields.
//!
//! A [`Binder`] pairs the field metadata of one configuration type with a
//! captured [`RawLookup`]. Generated (or hand-written) `bind` functions ask
//! it for each field in declaration order and stop at the first error.

use crate::convert::{FromRaw, NotUnicode};
use crate::error::{ConfigError, ConfigResult};
use crate::field::FieldSpec;
use crate::lookup::RawLookup;
use crate::resolve::{ResolvedValue, ValueOrigin, resolve};

#[cfg(test)]
mod tests;

/// Resolves, applies policy to, and converts fields of one configuration type.
///
/// # Examples
///
/// ```
/// use easy_config::{Binder, CommandLine, FieldSpec, RawLookup, TypeTag};
///
/// let specs = vec![
///     FieldSpec::env_or_cli("number", "number", TypeTag::Integer { signed: true, bits: 32 })
///         .required(),
///     FieldSpec::env("label", "APP_LABEL", TypeTag::String).with_default("none"),
/// ];
/// let lookup = RawLookup::new(CommandLine::parse(["number=7"]), Vec::<(String, String)>::new());
/// let binder = Binder::new("Demo", specs, &lookup);
///
/// assert_eq!(binder.value::<i32>("number").ok(), Some(7));
/// assert_eq!(binder.value::<String>("label").ok().as_deref(), Some("none"));
/// ```
#[derive(Debug)]
pub struct Binder<'a> {
    type_name: &'static str,
    specs: Vec<FieldSpec>,
    lookup: &'a RawLookup,
}

impl<'a> Binder<'a> {
    /// Creates a binder for `type_name` over `specs`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if two specs share a field name.
    #[must_use]
    pub fn new(type_name: &'static str, specs: Vec<FieldSpec>, lookup: &'a RawLookup) -> Self {
        debug_assert!(
            duplicate_name(&specs).is_none(),
            "{type_name} declares field {:?} more than once",
            duplicate_name(&specs).unwrap_or_default()
        );
        Self {
            type_name,
            specs,
            lookup,
        }
    }

    /// Field metadata in declaration order.
    #[must_use]
    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    /// Binds a field whose type has no natural empty value.
    ///
    /// The field must resolve from a source or its default; otherwise a
    /// [`ConfigError::Missing`] is returned even if the field was not marked
    /// required.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`], [`ConfigError::TypeMismatch`] or
    /// [`ConfigError::UnknownField`].
    pub fn value<T: FromRaw>(&self, name: &str) -> ConfigResult<T> {
        let spec = self.spec(name)?;
        match self.raw_value(spec)? {
            Some(value) => convert(spec, value),
            None => Err(ConfigError::missing(spec)),
        }
    }

    /// Binds a field, falling back to `T::default()` when it is optional and
    /// unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`], [`ConfigError::TypeMismatch`] or
    /// [`ConfigError::UnknownField`].
    pub fn value_or_default<T: FromRaw + Default>(&self, name: &str) -> ConfigResult<T> {
        Ok(self.optional(name)?.unwrap_or_default())
    }

    /// Binds an `Option<T>` field, yielding `None` when it is optional and
    /// unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`], [`ConfigError::TypeMismatch`] or
    /// [`ConfigError::UnknownField`].
    pub fn optional<T: FromRaw>(&self, name: &str) -> ConfigResult<Option<T>> {
        let spec = self.spec(name)?;
        self.raw_value(spec)?
            .map(|value| convert(spec, value))
            .transpose()
    }

    fn spec(&self, name: &str) -> ConfigResult<&FieldSpec> {
        self.specs
            .iter()
            .find(|spec| spec.name() == name)
            .ok_or_else(|| ConfigError::unknown_field(self.type_name, name))
    }

    /// Applies the required/default/optional policy to the resolved value.
    fn raw_value<'s>(&'s self, spec: &'s FieldSpec) -> ConfigResult<Option<ResolvedValue<'s>>> {
        if let Some(value) = resolve(spec, self.lookup) {
            tracing::debug!(
                config = self.type_name,
                field = spec.name(),
                key = spec.key(),
                origin = %value.origin,
                "resolved configuration field"
            );
            return Ok(Some(value));
        }
        if let Some(raw) = spec.default_value() {
            tracing::debug!(
                config = self.type_name,
                field = spec.name(),
                "using declared default for configuration field"
            );
            return Ok(Some(ResolvedValue {
                raw,
                origin: ValueOrigin::Default,
                lossy: false,
            }));
        }
        if spec.is_required() {
            return Err(ConfigError::missing(spec));
        }
        tracing::debug!(
            config = self.type_name,
            field = spec.name(),
            "optional configuration field left unset"
        );
        Ok(None)
    }
}

fn duplicate_name(specs: &[FieldSpec]) -> Option<&str> {
    specs.iter().enumerate().find_map(|(index, spec)| {
        specs
            .iter()
            .skip(index + 1)
            .any(|other| other.name() == spec.name())
            .then(|| spec.name())
    })
}

fn convert<T: FromRaw>(spec: &FieldSpec, value: ResolvedValue<'_>) -> ConfigResult<T> {
    if value.lossy {
        return Err(ConfigError::type_mismatch(spec, value, Box::new(NotUnicode)));
    }
    T::from_raw(value.raw).map_err(|reason| ConfigError::type_mismatch(spec, value, reason))
}
