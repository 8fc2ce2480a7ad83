//! Typed configuration from `key=value` arguments and environment variables.
//!
//! Derive [`Populate`] on a struct with named fields and annotate each field
//! with the source it is read from:
//!
//! ```rust
//! use easy_config::{MapEnv, Populate};
//! use url::Url;
//!
//! #[derive(Debug, Populate)]
//! struct Settings {
//!     #[config(env_or_cli = "endpoint", required)]
//!     endpoint: Url,
//!     #[config(env = "APP_LABEL", default = "primary")]
//!     label: String,
//!     #[config(cli)]
//!     retries: Option<u8>,
//! }
//!
//! # fn main() -> Result<(), easy_config::ConfigError> {
//! let env = MapEnv::from_pairs([("endpoint", "http://env.example")]);
//! let settings = Settings::populate_from(["endpoint=http://cli.example", "retries=3"], &env)?;
//! assert_eq!(settings.endpoint.as_str(), "http://cli.example/");
//! assert_eq!(settings.label, "primary");
//! assert_eq!(settings.retries, Some(3));
//! # Ok(())
//! # }
//! ```
//!
//! Command-line values take precedence over environment variables for fields
//! that accept both. Resolution stops at the first field that is missing or
//! fails to convert.

pub use easy_config_macros::Populate;

mod binder;
mod convert;
pub mod docs;
mod error;
mod field;
mod lookup;
mod resolve;

pub use binder::Binder;
pub use convert::{ConversionError, FromRaw, TypeTag};
pub use error::{ConfigError, ConfigResult};
pub use field::{FieldSpec, SourceKind};
pub use lookup::{CommandLine, EnvSource, MapEnv, ProcessEnv, RawLookup};
pub use resolve::{ResolvedValue, ValueOrigin, resolve};
/// URI type backing fields declared as absolute URIs.
pub use url::Url;

/// Types whose fields can be bound from arguments and environment variables.
///
/// Usually derived. Hand-written implementations list their fields in
/// [`Populate::field_specs`] and read them back through the [`Binder`] in
/// [`Populate::bind`]:
///
/// ```rust
/// use easy_config::{Binder, ConfigResult, FieldSpec, FromRaw, MapEnv, Populate};
///
/// struct Limits {
///     max_connections: u32,
/// }
///
/// impl Populate for Limits {
///     fn field_specs() -> Vec<FieldSpec> {
///         vec![FieldSpec::env("max_connections", "MAX_CONNECTIONS", u32::TYPE_TAG)
///             .with_default("64")]
///     }
///
///     fn bind(binder: &Binder<'_>) -> ConfigResult<Self> {
///         Ok(Self {
///             max_connections: binder.value("max_connections")?,
///         })
///     }
/// }
///
/// let limits = Limits::populate_from(Vec::<String>::new(), &MapEnv::new()).ok();
/// assert_eq!(limits.map(|l| l.max_connections), Some(64));
/// ```
pub trait Populate: Sized {
    /// Metadata for every sourced field, in declaration order.
    ///
    /// Field names must be unique; the binder looks fields up by name.
    fn field_specs() -> Vec<FieldSpec>;

    /// Builds `Self` from the values exposed by `binder`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] reported by the binder.
    fn bind(binder: &Binder<'_>) -> ConfigResult<Self>;

    /// Populates `Self` from `args` and the process environment.
    ///
    /// The environment is read once, before any field is resolved.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] or [`ConfigError::TypeMismatch`] for
    /// the first field that cannot be satisfied.
    fn populate<I, S>(args: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::populate_from(args, &ProcessEnv)
    }

    /// Populates `Self` from `args` and the supplied environment source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] or [`ConfigError::TypeMismatch`] for
    /// the first field that cannot be satisfied.
    fn populate_from<I, S, E>(args: I, env: &E) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: EnvSource + ?Sized,
    {
        Self::populate_with(&RawLookup::capture(args, env))
    }

    /// Populates `Self` from a previously captured lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] or [`ConfigError::TypeMismatch`] for
    /// the first field that cannot be satisfied.
    fn populate_with(lookup: &RawLookup) -> ConfigResult<Self> {
        let binder = Binder::new(std::any::type_name::<Self>(), Self::field_specs(), lookup);
        Self::bind(&binder)
    }

    /// Populates `Self` from the running process's arguments (excluding the
    /// program name) and environment.
    ///
    /// A field whose argument or variable is set to bytes that are not valid
    /// UTF-8 fails with [`ConfigError::TypeMismatch`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] or [`ConfigError::TypeMismatch`] for
    /// the first field that cannot be satisfied.
    fn populate_from_process() -> ConfigResult<Self> {
        let command_line = CommandLine::parse_os(std::env::args_os().skip(1));
        Self::populate_with(&RawLookup::snapshot(command_line, &ProcessEnv))
    }
}

impl Populate for () {
    fn field_specs() -> Vec<FieldSpec> {
        Vec::new()
    }

    fn bind(_binder: &Binder<'_>) -> ConfigResult<Self> {
        Ok(())
    }
}

/// Populates `T` from `args` and the process environment.
///
/// Equivalent to [`Populate::populate`].
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] or [`ConfigError::TypeMismatch`] for the
/// first field that cannot be satisfied.
pub fn populate<T, I, S>(args: I) -> ConfigResult<T>
where
    T: Populate,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    T::populate(args)
}
