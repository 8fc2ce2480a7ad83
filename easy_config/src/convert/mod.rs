//! Strict conversion of raw strings into typed field values.
//!
//! Every type that can back a configuration field implements [`FromRaw`].
//! Conversions never trim or coerce: a value either parses exactly or yields
//! an error that the binder reports as a type mismatch.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use url::Url;


/// Error produced by a failed conversion.
pub type ConversionError = Box<dyn std::error::Error + Send + Sync>;

/// Declared value type of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TypeTag {
    /// UTF-8 text, assigned verbatim.
    String,
    /// Base-10 integer.
    Integer {
        /// Whether negative values are accepted.
        signed: bool,
        /// Width of the integer in bits.
        bits: u32,
    },
    /// Floating point number, as accepted by Rust's `FromStr` (including
    /// `NaN` and `inf`).
    Float {
        /// Width of the float in bits.
        bits: u32,
    },
    /// `true` or `false`.
    Bool,
    /// Exactly one character.
    Char,
    /// Absolute URI.
    Uri,
    /// Filesystem path.
    Path,
    /// IPv4 or IPv6 address.
    IpAddr,
    /// IP address with port.
    SocketAddr,
    /// Whole number of seconds.
    Duration,
    /// Type supplied by the caller.
    Custom {
        /// Human-readable type name.
        name: &'static str,
    },
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer { signed: true, bits } => write!(f, "signed {bits}-bit integer"),
            Self::Integer { signed: false, bits } => write!(f, "unsigned {bits}-bit integer"),
            Self::Float { bits } => write!(f, "{bits}-bit float"),
            Self::Bool => f.write_str("boolean"),
            Self::Char => f.write_str("character"),
            Self::Uri => f.write_str("absolute URI"),
            Self::Path => f.write_str("path"),
            Self::IpAddr => f.write_str("IP address"),
            Self::SocketAddr => f.write_str("socket address"),
            Self::Duration => f.write_str("duration in seconds"),
            Self::Custom { name } => f.write_str(name),
        }
    }
}

/// Types constructible from a raw configuration string.
///
/// # Examples
///
/// ```
/// use easy_config::{ConversionError, FromRaw, TypeTag};
///
/// struct Port(u16);
///
/// impl FromRaw for Port {
///     const TYPE_TAG: TypeTag = TypeTag::Custom { name: "port" };
///
///     fn from_raw(raw: &str) -> Result<Self, ConversionError> {
///         Ok(Self(u16::from_raw(raw)?))
///     }
/// }
///
/// assert!(Port::from_raw("8080").is_ok());
/// assert!(Port::from_raw("http").is_err());
/// ```
pub trait FromRaw: Sized {
    /// Type reported in metadata and mismatch errors.
    const TYPE_TAG: TypeTag;

    /// Parses `raw` strictly.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] describing why `raw` is not a valid
    /// value of this type.
    fn from_raw(raw: &str) -> Result<Self, ConversionError>;
}

#[derive(Debug, Error)]
#[error("expected `true` or `false`")]
struct InvalidBool;

#[derive(Debug, Error)]
#[error("expected exactly one character, found {0}")]
struct InvalidChar(usize);

#[derive(Debug, Error)]
#[error("path must not be empty")]
struct EmptyPath;

/// Raised for values whose bytes are not valid UTF-8, whatever the field type.
#[derive(Debug, Error)]
#[error("value is not valid UTF-8")]
pub(crate) struct NotUnicode;

impl FromRaw for String {
    const TYPE_TAG: TypeTag = TypeTag::String;

    fn from_raw(raw: &str) -> Result<Self, ConversionError> {
        Ok(raw.to_owned())
    }
}

impl FromRaw for bool {
    const TYPE_TAG: TypeTag = TypeTag::Bool;

    fn from_raw(raw: &str) -> Result<Self, ConversionError> {
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(Box::new(InvalidBool))
        }
    }
}

impl FromRaw for char {
    const TYPE_TAG: TypeTag = TypeTag::Char;

    fn from_raw(raw: &str) -> Result<Self, ConversionError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Box::new(InvalidChar(raw.chars().count()))),
        }
    }
}

impl FromRaw for Url {
    const TYPE_TAG: TypeTag = TypeTag::Uri;

    fn from_raw(raw: &str) -> Result<Self, ConversionError> {
        Ok(Self::parse(raw)?)
    }
}

impl FromRaw for PathBuf {
    const TYPE_TAG: TypeTag = TypeTag::Path;

    fn from_raw(raw: &str) -> Result<Self, ConversionError> {
        if raw.is_empty() {
            return Err(Box::new(EmptyPath));
        }
        Ok(Self::from(raw))
    }
}

impl FromRaw for Duration {
    const TYPE_TAG: TypeTag = TypeTag::Duration;

    fn from_raw(raw: &str) -> Result<Self, ConversionError> {
        Ok(Self::from_secs(raw.parse::<u64>()?))
    }
}

macro_rules! from_str_impls {
    ($($ty:ty => $tag:expr),* $(,)?) => {
        $(
            impl FromRaw for $ty {
                const TYPE_TAG: TypeTag = $tag;

                fn from_raw(raw: &str) -> Result<Self, ConversionError> {
                    Ok(raw.parse::<$ty>()?)
                }
            }
        )*
    };
}

macro_rules! integer_impls {
    ($signed:literal: $($ty:ty),*) => {
        from_str_impls!($($ty => TypeTag::Integer { signed: $signed, bits: <$ty>::BITS }),*);
    };
}

integer_impls!(true: i8, i16, i32, i64, i128, isize);
integer_impls!(false: u8, u16, u32, u64, u128, usize);

from_str_impls!(
    f32 => TypeTag::Float { bits: 32 },
    f64 => TypeTag::Float { bits: 64 },
    IpAddr => TypeTag::IpAddr,
    SocketAddr => TypeTag::SocketAddr,
);
