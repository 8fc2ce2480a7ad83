//! Raw value sources captured once per populate call.
//!
//! [`RawLookup`] freezes the parsed command-line arguments together with a
//! snapshot of the environment so that every field of a single call observes
//! the same inputs, even if the process environment changes concurrently.

use std::collections::HashMap;
use std::ffi::OsString;

mod args;
mod env;

pub use args::CommandLine;
pub use env::{EnvSource, MapEnv, ProcessEnv};

/// A captured value, kept even when its bytes are not valid UTF-8.
///
/// Non-UTF-8 values hold their lossy decoding so that errors can show what
/// was supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawText {
    Unicode(String),
    NotUnicode(String),
}

impl RawText {
    fn from_os(value: OsString) -> Self {
        match value.into_string() {
            Ok(text) => Self::Unicode(text),
            Err(bytes) => Self::NotUnicode(bytes.to_string_lossy().into_owned()),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        match self {
            Self::Unicode(text) | Self::NotUnicode(text) => text,
        }
    }

    pub(crate) const fn is_unicode(&self) -> bool {
        matches!(self, Self::Unicode(_))
    }

    fn unicode(&self) -> Option<&str> {
        match self {
            Self::Unicode(text) => Some(text),
            Self::NotUnicode(_) => None,
        }
    }
}

/// Immutable snapshot of command-line and environment values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLookup {
    command_line: CommandLine,
    environment: HashMap<String, RawText>,
}

impl RawLookup {
    /// Builds a lookup from already-parsed arguments and environment pairs.
    pub fn new<I, K, V>(command_line: CommandLine, environment: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            command_line,
            environment: environment
                .into_iter()
                .map(|(key, value)| (key.into(), RawText::Unicode(value.into())))
                .collect(),
        }
    }

    /// Parses `args` and snapshots every variable visible through `env`.
    ///
    /// # Examples
    ///
    /// ```
    /// use easy_config::{MapEnv, RawLookup};
    ///
    /// let env = MapEnv::from_pairs([("HOME", "/home/app")]);
    /// let lookup = RawLookup::capture(["mode=fast"], &env);
    /// assert_eq!(lookup.command_line("mode"), Some("fast"));
    /// assert_eq!(lookup.environment("HOME"), Some("/home/app"));
    /// ```
    pub fn capture<I, S, E>(args: I, env: &E) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: EnvSource + ?Sized,
    {
        Self::snapshot(CommandLine::parse(args), env)
    }

    /// Pairs already-parsed arguments with a snapshot of `env`.
    ///
    /// Environment values that are not valid UTF-8 stay in the snapshot so
    /// that a field reading them fails to convert instead of appearing unset.
    pub fn snapshot<E>(command_line: CommandLine, env: &E) -> Self
    where
        E: EnvSource + ?Sized,
    {
        Self {
            command_line,
            environment: env
                .vars()
                .map(|(key, value)| (key, RawText::from_os(value)))
                .collect(),
        }
    }

    /// Value supplied on the command line for `key`.
    ///
    /// Returns `None` for values that are not valid UTF-8.
    #[must_use]
    pub fn command_line(&self, key: &str) -> Option<&str> {
        self.command_line.get(key)
    }

    /// Value of the environment variable `key` at capture time.
    ///
    /// Returns `None` for values that are not valid UTF-8.
    #[must_use]
    pub fn environment(&self, key: &str) -> Option<&str> {
        self.environment.get(key).and_then(RawText::unicode)
    }

    pub(crate) fn command_line_entry(&self, key: &str) -> Option<&RawText> {
        self.command_line.entry(key)
    }

    pub(crate) fn environment_entry(&self, key: &str) -> Option<&RawText> {
        self.environment.get(key)
    }
}
