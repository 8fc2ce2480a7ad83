//! Environment variable sources.
//!
//! [`EnvSource`] abstracts over the process environment so callers can bind
//! configuration against an in-memory map without touching global state.

use std::collections::HashMap;
use std::ffi::OsString;

/// Enumerates the variables of an environment.
///
/// Keys are matched exactly and case-sensitively. Values are passed through
/// as [`OsString`] so that values which are not valid UTF-8 stay visible.
pub trait EnvSource {
    /// Iterates over every variable visible through this source.
    fn vars(&self) -> Box<dyn Iterator<Item = (String, OsString)> + '_>;
}

/// Environment source backed by the running process.
///
/// Variables whose name is not valid UTF-8 are skipped, since no field key
/// can name them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn vars(&self) -> Box<dyn Iterator<Item = (String, OsString)> + '_> {
        Box::new(
            std::env::vars_os().filter_map(|(key, value)| Some((key.into_string().ok()?, value))),
        )
    }
}

/// Environment source backed by an in-memory map.
///
/// # Examples
///
/// ```
/// use easy_config::MapEnv;
///
/// let env = MapEnv::from_pairs([("APP_PORT", "8080")]);
/// assert_eq!(env.get("APP_PORT"), Some("8080"));
/// assert_eq!(env.get("app_port"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Removes `key`.
    pub fn remove(&mut self, key: &str) {
        self.vars.remove(key);
    }
}

impl EnvSource for MapEnv {
    fn vars(&self) -> Box<dyn Iterator<Item = (String, OsString)> + '_> {
        Box::new(
            self.vars
                .iter()
                .map(|(key, value)| (key.clone(), OsString::from(value))),
        )
    }
}
