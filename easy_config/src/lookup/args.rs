//! Parsing of `key=value` command-line tokens.

use std::collections::HashMap;
use std::ffi::OsStr;

use super::RawText;

/// Command-line arguments parsed into a key/value map.
///
/// Each token is split at its first `=`: the key is everything before it and
/// the value is everything after it, verbatim. Tokens without `=` and tokens
/// with an empty key are skipped. When a key repeats, the last token wins.
///
/// # Examples
///
/// ```
/// use easy_config::CommandLine;
///
/// let args = CommandLine::parse(["endpoint=http://host/?a=b", "verbose", "n=1", "n=2"]);
/// assert_eq!(args.get("endpoint"), Some("http://host/?a=b"));
/// assert_eq!(args.get("verbose"), None);
/// assert_eq!(args.get("n"), Some("2"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    values: HashMap<String, RawText>,
}

impl CommandLine {
    /// Parses `args` into a key/value map.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut line = Self::default();
        for (position, arg) in args.into_iter().enumerate() {
            line.insert(position, arg.as_ref(), true);
        }
        line
    }

    /// Parses operating-system arguments into a key/value map.
    ///
    /// A token whose value is not valid UTF-8 is kept, so a field reading it
    /// fails to convert rather than appearing unset. Tokens whose key is not
    /// valid UTF-8 cannot match any field and are skipped.
    pub fn parse_os<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut line = Self::default();
        for (position, arg) in args.into_iter().enumerate() {
            let arg = arg.as_ref();
            match arg.to_str() {
                Some(token) => line.insert(position, token, true),
                None => line.insert(position, &arg.to_string_lossy(), false),
            }
        }
        line
    }

    fn insert(&mut self, position: usize, token: &str, unicode: bool) {
        match token.split_once('=') {
            Some((key, value))
                if !key.is_empty() && (unicode || !key.contains(char::REPLACEMENT_CHARACTER)) =>
            {
                let value = value.to_owned();
                let text = if unicode {
                    RawText::Unicode(value)
                } else {
                    RawText::NotUnicode(value)
                };
                self.values.insert(key.to_owned(), text);
            }
            _ => tracing::trace!(position, "skipping argument that is not a key=value pair"),
        }
    }

    /// Returns the value supplied for `key`, if it is valid UTF-8.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(RawText::unicode)
    }

    /// Number of distinct keys supplied.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no key/value pairs were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn entry(&self, key: &str) -> Option<&RawText> {
        self.values.get(key)
    }
}

impl<K, V> FromIterator<(K, V)> for CommandLine
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), RawText::Unicode(value.into())))
                .collect(),
        }
    }
}
