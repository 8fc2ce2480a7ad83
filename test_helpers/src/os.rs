//! Operating-system strings that are not valid UTF-8.

use std::ffi::OsString;

/// Returns `prefix` followed by a sequence that is not valid Unicode.
///
/// # Examples
///
/// ```
/// use easy_config_test_helpers::os;
///
/// let value = os::non_unicode("key=");
/// assert!(value.to_str().is_none());
/// assert!(value.to_string_lossy().starts_with("key="));
/// ```
#[cfg(unix)]
#[must_use]
pub fn non_unicode(prefix: &str) -> OsString {
    use std::os::unix::ffi::OsStringExt;

    let mut bytes = prefix.as_bytes().to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    OsString::from_vec(bytes)
}

/// Returns `prefix` followed by a sequence that is not valid Unicode.
#[cfg(windows)]
#[must_use]
pub fn non_unicode(prefix: &str) -> OsString {
    use std::os::windows::ffi::OsStringExt;

    let mut wide: Vec<u16> = prefix.encode_utf16().collect();
    wide.push(0xd800);
    OsString::from_wide(&wide)
}
