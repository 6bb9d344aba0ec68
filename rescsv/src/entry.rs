use std::{borrow::Cow, fmt};

use crate::config::RES_LOCALE_DEFAULT;

/// One `key=value` line of a resource file.
///
/// The locale records which file the entry was read from or is destined for;
/// it is never written to the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    key: String,
    pub value: String,
    locale: String,
}

impl ResourceEntry {
    /// Creates an entry for the default locale.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_locale(key, value, "")
    }

    /// Creates an entry for `locale`; an empty locale means the default one.
    pub fn with_locale(
        key: impl Into<String>,
        value: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        let locale = locale.into();
        Self {
            key: key.into(),
            value: value.into(),
            locale: if locale.is_empty() {
                RES_LOCALE_DEFAULT.to_string()
            } else {
                locale
            },
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Whether `key` can be written as the left side of a `key=value` line.
    pub fn is_valid_key(key: &str) -> bool {
        !key.is_empty() && !key.contains(['=', '\n', '\r'])
    }

    /// Whether `value` spans more than one line.
    pub fn has_line_break(value: &str) -> bool {
        value.contains(['\n', '\r'])
    }

    /// Replaces every line break in `value` with the two-character `\n`
    /// escape, so the value stays on one `key=value` line.
    pub fn escape_line_breaks(value: &str) -> Cow<'_, str> {
        if !Self::has_line_break(value) {
            return Cow::Borrowed(value);
        }
        Cow::Owned(value.replace("\r\n", "\\n").replace(['\n', '\r'], "\\n"))
    }

    /// Whether `line` (without its line terminator) holds this entry's key,
    /// whatever its value.
    pub fn matches_line(&self, line: &str) -> bool {
        line_key(line) == Some(self.key.as_str())
    }
}

/// Key of a `key=value` line: everything before the first `=`.
pub(crate) fn line_key(line: &str) -> Option<&str> {
    match line.split_once('=') {
        Some((key, _)) if !key.is_empty() => Some(key),
        _ => None,
    }
}

impl fmt::Display for ResourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
