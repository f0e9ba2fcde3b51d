#![deny(unsafe_code)]

use std::fmt;

/// Document key derived from a group label.
///
/// Normalization is lossy: distinct labels may produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    /// Normalization used for phase categories.
    ///
    /// Lower-cases, maps spaces and hyphens to `_`, `&` to `and`, and drops
    /// parentheses and commas.
    pub fn safe(label: &str) -> Self {
        let mut key = String::with_capacity(label.len());
        for ch in label.to_lowercase().chars() {
            match ch {
                ' ' | '-' => key.push('_'),
                '&' => key.push_str("and"),
                '(' | ')' | ',' => {}
                other => key.push(other),
            }
        }
        Self(key)
    }

    /// Normalization used for cross-phase check types and eSTAR categories.
    pub fn simple(label: &str) -> Self {
        Self(label.to_lowercase().replace(' ', "_"))
    }

    /// First `len` characters of the key, upper-cased.
    pub fn abbrev(&self, len: usize) -> String {
        self.0.chars().take(len).collect::<String>().to_uppercase()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Synthesized check identifier, `<prefix>-<abbrev>-<seq>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CheckId(String);

impl CheckId {
    /// `seq` is 1-based and padded to at least three digits.
    pub fn compose(prefix: &str, abbrev: &str, seq: usize) -> Self {
        Self(format!("{prefix}-{abbrev}-{seq:03}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for CheckId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Longest display name emitted for a check.
pub const CHECK_NAME_MAX_CHARS: usize = 100;

/// Truncate to at most `max` characters without splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
