//! The tag table produced for one probed file.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Keys written by the derived-field extractor rather than read from tags.
pub mod keys {
    /// Total seconds with two decimals, e.g. `"302.63"`.
    pub const DURATION: &str = "duration";
    /// Bitrate in kb/s.
    pub const BITRATE: &str = "bitrate";
    /// Channel count.
    pub const CHANNELS: &str = "channels";
    /// `"true"` when embedded artwork was seen; absent otherwise.
    pub const HAS_PICTURE: &str = "has_picture";
}

/// Mapping from lowercased tag name to its values, in encounter order.
///
/// A key may hold several values (a container-level `title` and a
/// stream-level `title` both survive). Keys are never empty; a missing
/// field is a missing key, never an empty value list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMetadata {
    entries: Vec<(String, Vec<String>)>,
}

impl ParsedMetadata {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `key`, keeping any values already there.
    ///
    /// Empty keys are ignored.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        let value = value.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Replace every value under `key` with a single value.
    ///
    /// The key keeps its original position when it already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        let value = value.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1 = vec![value],
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Extend the most recent value under `key` with `text`.
    ///
    /// Returns `false` if the key is absent.
    pub fn extend_last(&mut self, key: &str, text: &str) -> bool {
        match self
            .position(key)
            .and_then(|idx| self.entries[idx].1.last_mut())
        {
            Some(last) => {
                last.push_str(text);
                true
            }
            None => false,
        }
    }

    /// All values for `key`, in encounter order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.position(key).map(|idx| self.entries[idx].1.as_slice())
    }

    /// The first value for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// `(key, values)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl Serialize for ParsedMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParsedMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut md = Self::new();
        for (k, v) in iter {
            md.append(k, v);
        }
        md
    }
}
