//! Submitted form data.
//!
//! A submission is an ordered list of single-key mappings, one per field.
//! Fields sharing a name produce separate entries; nothing is merged.

use std::fmt;

use formkit_core::FormkitResult;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One field's submitted value, serialized as `{"<name>": "<value>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    name: String,
    value: String,
}

impl FieldEntry {
    /// Creates an entry.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the submitted value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the entry as a one-key JSON object string.
    pub fn to_json(&self) -> FormkitResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for FieldEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.value)?;
        map.end()
    }
}

impl fmt::Display for FieldEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// The ordered result of a form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormData(Vec<FieldEntry>);

impl FormData {
    /// Creates empty form data.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: FieldEntry) {
        self.0.push(entry);
    }

    /// Returns the entries in field order.
    pub fn entries(&self) -> &[FieldEntry] {
        &self.0
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldEntry> {
        self.0.iter()
    }

    /// Returns every value submitted under `name`, in field order.
    pub fn values_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |entry| entry.name == name)
            .map(FieldEntry::value)
    }

    /// Returns the text shown in the toast: each entry's JSON, joined by `,`.
    pub fn toast_text(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Serializes the whole submission as a JSON array.
    pub fn to_json(&self) -> FormkitResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromIterator<FieldEntry> for FormData {
    fn from_iter<I: IntoIterator<Item = FieldEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FormData {
    type Item = FieldEntry;
    type IntoIter = std::vec::IntoIter<FieldEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FormData {
    type Item = &'a FieldEntry;
    type IntoIter = std::slice::Iter<'a, FieldEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
