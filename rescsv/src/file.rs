//! In-memory model of one `.properties` resource file.
//!
//! Only `key=value` lines with a non-empty value are modelled. Comments, blank
//! lines and `key=` lines are not entries; they survive imports because the
//! on-disk text is patched (see [`crate::patch`]) rather than re-rendered.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{entry::ResourceEntry, file_name::FileNameCodec};

lazy_static! {
    static ref ENTRY_LINE_REGEX: Regex = Regex::new(r"(?m)^([^=\r\n]+)=([^\r\n]+)\r?$").unwrap();
}

/// Iterates over the `(key, value)` pairs of every entry line in `content`.
///
/// The iterator holds no state beyond the text it borrows; calling this again
/// restarts from the top.
pub fn entry_lines(content: &str) -> impl Iterator<Item = (&str, &str)> {
    ENTRY_LINE_REGEX.captures_iter(content).filter_map(|caps| {
        let key = caps.get(1)?.as_str();
        let value = caps.get(2)?.as_str();
        Some((key, value))
    })
}

/// An ordered set of entries backing one physical file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFile {
    origin_file: String,
    entries: Vec<ResourceEntry>,
}

impl ResourceFile {
    /// Creates an empty file model for `origin_file`.
    pub fn new(origin_file: impl Into<String>) -> Self {
        Self {
            origin_file: origin_file.into(),
            entries: Vec::new(),
        }
    }

    /// Creates a file model holding `entries` exactly as given.
    pub fn with_entries(origin_file: impl Into<String>, entries: Vec<ResourceEntry>) -> Self {
        Self {
            origin_file: origin_file.into(),
            entries,
        }
    }

    /// Parses `content` read from `file_name` using the default naming.
    ///
    /// `main_id` is the fileId (or base file name) of the family being read; it
    /// decides which locale the entries are attributed to.
    pub fn parse(file_name: &str, content: &str, main_id: &str) -> Self {
        Self::parse_with(&FileNameCodec::default(), file_name, content, main_id)
    }

    /// Like [`ResourceFile::parse`] with an explicit naming codec.
    pub fn parse_with(codec: &FileNameCodec, file_name: &str, content: &str, main_id: &str) -> Self {
        let locale = derive_locale(codec, file_name, main_id);
        let entries = entry_lines(content)
            .map(|(key, value)| ResourceEntry::with_locale(key, value, locale.as_str()))
            .collect();

        Self::with_entries(file_name, entries)
    }

    pub fn origin_file(&self) -> &str {
        &self.origin_file
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceEntry> {
        self.entries.iter()
    }

    /// Keys in entry order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(ResourceEntry::key)
    }

    /// The last entry with `key`, if any.
    pub fn get_entry(&self, key: &str) -> Option<&ResourceEntry> {
        self.entries.iter().rev().find(|entry| entry.key() == key)
    }

    /// Value of the last entry with `key`, or an empty string.
    pub fn get_value(&self, key: &str) -> &str {
        self.get_entry(key).map(ResourceEntry::value).unwrap_or("")
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key() == key)
    }

    /// Updates the value of an existing key in place, or appends the entry.
    ///
    /// Any later duplicates of the key are dropped so the updated value is the
    /// one every lookup sees.
    pub fn set_entry(&mut self, entry: ResourceEntry) {
        match self.entries.iter().position(|e| e.key() == entry.key()) {
            Some(index) => {
                self.entries[index].value = entry.value;
                let key = self.entries[index].key().to_string();
                let mut position = 0;
                self.entries.retain(|e| {
                    let keep = position <= index || e.key() != key;
                    position += 1;
                    keep
                });
            }
            None => self.entries.push(entry),
        }
    }

    /// Removes every entry with `key`.
    pub fn remove(&mut self, key: &str) {
        self.entries.retain(|entry| entry.key() != key);
    }

    /// Entries of `new` whose key is absent from `old`: the entries to add.
    pub fn entries_diff(old: &ResourceFile, new: &ResourceFile) -> ResourceFile {
        let mut result = ResourceFile::new(new.origin_file.clone());

        for entry in &new.entries {
            if !old.has_key(entry.key()) {
                result.set_entry(entry.clone());
            }
        }

        result
    }

    /// For every entry of `old`, its value in `new` when that value differs.
    ///
    /// A key missing from `new` reads as an empty value and is reported as
    /// updated to empty.
    pub fn updated_entries(old: &ResourceFile, new: &ResourceFile) -> ResourceFile {
        let mut result = ResourceFile::new(new.origin_file.clone());

        for entry in &old.entries {
            let new_value = new.get_value(entry.key());
            if entry.value() != new_value {
                result.set_entry(ResourceEntry::with_locale(
                    entry.key(),
                    new_value,
                    entry.locale(),
                ));
            }
        }

        result
    }
}

fn derive_locale(codec: &FileNameCodec, file_name: &str, main_id: &str) -> String {
    let ext = codec.config().dotted_extension();
    let main_id = main_id.strip_suffix(ext.as_str()).unwrap_or(main_id);

    if !main_id.is_empty() {
        let stem = file_name.strip_suffix(ext.as_str()).unwrap_or(file_name);
        if stem == main_id {
            return codec.config().default_locale.clone();
        }
        if let Some(locale) = stem
            .strip_prefix(main_id)
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|locale| !locale.is_empty())
        {
            return locale.to_string();
        }
    }

    codec.parse(file_name).locale
}

impl<'a> IntoIterator for &'a ResourceFile {
    type Item = &'a ResourceEntry;
    type IntoIter = std::slice::Iter<'a, ResourceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for ResourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}
