//! Line-oriented edits of an existing resource file.
//!
//! A [`FilePatch`] is computed from the parsed on-disk state and the desired
//! state, then applied to the original text. Lines are matched by the literal
//! key before their first `=`; every line the patch does not touch is copied
//! through byte for byte, line terminators included.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{
    entry::{ResourceEntry, line_key},
    file::ResourceFile,
};

/// Edits turning one version of a resource file into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePatch {
    /// Keys whose lines are deleted.
    pub removed: Vec<String>,
    /// Entries rewritten on the line that already holds their key.
    pub updated: ResourceFile,
    /// Entries not present yet.
    pub added: ResourceFile,
}

/// Number of entries a patch touches, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PatchStats {
    pub deleted: usize,
    pub updated: usize,
    pub added: usize,
}

impl std::ops::AddAssign for PatchStats {
    fn add_assign(&mut self, other: Self) {
        self.deleted += other.deleted;
        self.updated += other.updated;
        self.added += other.added;
    }
}

impl FilePatch {
    /// Computes the edits from `current` (parsed from disk) to `desired`.
    ///
    /// With `delete_missing`, keys present in `current` but absent from
    /// `desired` are deleted; otherwise they are blanked to `key=`.
    pub fn compute(current: &ResourceFile, desired: &ResourceFile, delete_missing: bool) -> Self {
        let mut updated = ResourceFile::updated_entries(current, desired);
        let added = ResourceFile::entries_diff(current, desired);

        let mut removed = Vec::new();
        if delete_missing {
            let unused = ResourceFile::entries_diff(desired, current);
            for entry in &unused {
                updated.remove(entry.key());
                removed.push(entry.key().to_string());
            }
        }

        Self {
            removed,
            updated,
            added,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.updated.is_empty() && self.added.is_empty()
    }

    pub fn stats(&self) -> PatchStats {
        PatchStats {
            deleted: self.removed.len(),
            updated: self.updated.len(),
            added: self.added.len(),
        }
    }

    /// Applies the edits to `text`.
    ///
    /// Removed keys lose every line that holds them, updated keys have every
    /// such line rewritten, and added keys take over a blank `key=` line when
    /// one exists. The remaining added entries are appended at the end.
    pub fn apply(&self, text: &str) -> String {
        let removed: HashSet<&str> = self.removed.iter().map(String::as_str).collect();
        let updated: HashMap<&str, &ResourceEntry> =
            self.updated.iter().map(|entry| (entry.key(), entry)).collect();
        let mut pending: HashMap<&str, &ResourceEntry> =
            self.added.iter().map(|entry| (entry.key(), entry)).collect();

        let mut result = String::with_capacity(text.len());
        for line in text.split_inclusive('\n') {
            let body = line.strip_suffix('\n').unwrap_or(line);
            let body = body.strip_suffix('\r').unwrap_or(body);
            let ending = &line[body.len()..];

            let Some(key) = line_key(body) else {
                result.push_str(line);
                continue;
            };

            if removed.contains(key) {
                continue;
            }

            let replacement = updated.get(key).copied().or_else(|| {
                let is_blank = body.len() == key.len() + 1;
                if is_blank { pending.remove(key) } else { None }
            });

            match replacement {
                Some(entry) => {
                    result.push_str(&entry.to_string());
                    result.push_str(ending);
                }
                None => result.push_str(line),
            }
        }

        let appended: Vec<&ResourceEntry> = self
            .added
            .iter()
            .filter(|entry| pending.contains_key(entry.key()))
            .collect();
        if !appended.is_empty() {
            if !result.is_empty() && !result.ends_with('\n') {
                result.push('\n');
            }
            for entry in appended {
                result.push_str(&entry.to_string());
                result.push('\n');
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn file(entries: &[(&str, &str)]) -> ResourceFile {
        ResourceFile::with_entries(
            "origin.properties",
            entries
                .iter()
                .map(|(k, v)| ResourceEntry::new(*k, *v))
                .collect(),
        )
    }

    #[test]
    fn test_update_in_place_keeps_other_lines() {
        let text = indoc! {"
            # Account labels
            label=Account

            title=Title
        "};
        let current = ResourceFile::parse("origin.properties", text, "origin");
        let desired = file(&[("label", "Konto"), ("title", "Title")]);

        let patch = FilePatch::compute(&current, &desired, false);
        assert_eq!(patch.stats(), PatchStats { deleted: 0, updated: 1, added: 0 });
        assert_eq!(
            patch.apply(text),
            indoc! {"
                # Account labels
                label=Konto

                title=Title
            "}
        );
    }

    #[test]
    fn test_missing_key_is_blanked_without_delete() {
        let text = "label=Account\noldKey=X\n";
        let current = ResourceFile::parse("origin.properties", text, "origin");
        let desired = file(&[("label", "Account")]);

        let patch = FilePatch::compute(&current, &desired, false);
        assert_eq!(patch.apply(text), "label=Account\noldKey=\n");
    }

    #[test]
    fn test_missing_key_is_deleted_with_delete() {
        let text = "label=Account\noldKey=X\ntail=T\n";
        let current = ResourceFile::parse("origin.properties", text, "origin");
        let desired = file(&[("label", "Account"), ("tail", "T")]);

        let patch = FilePatch::compute(&current, &desired, true);
        assert_eq!(patch.stats(), PatchStats { deleted: 1, updated: 0, added: 0 });
        assert_eq!(patch.apply(text), "label=Account\ntail=T\n");
    }

    #[test]
    fn test_added_entries_append() {
        let current = file(&[("label", "Account")]);
        let desired = file(&[("label", "Account"), ("newKey", "NewVal")]);
        let patch = FilePatch::compute(&current, &desired, false);

        assert_eq!(patch.apply("label=Account\n"), "label=Account\nnewKey=NewVal\n");
        assert_eq!(patch.apply("label=Account"), "label=Account\nnewKey=NewVal\n");
    }

    #[test]
    fn test_added_entries_into_empty_text() {
        let desired = file(&[("a", "1"), ("b", "2")]);
        let patch = FilePatch::compute(&ResourceFile::new("x.properties"), &desired, false);
        assert_eq!(patch.apply(""), "a=1\nb=2\n");
    }

    #[test]
    fn test_added_entry_fills_blank_line() {
        let text = "first=1\nempty=\nlast=3\n";
        let current = ResourceFile::parse("origin.properties", text, "origin");
        let desired = file(&[("first", "1"), ("empty", "now set"), ("last", "3")]);

        let patch = FilePatch::compute(&current, &desired, false);
        assert_eq!(patch.stats().added, 1);
        assert_eq!(patch.apply(text), "first=1\nempty=now set\nlast=3\n");
    }

    #[test]
    fn test_keys_are_matched_literally() {
        let text = "a.b=1\naxb=2\n";
        let current = ResourceFile::parse("origin.properties", text, "origin");
        let desired = file(&[("a.b", "changed"), ("axb", "2")]);

        let patch = FilePatch::compute(&current, &desired, false);
        assert_eq!(patch.apply(text), "a.b=changed\naxb=2\n");
    }

    #[test]
    fn test_crlf_line_endings_are_preserved() {
        let text = "a=1\r\nb=2\r\n";
        let current = ResourceFile::parse("origin.properties", text, "origin");
        let desired = file(&[("a", "one"), ("b", "2")]);

        let patch = FilePatch::compute(&current, &desired, false);
        assert_eq!(patch.apply(text), "a=one\r\nb=2\r\n");
    }

    #[test]
    fn test_trailing_carriage_return_is_kept() {
        let text = "a=1\r\nb=2\r";
        let current = ResourceFile::parse("origin.properties", text, "origin");
        let desired = file(&[("a", "1"), ("b", "two")]);

        let patch = FilePatch::compute(&current, &desired, false);
        assert_eq!(patch.apply(text), "a=1\r\nb=two\r");
    }

    #[test]
    fn test_unchanged_is_empty() {
        let current = file(&[("a", "1")]);
        let patch = FilePatch::compute(&current, &current.clone(), true);
        assert!(patch.is_empty());
        assert_eq!(patch.apply("a=1\n"), "a=1\n");
    }
}
