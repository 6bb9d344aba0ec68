//! A group of resource files exported to, or imported from, one grid.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::{
    entry::ResourceEntry,
    file::ResourceFile,
    file_name::{FileNameCodec, compose_row_key, split_row_key},
    grid::Grid,
};

/// Resource files keyed by physical file name, in insertion order.
#[derive(Debug, Clone)]
pub struct ResourceCollection {
    name: String,
    files: Vec<ResourceFile>,
    index: HashMap<String, usize>,
    codec: FileNameCodec,
}

impl ResourceCollection {
    /// Creates an empty collection using the default `.properties` naming.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_codec(name, FileNameCodec::default())
    }

    pub fn with_codec(name: impl Into<String>, codec: FileNameCodec) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            index: HashMap::new(),
            codec,
        }
    }

    /// The fileId this collection was built for; empty for "all files".
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codec(&self) -> &FileNameCodec {
        &self.codec
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceFile> {
        self.files.iter()
    }

    /// Inserts `file` under its origin name, replacing any file already
    /// registered there while keeping that file's position.
    pub fn add(&mut self, file: ResourceFile) {
        match self.index.get(file.origin_file()) {
            Some(&i) => self.files[i] = file,
            None => {
                self.index
                    .insert(file.origin_file().to_string(), self.files.len());
                self.files.push(file);
            }
        }
    }

    pub fn get(&self, physical_name: &str) -> Option<&ResourceFile> {
        self.index.get(physical_name).map(|&i| &self.files[i])
    }

    pub fn get_mut(&mut self, physical_name: &str) -> Option<&mut ResourceFile> {
        self.index.get(physical_name).map(|&i| &mut self.files[i])
    }

    /// Returns the file registered as `physical_name`, registering an empty
    /// one first if needed.
    pub fn get_or_create(&mut self, physical_name: &str) -> &mut ResourceFile {
        let i = match self.index.get(physical_name) {
            Some(&i) => i,
            None => {
                self.add(ResourceFile::new(physical_name));
                self.files.len() - 1
            }
        };
        &mut self.files[i]
    }

    /// Builds the grid: one locale column per distinct locale and one row per
    /// distinct `fileId:key`, both in first-discovery order.
    pub fn to_grid(&self) -> Grid {
        let mut locales: Vec<String> = Vec::new();
        let mut sources: HashMap<(String, String), &ResourceFile> = HashMap::new();
        let mut row_keys: Vec<(String, String)> = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for file in &self.files {
            let name = self.codec.parse(file.origin_file());
            if !locales.contains(&name.locale) {
                locales.push(name.locale.clone());
            }
            for key in file.keys() {
                let row_key = (name.file_id.clone(), key.to_string());
                if seen.insert(row_key.clone()) {
                    row_keys.push(row_key);
                }
            }
            sources
                .entry((name.file_id, name.locale))
                .or_insert(file);
        }

        let mut header = Vec::with_capacity(locales.len() + 1);
        header.push(self.codec.config().key_label.clone());
        header.extend(locales.iter().cloned());

        let mut grid = Grid::new();
        grid.push_row(header);

        for (file_id, key) in &row_keys {
            let mut row = Vec::with_capacity(locales.len() + 1);
            row.push(compose_row_key(file_id, key));
            for locale in &locales {
                let value = sources
                    .get(&(file_id.clone(), locale.clone()))
                    .map(|file| file.get_value(key))
                    .unwrap_or("");
                row.push(value.to_string());
            }
            grid.push_row(row);
        }

        debug!(
            collection = %self.name,
            locales = locales.len(),
            rows = row_keys.len(),
            "built grid"
        );
        grid
    }

    /// Rebuilds a collection from a grid using the default naming.
    pub fn from_grid(name: impl Into<String>, grid: &Grid) -> Self {
        Self::from_grid_with(name, grid, FileNameCodec::default())
    }

    /// Rebuilds a collection from a grid.
    ///
    /// Every `(fileId, locale)` cell position gets a backing file, even when
    /// the cell is blank; only non-empty cells become entries. Row labels
    /// without a `:` are attributed to the collection name when it is set and
    /// skipped otherwise. Cells beyond the header width are ignored, and line
    /// breaks inside a cell are written as `\n` escapes.
    pub fn from_grid_with(name: impl Into<String>, grid: &Grid, codec: FileNameCodec) -> Self {
        let mut collection = Self::with_codec(name, codec);
        let default_locale = collection.codec.config().default_locale.clone();

        let header = grid.header();
        let locales: Vec<String> = header
            .iter()
            .skip(1)
            .map(|label| {
                let label = label.trim();
                if label.is_empty() {
                    default_locale.clone()
                } else {
                    label.to_string()
                }
            })
            .collect();

        for (i, row) in grid.data_rows().iter().enumerate() {
            // 1-based line number in the sheet, header included
            let line = i + 2;
            if row.iter().all(|cell| cell.is_empty()) {
                continue;
            }

            let row_label = row[0].as_str();
            let (file_id, key) = match split_row_key(row_label) {
                Some((file_id, key)) => (file_id.to_string(), key),
                None if !collection.name.is_empty() => {
                    warn!(line, row_label, "row key has no fileId, using `{}`", collection.name);
                    (collection.name.clone(), row_label)
                }
                None => {
                    warn!(line, row_label, "skipping row without a `fileId:key` label");
                    continue;
                }
            };
            if file_id.is_empty() {
                warn!(line, row_label, "skipping row with an empty fileId");
                continue;
            }
            if row.len() > header.len() {
                warn!(line, "ignoring {} cells beyond the header", row.len() - header.len());
            }

            let key_is_valid = ResourceEntry::is_valid_key(key);
            if !key.is_empty() && !key_is_valid {
                warn!(line, key, "skipping values of a key that cannot be written");
            }

            for (column, locale) in locales.iter().enumerate() {
                let physical_name = collection.codec.format(&file_id, locale);
                let cell = row.get(column + 1).map(String::as_str).unwrap_or("");
                let file = collection.get_or_create(&physical_name);
                if !key_is_valid || cell.is_empty() {
                    continue;
                }
                if ResourceEntry::has_line_break(cell) {
                    warn!(line, key, locale = %locale, "escaping line breaks in cell value");
                }
                let value = ResourceEntry::escape_line_breaks(cell);
                file.set_entry(ResourceEntry::with_locale(key, value, locale.as_str()));
            }
        }

        debug!(
            collection = %collection.name,
            files = collection.files.len(),
            "read grid"
        );
        collection
    }
}

impl<'a> IntoIterator for &'a ResourceCollection {
    type Item = &'a ResourceFile;
    type IntoIter = std::slice::Iter<'a, ResourceFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(origin: &str, entries: &[(&str, &str)]) -> ResourceFile {
        ResourceFile::with_entries(
            origin,
            entries
                .iter()
                .map(|(k, v)| ResourceEntry::new(*k, *v))
                .collect(),
        )
    }

    fn test_collection() -> ResourceCollection {
        let mut col = ResourceCollection::new("origin");
        col.add(file(
            "origin.properties",
            &[("key", "value"), ("second", "2"), ("tr", "three or 3")],
        ));
        col.add(file(
            "origin_kr.properties",
            &[("key.son", "val, son"), ("second", "22")],
        ));
        col.add(file(
            "origin_so_SO.properties",
            &[("kra.kra.kra", "V V V V V"), ("second", "23"), ("tr", "trio, oi")],
        ));
        col
    }

    fn sorted_lines(file: &ResourceFile) -> Vec<String> {
        let mut lines: Vec<String> = file.to_string().lines().map(str::to_string).collect();
        lines.sort();
        lines
    }

    #[test]
    fn test_to_grid() {
        let grid = test_collection().to_grid();
        let res: Vec<String> = grid.rows().iter().map(|row| row.join(",")).collect();

        assert_eq!(res.len(), 6);
        assert_eq!(res[0], "key,default,kr,so_SO");
        assert_eq!(res[1], "origin:key,value,,");
        assert_eq!(res[2], "origin:second,2,22,23");
        assert_eq!(res[3], "origin:tr,three or 3,,trio, oi");
        assert_eq!(res[4], "origin:key.son,,val, son,");
        assert_eq!(res[5], "origin:kra.kra.kra,,,V V V V V");
    }

    #[test]
    fn test_to_grid_across_file_ids() {
        let mut col = ResourceCollection::new("");
        col.add(file("account.properties", &[("label", "Account")]));
        col.add(file("menu_fr.properties", &[("open", "Ouvrir")]));
        col.add(file("account_fr.properties", &[("label", "Compte")]));

        let grid = col.to_grid();
        assert_eq!(grid.header(), ["key", "default", "fr"]);
        assert_eq!(grid.data_rows()[0], ["account:label", "Account", "Compte"]);
        assert_eq!(grid.data_rows()[1], ["menu:open", "", "Ouvrir"]);
    }

    #[test]
    fn test_grid_round_trip() {
        let original = test_collection();
        let restored = ResourceCollection::from_grid("origin", &original.to_grid());

        assert_eq!(restored.len(), 3);
        for file in &original {
            let copy = restored.get(file.origin_file()).unwrap();
            assert_eq!(sorted_lines(copy), sorted_lines(file));
        }
    }

    #[test]
    fn test_grid_round_trip_keeps_text_for_aligned_keys() {
        let mut col = ResourceCollection::new("origin");
        col.add(file("origin.properties", &[("a", "1"), ("b", "2")]));
        col.add(file("origin_kr.properties", &[("a", "일"), ("b", "이")]));

        let restored = ResourceCollection::from_grid("origin", &col.to_grid());
        for file in &col {
            assert_eq!(
                restored.get(file.origin_file()).unwrap().to_string(),
                file.to_string()
            );
        }
    }

    #[test]
    fn test_add_replaces_same_origin() {
        let mut col = ResourceCollection::new("origin");
        col.add(file("a.properties", &[("k", "1")]));
        col.add(file("b.properties", &[("k", "2")]));
        col.add(file("a.properties", &[("k", "3")]));

        assert_eq!(col.len(), 2);
        assert_eq!(col.get("a.properties").unwrap().get_value("k"), "3");
        assert_eq!(col.iter().next().unwrap().origin_file(), "a.properties");
    }

    #[test]
    fn test_get_or_create() {
        let mut col = ResourceCollection::new("origin");
        col.get_or_create("x.properties")
            .set_entry(ResourceEntry::new("k", "v"));
        col.get_or_create("x.properties")
            .set_entry(ResourceEntry::new("k2", "v2"));
        assert_eq!(col.len(), 1);
        assert_eq!(col.get("x.properties").unwrap().len(), 2);
    }

    fn grid(lines: &[&[&str]]) -> Grid {
        Grid::from_rows(
            lines
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_from_grid_blank_cell_creates_no_entry() {
        let col = ResourceCollection::from_grid(
            "account",
            &grid(&[
                &["key", "default", "fr"],
                &["account:newKey", "NewVal", ""],
            ]),
        );

        assert_eq!(col.len(), 2);
        let default = col.get("account.properties").unwrap();
        assert_eq!(default.get_value("newKey"), "NewVal");
        let fr = col.get("account_fr.properties").unwrap();
        assert!(fr.is_empty());
    }

    #[test]
    fn test_from_grid_entry_locale_follows_header() {
        let col = ResourceCollection::from_grid(
            "account",
            &grid(&[&["key", "default", "fr_CA"], &["account:a", "A", "Ah"]]),
        );
        let entry = &col.get("account_fr_CA.properties").unwrap().entries()[0];
        assert_eq!(entry.locale(), "fr_CA");
        assert_eq!(entry.value(), "Ah");
    }

    #[test]
    fn test_from_grid_malformed_rows() {
        let col = ResourceCollection::from_grid(
            "",
            &grid(&[
                &["key", "default"],
                &["no_separator", "x"],
                &[":no_file_id", "x"],
                &["menu:bad=key", "x"],
                &["menu:ok", "fine", "beyond header"],
                &[],
            ]),
        );

        assert_eq!(col.len(), 1);
        let menu = col.get("menu.properties").unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu.get_value("ok"), "fine");
    }

    #[test]
    fn test_from_grid_row_without_file_id_uses_collection_name() {
        let col = ResourceCollection::from_grid(
            "account",
            &grid(&[&["key", "default"], &["label", "Account"]]),
        );
        assert_eq!(
            col.get("account.properties").unwrap().get_value("label"),
            "Account"
        );
    }

    #[test]
    fn test_from_grid_multi_line_cell_stays_on_one_line() {
        let col = ResourceCollection::from_grid(
            "account",
            &grid(&[&["key", "default"], &["account:label", "Line1\ninjected=evil"]]),
        );
        let file = col.get("account.properties").unwrap();
        assert_eq!(file.len(), 1);
        assert_eq!(file.get_value("label"), r"Line1\ninjected=evil");
        assert!(!file.has_key("injected"));

        let reparsed = ResourceFile::parse("account.properties", &file.to_string(), "account");
        assert_eq!(reparsed, *file);
    }

    #[test]
    fn test_from_empty_grid() {
        assert!(ResourceCollection::from_grid("account", &Grid::new()).is_empty());
    }
}
