use std::{fs, io, path::PathBuf};

use rescsv::{Error, FileNameCodec, FilePatch, Grid, Parser, ResourceCollection, ResourceFile};
use tracing::{debug, info};

use crate::{report::ImportReport, validation::warn_on_unknown_locales};

#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Directory holding the CSV sheet and the resource files.
    pub dir: PathBuf,
    /// Sheet to read, `<file_id>.csv`.
    pub file_id: String,
    /// Delete entries that exist on disk but not in the sheet.
    pub delete: bool,
}

/// Applies the `<file_id>.csv` sheet to the resource files it references.
///
/// Each file is patched independently: deletions first, then in-place
/// updates, then new entries at the end. Files whose text would not change
/// are left alone, and missing files are only created when they gain entries.
/// Every file is read and patched before the first one is written, so a read
/// failure leaves the directory untouched. A write failure aborts the run;
/// files written before it stay written.
pub fn run_import(options: &ImportOptions, codec: &FileNameCodec) -> Result<ImportReport, Error> {
    let csv_path = options.dir.join(format!("{}.csv", options.file_id));
    let grid = Grid::read_from(&csv_path)?;
    if grid.is_empty() {
        return Err(Error::InvalidGrid(format!(
            "{} has no header row",
            csv_path.display()
        )));
    }
    warn_on_unknown_locales(grid.header(), codec.config());

    let collection = ResourceCollection::from_grid_with(options.file_id.as_str(), &grid, codec.clone());
    info!(files = collection.len(), rows = grid.len() - 1, "read sheet");

    let mut pending = Vec::new();
    for desired in &collection {
        let path = options.dir.join(desired.origin_file());
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(Error::read(&path, e)),
        };
        let main_id = codec.parse(desired.origin_file()).file_id;
        let current = ResourceFile::parse_with(codec, desired.origin_file(), &text, &main_id);

        let patch = FilePatch::compute(&current, desired, options.delete);
        let patched = patch.apply(&text);
        if patched == text {
            debug!(file = %desired.origin_file(), "unchanged");
            continue;
        }
        pending.push((path, patched, patch.stats()));
    }

    let mut report = ImportReport {
        input: csv_path.display().to_string(),
        ..ImportReport::default()
    };
    for (path, patched, stats) in pending {
        fs::write(&path, &patched).map_err(|e| Error::write(&path, e))?;
        debug!(
            file = %path.display(),
            deleted = stats.deleted,
            updated = stats.updated,
            added = stats.added,
            "patched resource file"
        );
        report.entries += stats;
        report.files_written += 1;
    }

    Ok(report)
}
