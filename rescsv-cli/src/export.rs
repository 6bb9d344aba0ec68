use std::{fs, path::PathBuf};

use rayon::prelude::*;
use rescsv::{Error, FileNameCodec, Parser, ResourceCollection, ResourceFile};
use tracing::{debug, info};

use crate::{discovery::discover_resource_files, report::ExportReport};

/// Base name of the sheet written when no fileId is given.
pub const ALL_FILES_NAME: &str = "all";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory holding the resource files; the CSV is written there too.
    pub dir: PathBuf,
    /// Family to export; `None` exports every resource file.
    pub file_id: Option<String>,
}

impl ExportOptions {
    /// Base name shared by the collection and the written CSV file.
    pub fn sheet_name(&self) -> &str {
        self.file_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(ALL_FILES_NAME)
    }
}

/// Reads the selected resource files and writes them as one CSV sheet.
///
/// Nothing is written unless every file was read successfully.
pub fn run_export(options: &ExportOptions, codec: &FileNameCodec) -> Result<ExportReport, Error> {
    let file_id = options.file_id.as_deref().unwrap_or("");
    let names = discover_resource_files(&options.dir, options.file_id.as_deref(), codec)?;
    if names.is_empty() {
        let wanted = if file_id.is_empty() {
            format!("*{}", codec.config().dotted_extension())
        } else {
            file_id.to_string()
        };
        return Err(Error::NoResourceFiles(wanted));
    }

    info!(count = names.len(), "reading resource files");
    let files = names
        .par_iter()
        .map(|name| {
            let path = options.dir.join(name);
            let content = fs::read_to_string(&path).map_err(|e| Error::read(&path, e))?;
            let file = ResourceFile::parse_with(codec, name, &content, file_id);
            debug!(file = %name, entries = file.len(), "parsed resource file");
            Ok(file)
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let mut collection = ResourceCollection::with_codec(file_id, codec.clone());
    for file in files {
        collection.add(file);
    }

    let mut grid = collection.to_grid();
    grid.sort_columns(codec);

    let output = options.dir.join(format!("{}.csv", options.sheet_name()));
    grid.write_to(&output)?;
    info!(output = %output.display(), "wrote sheet");

    Ok(ExportReport {
        output: output.display().to_string(),
        files: collection.len(),
        locales: grid.header().len().saturating_sub(1),
        rows: grid.len().saturating_sub(1),
    })
}
