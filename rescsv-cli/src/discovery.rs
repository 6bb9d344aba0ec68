use std::{fs, path::Path};

use regex::Regex;
use rescsv::{Error, FileNameCodec};
use tracing::debug;

/// Lists the resource files of `dir` that belong to an export.
///
/// With a fileId, only `<fileId>.<ext>` and `<fileId>_<suffix>.<ext>` files with a
/// suffix of one to five characters are included; without one, every file
/// with the configured extension is. Names are returned sorted.
pub fn discover_resource_files(
    dir: &Path,
    file_id: Option<&str>,
    codec: &FileNameCodec,
) -> Result<Vec<String>, Error> {
    let accepted = match file_id.filter(|id| !id.is_empty()) {
        Some(id) => Some(Regex::new(&format!(
            r"^{}(\b|_.{{1,5}}){}$",
            regex::escape(id),
            regex::escape(&codec.config().dotted_extension())
        ))?),
        None => None,
    };

    let mut names = Vec::new();
    for dent in fs::read_dir(dir).map_err(|e| Error::read(dir, e))? {
        let dent = dent.map_err(|e| Error::read(dir, e))?;
        let file_type = dent.file_type().map_err(|e| Error::read(dent.path(), e))?;
        if file_type.is_dir() {
            continue;
        }
        let Some(name) = dent.file_name().to_str().map(str::to_string) else {
            debug!(path = %dent.path().display(), "skipping non UTF-8 file name");
            continue;
        };

        let included = match &accepted {
            Some(pattern) => pattern.is_match(&name),
            None => codec.has_extension(&name),
        };
        if included {
            names.push(name);
        }
    }

    names.sort();
    debug!(count = names.len(), dir = %dir.display(), "discovered resource files");
    Ok(names)
}
