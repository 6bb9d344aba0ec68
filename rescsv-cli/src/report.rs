use rescsv::PatchStats;
use serde::Serialize;

/// Outcome of an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    /// Path of the written CSV file.
    pub output: String,
    /// Resource files read.
    pub files: usize,
    /// Locale columns in the sheet.
    pub locales: usize,
    /// `fileId:key` rows in the sheet.
    pub rows: usize,
}

/// Outcome of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Path of the CSV file read.
    pub input: String,
    #[serde(flatten)]
    pub entries: PatchStats,
    /// Resource files whose text changed.
    pub files_written: usize,
}

impl ExportReport {
    pub fn print(&self) {
        println!(
            "✅ Success! \"{}\" created from {} files ({} keys, {} locales)",
            self.output, self.files, self.rows, self.locales
        );
    }
}

impl ImportReport {
    /// Prints the non-zero counters.
    pub fn print(&self) {
        if self.entries.deleted > 0 {
            println!("Deleted entries: {}", self.entries.deleted);
        }
        if self.entries.updated > 0 {
            println!("Updated entries: {}", self.entries.updated);
        }
        if self.entries.added > 0 {
            println!("Added new entries: {}", self.entries.added);
        }
        if self.files_written == 0 {
            println!("✅ Resource files already match \"{}\"", self.input);
        } else {
            println!(
                "✅ Updated {} resource files from \"{}\"",
                self.files_written, self.input
            );
        }
    }
}
