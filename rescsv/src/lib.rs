#![forbid(unsafe_code)]
//! Round-trip locale-variant `.properties` resource files through one CSV sheet.
//!
//! A family of files such as `account.properties`, `account_fr.properties` and
//! `account_en_US.properties` shares the fileId `account`. Exporting turns any
//! number of families into a single [`Grid`] whose rows are `fileId:key` and
//! whose columns are locales; importing turns an edited grid back into
//! per-file patches that touch only the lines that changed.
//!
//! # Quick Start
//!
//! ```rust
//! use rescsv::{ResourceCollection, ResourceFile};
//!
//! let mut collection = ResourceCollection::new("account");
//! collection.add(ResourceFile::parse("account.properties", "label=Account\n", "account"));
//! collection.add(ResourceFile::parse("account_fr.properties", "label=Compte\n", "account"));
//!
//! let grid = collection.to_grid();
//! assert_eq!(grid.header(), ["key", "default", "fr"]);
//! assert_eq!(grid.data_rows()[0], ["account:label", "Account", "Compte"]);
//!
//! let restored = ResourceCollection::from_grid("account", &grid);
//! assert_eq!(restored.get("account_fr.properties").unwrap().get_value("label"), "Compte");
//! ```

pub mod collection;
pub mod config;
pub mod entry;
pub mod error;
pub mod file;
pub mod file_name;
pub mod grid;
pub mod patch;
pub mod traits;

// Re-export most used types for easy consumption
pub use crate::{
    collection::ResourceCollection,
    config::{GRID_KEY_LABEL, RES_FILE_EXT, RES_LOCALE_DEFAULT, ResConfig},
    entry::ResourceEntry,
    error::Error,
    file::ResourceFile,
    file_name::{
        FileNameCodec, ResFileName, parse_res_file_name, res_file_name, sort_locale_columns,
    },
    grid::Grid,
    patch::{FilePatch, PatchStats},
    traits::Parser,
};
