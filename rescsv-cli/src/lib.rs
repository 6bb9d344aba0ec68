//! CLI library for testing purposes

pub mod discovery;
pub mod export;
pub mod import;
pub mod report;
pub mod settings;
pub mod validation;

pub use export::{ExportOptions, run_export};
pub use import::{ImportOptions, run_import};
pub use report::{ExportReport, ImportReport};
pub use settings::load_config;
