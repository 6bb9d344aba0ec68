//! Mapping between physical resource file names and `(fileId, locale)` pairs.
//!
//! A resource file is named `<fileId>_<locale>.<ext>` where the locale is a
//! two-letter lowercase language (`de`) or a language plus region (`en_US`).
//! The unsuffixed `<fileId>.<ext>` file carries the default locale.

use std::cmp::Ordering;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{config::ResConfig, error::Error};

lazy_static! {
    static ref DEFAULT_CODEC: FileNameCodec =
        FileNameCodec::new(ResConfig::default()).expect("default file name pattern compiles");
}

/// Separator between the fileId and the entry key in a grid row key.
pub const ROW_KEY_SEPARATOR: char = ':';

/// A resource file name split into its logical parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResFileName {
    pub file_id: String,
    pub locale: String,
}

/// Parses and formats resource file names for one [`ResConfig`].
#[derive(Debug, Clone)]
pub struct FileNameCodec {
    config: ResConfig,
    pattern: Regex,
}

impl FileNameCodec {
    /// Builds a codec for the extension and locale sentinel in `config`.
    pub fn new(config: ResConfig) -> Result<Self, Error> {
        // Lazy prefix: the locale is the last `_xx` / `_xx_XX` group before the extension.
        let pattern = Regex::new(&format!(
            r"^(.+?)_([a-z]{{2}}_[A-Z]{{2}}|[a-z]{{2}}){}$",
            regex::escape(&config.dotted_extension())
        ))?;
        Ok(Self { config, pattern })
    }

    pub fn config(&self) -> &ResConfig {
        &self.config
    }

    /// Whether `locale` denotes the unsuffixed base file.
    pub fn is_default_locale(&self, locale: &str) -> bool {
        locale.is_empty() || locale == self.config.default_locale
    }

    /// Splits a physical file name into `(fileId, locale)`.
    ///
    /// Names without a recognizable locale suffix keep their whole stem as the
    /// fileId and get the default locale.
    pub fn parse(&self, file_name: &str) -> ResFileName {
        if let Some(caps) = self.pattern.captures(file_name) {
            return ResFileName {
                file_id: caps[1].to_string(),
                locale: caps[2].to_string(),
            };
        }

        let file_id = file_name
            .strip_suffix(&self.config.dotted_extension())
            .unwrap_or(file_name);
        ResFileName {
            file_id: file_id.to_string(),
            locale: self.config.default_locale.clone(),
        }
    }

    /// Inverse of [`FileNameCodec::parse`].
    pub fn format(&self, file_id: &str, locale: &str) -> String {
        if self.is_default_locale(locale) {
            format!("{}.{}", file_id, self.config.extension)
        } else {
            format!("{}_{}.{}", file_id, locale, self.config.extension)
        }
    }

    /// Whether `file_name` carries this codec's extension.
    pub fn has_extension(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(&self.config.dotted_extension())
            .is_some_and(|stem| !stem.is_empty())
    }

    /// Orders grid columns for display: key label, default locale, every
    /// `en*` locale, then everything else, each group sorted lexicographically.
    pub fn sort_locale_columns<S: AsRef<str>>(&self, columns: &[S]) -> Vec<String> {
        let mut sorted: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        sorted.sort_by(|a, b| self.compare_columns(a, b));
        sorted
    }

    fn column_rank(&self, column: &str) -> u8 {
        if column == self.config.key_label {
            0
        } else if column == self.config.default_locale {
            1
        } else if column.starts_with("en") {
            2
        } else {
            3
        }
    }

    pub(crate) fn compare_columns(&self, a: &str, b: &str) -> Ordering {
        self.column_rank(a)
            .cmp(&self.column_rank(b))
            .then_with(|| a.cmp(b))
    }
}

impl Default for FileNameCodec {
    fn default() -> Self {
        DEFAULT_CODEC.clone()
    }
}

/// Parses `file_name` with the default `.properties` naming.
pub fn parse_res_file_name(file_name: &str) -> ResFileName {
    DEFAULT_CODEC.parse(file_name)
}

/// Formats a `.properties` file name for `file_id` and `locale`.
pub fn res_file_name(file_id: &str, locale: &str) -> String {
    DEFAULT_CODEC.format(file_id, locale)
}

/// Sorts locale columns using the default key label and locale sentinel.
pub fn sort_locale_columns<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    DEFAULT_CODEC.sort_locale_columns(columns)
}

/// Composes the `fileId:key` label of a grid row.
pub fn compose_row_key(file_id: &str, key: &str) -> String {
    format!("{}{}{}", file_id, ROW_KEY_SEPARATOR, key)
}

/// Splits a grid row label on its first `:`.
pub fn split_row_key(row_key: &str) -> Option<(&str, &str)> {
    row_key.split_once(ROW_KEY_SEPARATOR)
}
