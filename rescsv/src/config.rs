//! Naming configuration shared by every component.

use serde::{Deserialize, Serialize};

/// Extension of resource files, without the leading dot.
pub const RES_FILE_EXT: &str = "properties";
/// Locale label used for the unsuffixed base file.
pub const RES_LOCALE_DEFAULT: &str = "default";
/// Header label of the grid column holding the `fileId:key` row keys.
pub const GRID_KEY_LABEL: &str = "key";

/// Controls how resource files are named and how the grid is labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResConfig {
    /// Resource file extension, e.g. `properties`.
    pub extension: String,
    /// Locale sentinel for files without a locale suffix.
    pub default_locale: String,
    /// Header of the first grid column.
    pub key_label: String,
}

impl Default for ResConfig {
    fn default() -> Self {
        Self {
            extension: RES_FILE_EXT.to_string(),
            default_locale: RES_LOCALE_DEFAULT.to_string(),
            key_label: GRID_KEY_LABEL.to_string(),
        }
    }
}

impl ResConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resource file extension. A leading dot is ignored.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Sets the default locale sentinel.
    pub fn with_default_locale(mut self, default_locale: impl Into<String>) -> Self {
        self.default_locale = default_locale.into();
        self
    }

    /// Sets the key column label.
    pub fn with_key_label(mut self, key_label: impl Into<String>) -> Self {
        self.key_label = key_label.into();
        self
    }

    /// `.properties`-style suffix including the dot.
    pub fn dotted_extension(&self) -> String {
        format!(".{}", self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResConfig::default();
        assert_eq!(config.extension, "properties");
        assert_eq!(config.default_locale, "default");
        assert_eq!(config.key_label, "key");
        assert_eq!(config.dotted_extension(), ".properties");
    }

    #[test]
    fn test_builder_strips_leading_dot() {
        let config = ResConfig::new()
            .with_extension(".lang")
            .with_default_locale("base")
            .with_key_label("id");
        assert_eq!(config.extension, "lang");
        assert_eq!(config.default_locale, "base");
        assert_eq!(config.key_label, "id");
    }
}
