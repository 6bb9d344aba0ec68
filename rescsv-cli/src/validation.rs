use rescsv::ResConfig;
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Validate a fileId given on the command line
pub fn validate_file_id(file_id: &str) -> Result<(), String> {
    if file_id.trim().is_empty() {
        return Err("File id must not be empty".to_string());
    }
    if file_id.contains(['/', '\\']) {
        return Err(format!(
            "File id '{}' must be a plain name, not a path (use --dir to pick the directory)",
            file_id
        ));
    }
    Ok(())
}

/// Whether a grid header label names a usable locale.
///
/// `_` is read as `-`, so `en_US` is checked as `en-US`.
pub fn is_known_locale(label: &str, config: &ResConfig) -> bool {
    let label = label.trim();
    label.is_empty()
        || label == config.default_locale
        || label.replace('_', "-").parse::<LanguageIdentifier>().is_ok()
}

/// Logs a warning for every locale column whose label is not a language identifier.
pub fn warn_on_unknown_locales(header: &[String], config: &ResConfig) -> usize {
    let mut unknown = 0;
    for label in header.iter().skip(1) {
        if !is_known_locale(label, config) {
            warn!(label = %label, "column label is not a language identifier");
            unknown += 1;
        }
    }
    unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_id() {
        assert!(validate_file_id("account").is_ok());
        assert!(validate_file_id("my_file.v2").is_ok());
        assert!(validate_file_id("").is_err());
        assert!(validate_file_id("../account").is_err());
    }

    #[test]
    fn test_is_known_locale() {
        let config = ResConfig::default();
        for label in ["default", "en", "en_US", "so_SO", "kr", "zh_Hant"] {
            assert!(is_known_locale(label, &config), "{}", label);
        }
        assert!(!is_known_locale("Français", &config));
        assert!(!is_known_locale("value 2", &config));
    }

    #[test]
    fn test_warn_on_unknown_locales_skips_key_column() {
        let header: Vec<String> = ["key", "default", "fr", "not a locale"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(warn_on_unknown_locales(&header, &ResConfig::default()), 1);
    }
}
