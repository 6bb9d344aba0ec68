use std::{
    fs,
    path::{Path, PathBuf},
};

use rescsv::{Error, ResConfig};
use tracing::debug;

/// Name of the optional configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "rescsv.toml";

/// Loads the naming configuration.
///
/// An explicit path must exist. Otherwise `<dir>/rescsv.toml` is used when
/// present and the defaults apply when it is not.
pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<ResConfig, Error> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = dir.join(CONFIG_FILE_NAME);
            if !path.is_file() {
                return Ok(ResConfig::default());
            }
            path
        }
    };

    let text = fs::read_to_string(&path).map_err(|e| Error::read(&path, e))?;
    let config: ResConfig = toml::from_str(&text)
        .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))?;
    let extension = config.extension.clone();
    let config = config.with_extension(extension);

    for (field, value) in [
        ("extension", &config.extension),
        ("default_locale", &config.default_locale),
        ("key_label", &config.key_label),
    ] {
        if value.trim().is_empty() {
            return Err(Error::InvalidConfig(format!(
                "{}: `{}` must not be empty",
                path.display(),
                field
            )));
        }
    }

    debug!(path = %path.display(), ?config, "loaded configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_config(dir.path(), None).unwrap(), ResConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "extension = \".lang\"\n").unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.extension, "lang");
        assert_eq!(config.default_locale, "default");
        assert_eq!(config.key_label, "key");
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = load_config(dir.path(), Some(&dir.path().join("other.toml"))).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_malformed_file_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "extension = [").unwrap();
        let err = load_config(dir.path(), None).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_value_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "key_label = \"\"\n").unwrap();
        let err = load_config(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("key_label"));
    }
}
