//! Settings loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::FaultSettings;
use crate::error::ConfigResult;

/// Load fault settings from a TOML file.
pub fn load_settings(path: &Path) -> ConfigResult<FaultSettings> {
    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Parse fault settings from TOML text.
pub fn parse_settings(content: &str) -> ConfigResult<FaultSettings> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::EventSettings;
    use crate::error::ConfigError;
    use std::io::Write;

    #[test]
    fn test_empty_file_is_all_defaults() {
        assert_eq!(parse_settings("").unwrap(), FaultSettings::default());
    }

    #[test]
    fn test_parse_overrides() {
        let settings = parse_settings(
            r#"
            verbose = true
            exit = true

            [exception]
            exit = false

            [sigterm]
            ignore = true
            "#,
        )
        .unwrap();

        assert!(settings.verbose);
        assert_eq!(settings.exit, Some(true));
        assert_eq!(
            settings.exception,
            EventSettings {
                exit: Some(false),
                ignore: false
            }
        );
        assert!(settings.sigterm.ignore);
        assert_eq!(settings.rejection, EventSettings::default());
    }

    #[test]
    fn test_parse_rejects_non_bool_exit() {
        let err = parse_settings("exit = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rejection]\nexit = true").unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.rejection.exit, Some(true));
        assert_eq!(settings.exit, None);
    }

    #[test]
    fn test_missing_file() {
        let err = load_settings(Path::new("/nonexistent/fault-watch.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
