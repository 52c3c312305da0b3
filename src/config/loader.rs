use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::settings::Settings;
use crate::{GenerateError, Result};

const SETTINGS_FILE: &str = "config.yaml";

/// `<platform config dir>/create-install-bat/config.yaml`
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "create-install-bat")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

/// Load settings from `explicit` if given, otherwise from the default location
///
/// An explicitly named file must exist. The default file is optional and
/// built-in defaults apply when it is absent.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return load_settings_from_path(path);
    }

    match default_settings_path() {
        Some(path) if path.exists() => load_settings_from_path(&path),
        _ => {
            debug!("No settings file found, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Read and parse a settings file
pub fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let contents = std::fs::read_to_string(path).map_err(|e| GenerateError::Config {
        message: format!("Failed to read settings file {}: {}", path.display(), e),
    })?;

    let settings: Settings = serde_yaml_ng::from_str(&contents).map_err(|e| {
        GenerateError::Config {
            message: format!("Failed to parse settings file {}: {}", path.display(), e),
        }
    })?;

    debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_loads_full_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
director:
  username: director
  password: s3cret
  skip_tls_verify: true
  timeout_secs: 30
required_releases: [cf, diego, garden-windows]
windows:
  username: Administrator
"#,
        )
        .unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.director.username.as_deref(), Some("director"));
        assert_eq!(settings.director.password.as_deref(), Some("s3cret"));
        assert_eq!(settings.director.skip_tls_verify, Some(true));
        assert_eq!(settings.director.timeout_secs, Some(30));
        assert_eq!(
            settings.required_releases,
            Some(vec![
                "cf".to_string(),
                "diego".to_string(),
                "garden-windows".to_string()
            ])
        );
        assert_eq!(settings.windows.username.as_deref(), Some("Administrator"));
        assert_eq!(settings.windows.password, None);
    }

    #[test]
    fn test_empty_sections_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "director: {}\n").unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_settings(Some(&temp_dir.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, GenerateError::Config { .. }));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "director:\n  usrname: typo\n").unwrap();

        let err = load_settings_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }

    #[test]
    fn test_default_path_names_the_tool() {
        if let Some(path) = default_settings_path() {
            assert!(path.ends_with("config.yaml"));
            assert!(path.to_string_lossy().contains("create-install-bat"));
        }
    }
}
