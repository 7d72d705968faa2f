//! Manager selection configuration.
//!
//! Which backend to use, and its settings, come from a TOML file named by
//! the `KASSETIO_DEFAULT_CONFIG` environment variable:
//!
//! ```toml
//! [manager]
//! identifier = "org.kassetio.library"
//!
//! [manager.settings]
//! library_path = "/studio/config/library.json"
//! ```
//!
//! Unlike ordinary preference files, a missing or malformed manager config
//! is fatal — an adapter without a backend cannot degrade to anything
//! useful.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::ManagerError;
use crate::interface::Settings;

/// Environment variable naming the configuration file.
pub const DEFAULT_CONFIG_ENV_VAR: &str = "KASSETIO_DEFAULT_CONFIG";

/// A parsed manager configuration.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    pub identifier: String,
    pub settings: Settings,
}

impl ManagerConfig {
    /// Loads the config named by [`DEFAULT_CONFIG_ENV_VAR`].
    pub fn load() -> Result<Self, ManagerError> {
        let path = std::env::var(DEFAULT_CONFIG_ENV_VAR).map_err(|_| {
            ManagerError::Config(format!(
                "no default manager configured; set {DEFAULT_CONFIG_ENV_VAR}"
            ))
        })?;
        Self::load_from(Path::new(&path))
    }

    /// Loads the config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ManagerError> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            ManagerError::Config(format!("failed to read {}: {err}", path.display()))
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|err| {
            ManagerError::Config(format!("failed to parse {}: {err}", path.display()))
        })?;

        info!(
            path = %path.display(),
            identifier = %file.manager.identifier,
            "loaded manager configuration"
        );

        Ok(Self {
            identifier: file.manager.identifier,
            settings: file.manager.settings,
        })
    }
}

/// Raw TOML structure matching the config file format.
#[derive(Deserialize)]
struct ConfigFile {
    manager: ManagerSection,
}

#[derive(Deserialize)]
struct ManagerSection {
    identifier: String,
    #[serde(default)]
    settings: Settings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn load_config_from_str(toml_content: &str) -> Result<ManagerConfig, ManagerError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manager.toml");
        std::fs::write(&path, toml_content).unwrap();
        ManagerConfig::load_from(&path)
    }

    #[test]
    fn load_from_full_file() {
        let config = load_config_from_str(
            r#"
[manager]
identifier = "org.kassetio.library"

[manager.settings]
library_path = "/studio/config/library.json"
"#,
        )
        .unwrap();

        assert_eq!(config.identifier, "org.kassetio.library");
        assert_eq!(
            config.settings.get("library_path").map(String::as_str),
            Some("/studio/config/library.json")
        );
    }

    #[test]
    fn settings_section_is_optional() {
        let config = load_config_from_str("[manager]\nidentifier = \"org.example\"\n").unwrap();
        assert!(config.settings.is_empty());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ManagerConfig::load_from(&dir.path().join("nonexistent.toml"));
        assert!(matches!(result, Err(ManagerError::Config(_))));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let result = load_config_from_str("not valid toml {{{{");
        assert!(matches!(result, Err(ManagerError::Config(_))));
    }

    #[test]
    fn missing_identifier_is_a_config_error() {
        let result = load_config_from_str("[manager]\n");
        assert!(matches!(result, Err(ManagerError::Config(_))));
    }
}
