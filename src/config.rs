use crate::error::ConfigError;
use crate::features::SPEED_LIMIT;
use log::{info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration, read from an optional TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serialized model artifact
    pub model_path: PathBuf,

    /// Accident CSV used for the insights report
    pub dataset_path: PathBuf,

    /// Value preselected for the speed limit prompt
    pub default_speed_limit: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("accident_model.msgpack"),
            dataset_path: PathBuf::from("accidents_india.csv"),
            default_speed_limit: SPEED_LIMIT.default,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Reads `path` if given. A missing file falls back to defaults; a file
    /// that exists but does not parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => {
                info!("Loading configuration from: {}", path.display());
                Self::from_file(path)
            }
            Some(path) => {
                warn!(
                    "Configuration file '{}' not found, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            None => {
                info!("Using default configuration");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SPEED_LIMIT.contains(self.default_speed_limit) {
            return Err(ConfigError::Validation(format!(
                "default_speed_limit must be between {} and {}, got {}",
                SPEED_LIMIT.min, SPEED_LIMIT.max, self.default_speed_limit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = Config::from_toml("model_path = \"models/severity.msgpack\"\n").unwrap();
        assert_eq!(config.model_path, PathBuf::from("models/severity.msgpack"));
        assert_eq!(config.dataset_path, PathBuf::from("accidents_india.csv"));
        assert_eq!(config.default_speed_limit, 40);
    }

    #[test]
    fn out_of_range_speed_is_rejected() {
        assert!(matches!(
            Config::from_toml("default_speed_limit = 150"),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        assert!(matches!(
            Config::from_toml("model_path = ["),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_falls_back_when_file_is_missing() {
        let dir = tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_reads_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accident-severity.toml");
        std::fs::write(&path, "default_speed_limit = 80\n").unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap().default_speed_limit, 80);
    }
}
