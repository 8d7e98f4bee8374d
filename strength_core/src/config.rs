//! Configuration file support for the importer.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/strength-import/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub exercises: ExercisesConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub cleanup: CleanupConfig,
}

/// Exercise database source
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExercisesConfig {
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
}

impl Default for ExercisesConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

/// Remote workout service connection
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_path: default_token_path(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Workout cleanup selection
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CleanupConfig {
    #[serde(default = "default_cleanup_prefixes")]
    pub prefixes: Vec<String>,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            prefixes: default_cleanup_prefixes(),
        }
    }
}

// Default value functions
fn default_csv_path() -> PathBuf {
    PathBuf::from("Garmin Exercises Database - Exercises.csv")
}

fn default_base_url() -> String {
    "https://connectapi.garmin.com".into()
}

fn default_token_path() -> PathBuf {
    PathBuf::from("secrets").join("oauth2_token.json")
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_cleanup_prefixes() -> Vec<String> {
    vec![
        "Strength ".into(),
        "Strength A".into(),
        "Strength B".into(),
        "Strength C".into(),
    ]
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("strength-import").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.service.base_url.trim().is_empty() {
            return Err(Error::Config("service.base_url must not be empty".into()));
        }
        if self.cleanup.prefixes.iter().any(|p| p.is_empty()) {
            // An empty prefix would select every workout on the account.
            return Err(Error::Config(
                "cleanup.prefixes must not contain an empty prefix".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.exercises.csv_path,
            PathBuf::from("Garmin Exercises Database - Exercises.csv")
        );
        assert_eq!(config.service.base_url, "https://connectapi.garmin.com");
        assert_eq!(config.service.timeout_seconds, 30);
        assert!(config.cleanup.prefixes.iter().all(|p| p.starts_with("Strength")));
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.service.timeout_seconds = 5;
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.service.timeout_seconds, 5);
        assert_eq!(parsed.cleanup.prefixes, config.cleanup.prefixes);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[exercises]
csv_path = "/data/exercises.csv"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.exercises.csv_path, PathBuf::from("/data/exercises.csv"));
        assert_eq!(config.service.base_url, "https://connectapi.garmin.com"); // default
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[cleanup]\nprefixes = [\"Strength\", \"\"]\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
