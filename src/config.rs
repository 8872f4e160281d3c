//! Configuration loading and management for spana.
//!
//! Loads settings from `spana.toml` with an environment variable override for
//! the API key. A missing file falls back to defaults; a missing key fails
//! fast with a clear error.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing Gemini API key: set the GEMINI_API_KEY environment variable")]
    MissingApiKey,
}

/// Research agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model identifier (e.g., "gemini-2.5-flash")
    pub model: String,
    /// Optional preamble prepended to every research query
    #[serde(default)]
    pub persona: String,
    /// Topic the live-updates panel follows
    pub topic: String,
    /// Starter queries offered in the interactive session
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// API keys configuration (loaded from environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub gemini_key: Option<String>,
}

/// Storage paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base path for preference storage
    pub path: PathBuf,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from the default location (spana.toml in cwd or home),
    /// falling back to defaults when no file exists
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                let mut config = Config::default();
                config.apply_env();
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Override sensitive values from environment variables
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.api.gemini_key = Some(key);
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from("spana.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("spana").join("spana.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    /// Get the Gemini API key, failing fast when it was never supplied
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api
            .gemini_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            persona: String::new(),
            topic: "AIPAC".to_string(),
            suggestions: vec![
                "Politicians receiving funding from AIPAC".to_string(),
                "Donors of AIPAC".to_string(),
                "Key takeaways from the last G7 summit".to_string(),
            ],
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_a_full_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[agent]
model = "gemini-2.5-pro"
topic = "campaign finance"
suggestions = ["Who funds super PACs?"]

[storage]
path = "/tmp/spana-data"
"#
        )
        .unwrap();

        temp_env::with_var_unset("GEMINI_API_KEY", || {
            let config = Config::load_from(&file.path().to_path_buf()).unwrap();
            assert_eq!(config.agent.model, "gemini-2.5-pro");
            assert_eq!(config.agent.topic, "campaign finance");
            assert_eq!(config.agent.suggestions.len(), 1);
            assert_eq!(config.storage.path, PathBuf::from("/tmp/spana-data"));
        });
    }

    #[test]
    fn env_var_overrides_the_file_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[api]
gemini_key = "from-file"
"#
        )
        .unwrap();

        temp_env::with_var("GEMINI_API_KEY", Some("from-env"), || {
            let config = Config::load_from(&file.path().to_path_buf()).unwrap();
            assert_eq!(config.api_key().unwrap(), "from-env");
        });
    }

    #[test]
    fn missing_key_fails_fast() {
        temp_env::with_var_unset("GEMINI_API_KEY", || {
            let config = Config::default();
            assert!(matches!(config.api_key(), Err(ConfigError::MissingApiKey)));
        });
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let mut config = Config::default();
        config.api.gemini_key = Some("   ".to_string());
        assert!(matches!(config.api_key(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn defaults_cover_every_section() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.agent.model, "gemini-2.5-flash");
        assert!(!config.agent.suggestions.is_empty());
        assert_eq!(config.storage.path, PathBuf::from("./data"));
    }
}
