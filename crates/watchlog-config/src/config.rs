use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayOptions,
    #[serde(default)]
    pub storage: StorageOptions,
    #[serde(default)]
    pub ai: AiOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// List page size
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageOptions {
    /// Coalescing window for debounced saves
    #[serde(default = "default_save_debounce_ms")]
    pub save_debounce_ms: u64,
}

/// Settings for the metadata-fetch / review-generation collaborator.
/// The API key itself lives in the credentials file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiOptions {
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
    #[serde(default = "default_ai_model")]
    pub model: String,
}

fn default_page_size() -> usize {
    12
}

fn default_save_debounce_ms() -> u64 {
    400
}

fn default_ai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_ai_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            save_debounce_ms: default_save_debounce_ms(),
        }
    }
}

impl Default for AiOptions {
    fn default() -> Self {
        Self {
            base_url: default_ai_base_url(),
            model: default_ai_model(),
        }
    }
}

impl Config {
    /// Load from the config file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
