use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::json;
use watchlog_config::{Config, CredentialStore, PathManager};

use crate::output::{Output, OutputFormat};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show,
    /// Change configuration values
    Set {
        /// List page size
        #[arg(long = "page-size")]
        page_size: Option<usize>,

        /// Debounced-save delay in milliseconds
        #[arg(long = "debounce-ms")]
        debounce_ms: Option<u64>,

        /// Base URL of the OpenAI-compatible API
        #[arg(long = "ai-base-url")]
        ai_base_url: Option<String>,

        /// Model name used for metadata and reviews
        #[arg(long = "ai-model")]
        ai_model: Option<String>,
    },
    /// Store the API key for the metadata/review service
    SetKey,
}

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let paths = PathManager::new()?;

    match cmd {
        ConfigCommands::Show => {
            let config = Config::load(&paths.config_file())?;
            let mut credentials = CredentialStore::new(paths.credentials_file());
            credentials.load()?;
            let api_key = credentials.get_ai_api_key().map(|key| mask(key));

            if output.format() != OutputFormat::Human {
                output.json(&json!({
                    "config_file": paths.config_file(),
                    "page_size": config.display.page_size,
                    "save_debounce_ms": config.storage.save_debounce_ms,
                    "ai_base_url": config.ai.base_url,
                    "ai_model": config.ai.model,
                    "ai_api_key": api_key,
                }));
                return Ok(());
            }

            output.info(format!("Config file: {:?}", paths.config_file()));
            output.info(format!("Page size: {}", config.display.page_size));
            output.info(format!("Save debounce: {} ms", config.storage.save_debounce_ms));
            output.info(format!("AI base URL: {}", config.ai.base_url));
            output.info(format!("AI model: {}", config.ai.model));
            match api_key {
                Some(masked) => output.info(format!("AI API key: {}", masked)),
                None => output.warn("AI API key: not set (metadata and review generation disabled)"),
            }
        }
        ConfigCommands::Set {
            page_size,
            debounce_ms,
            ai_base_url,
            ai_model,
        } => {
            let mut config = Config::load(&paths.config_file())?;
            if let Some(page_size) = page_size {
                config.display.page_size = page_size.max(1);
            }
            if let Some(debounce_ms) = debounce_ms {
                config.storage.save_debounce_ms = debounce_ms;
            }
            if let Some(base_url) = ai_base_url {
                config.ai.base_url = base_url;
            }
            if let Some(model) = ai_model {
                config.ai.model = model;
            }
            config.save(&paths.config_file())?;
            output.success("Configuration saved");
        }
        ConfigCommands::SetKey => {
            let key = rpassword::prompt_password("API key: ").context("Failed to read API key")?;
            let mut credentials = CredentialStore::new(paths.credentials_file());
            credentials.load()?;
            credentials.set_ai_api_key(key);
            credentials.save()?;
            output.success("API key stored");
        }
    }

    Ok(())
}

fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}****{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::mask;

    #[test]
    fn test_mask_hides_short_keys_entirely() {
        assert_eq!(mask(""), "****");
        assert_eq!(mask("sk-short"), "****");
    }

    #[test]
    fn test_mask_counts_chars_not_bytes() {
        assert_eq!(mask("sk-abcdefghijkl"), "sk-a****ijkl");
        assert_eq!(mask("密码密码密码密码密码"), "密码密码****密码密码");
    }
}
