use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Secrets kept out of the main config file (the AI API key)
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let data: CredentialsData = toml::from_str(&content)?;
            self.credentials = data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = CredentialsData {
            data: self.credentials.clone(),
        };
        std::fs::write(&self.path, toml::to_string_pretty(&data)?)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_ai_api_key(&self) -> Option<&String> {
        self.get("ai_api_key")
    }

    pub fn set_ai_api_key(&mut self, key: String) {
        self.set("ai_api_key".to_string(), key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.toml");

        let mut store = CredentialStore::new(path.clone());
        store.set_ai_api_key("sk-test".to_string());
        store.save().unwrap();

        let mut reloaded = CredentialStore::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get_ai_api_key().map(String::as_str), Some("sk-test"));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.load().unwrap();
        assert!(store.get_ai_api_key().is_none());
    }
}
