use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use watchlog_models::WatchRecord;

/// Fixed file name holding the whole record set
pub const STORE_FILE: &str = "records.json";

/// Persistence collaborator: one JSON file, whole-set load and save.
/// Malformed or missing content loads as an empty set and is never surfaced
/// to the user as an error.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(STORE_FILE),
        }
    }

    /// Use an explicit file path instead of the data-dir default
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Vec<WatchRecord> {
        if !self.path.exists() {
            debug!("Record store not found at {:?}, starting empty", self.path);
            return Vec::new();
        }

        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<Vec<WatchRecord>>(&content) {
                Ok(records) => {
                    info!("Loaded {} records from {:?}", records.len(), self.path);
                    records
                }
                Err(e) => {
                    warn!("Record store at {:?} is malformed ({}), starting empty", self.path, e);
                    Vec::new()
                }
            },
            Err(e) => {
                warn!("Failed to read record store at {:?}: {}, starting empty", self.path, e);
                Vec::new()
            }
        }
    }

    /// Overwrite the full store; last write wins
    pub fn save(&self, records: &[WatchRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| anyhow!("Failed to serialize record store: {}", e))?;
        std::fs::write(&self.path, json)
            .map_err(|e| anyhow!("Failed to write record store: {}", e))?;
        debug!("Saved {} records to {:?}", records.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchlog_models::{MediaKind, WatchStatus};

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());
        let records = vec![WatchRecord::new("盗梦空间", WatchStatus::Watched, MediaKind::Movie)];

        storage.save(&records).unwrap();
        assert_eq!(storage.load(), records);
    }

    #[test]
    fn test_malformed_content_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path());
        std::fs::write(storage.path(), "{{{ not json").unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(&dir.path().join("nested").join("data"));
        storage.save(&[]).unwrap();
        assert!(storage.path().exists());
    }
}
