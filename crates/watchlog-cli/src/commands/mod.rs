pub mod add;
pub mod config;
pub mod delete;
pub mod list;
pub mod review;
pub mod stats;
pub mod transfer;
pub mod update;

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use watchlog_config::{Config, CredentialStore, PathManager};
use watchlog_core::{JsonStorage, RecordStore, SaveDebouncer};
use watchlog_enrich::AiClient;

/// Everything a command needs: config, the loaded record store, and the
/// debounced persistence hooked into the store's change notifications.
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub store: RecordStore,
    pub debouncer: Arc<SaveDebouncer>,
}

impl AppContext {
    pub fn open() -> Result<Self> {
        let paths = PathManager::new()?;
        let config = Config::load(&paths.config_file()).context("Failed to load configuration")?;

        let storage = JsonStorage::new(paths.data_dir());
        let mut store = RecordStore::from_records(storage.load());
        tracing::debug!(records = store.len(), "Opened record store");

        let debouncer = SaveDebouncer::new(
            storage,
            Duration::from_millis(config.storage.save_debounce_ms),
        );
        let saver = debouncer.clone();
        store.on_change(Box::new(move |records| saver.schedule(records.to_vec())));

        Ok(Self {
            paths,
            config,
            store,
            debouncer,
        })
    }

    /// Write any pending mutations before the process exits
    pub fn flush(&self) -> Result<()> {
        self.debouncer.flush(self.store.records())
    }

    /// Build the enrichment client; the API key may be absent, in which case
    /// every call degrades to "no data"
    pub fn ai_client(&self) -> Result<AiClient> {
        let mut credentials = CredentialStore::new(self.paths.credentials_file());
        credentials.load().context("Failed to load credentials")?;
        Ok(AiClient::new(
            self.config.ai.base_url.clone(),
            self.config.ai.model.clone(),
            credentials.get_ai_api_key().cloned(),
        ))
    }

    /// Resolve an entry id or unambiguous prefix to the full id
    pub fn resolve_id(&self, id: &str) -> Result<String> {
        self.store
            .resolve(id)
            .map(|r| r.id.clone())
            .with_context(|| format!("No entry matches id '{}'", id))
    }
}

/// Short display form of a record id. IDs are opaque text (imports keep the
/// file's ID column verbatim), so truncation must respect char boundaries.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Parse a YYYY-MM-DD watched date as local midnight
pub fn parse_watched_date(text: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    use chrono::{Local, NaiveDate, TimeZone, Utc};

    let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", text))?;
    let naive = date
        .and_hms_opt(0, 0, 0)
        .with_context(|| format!("Invalid date '{}'", text))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Date '{}' does not exist in the local timezone", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_respects_char_boundaries() {
        assert_eq!(short_id("abcdefghij"), "abcdefgh");
        assert_eq!(short_id("盗梦空间-entry-1"), "盗梦空间-ent");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id(""), "");
    }
}
