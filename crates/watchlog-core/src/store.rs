use chrono::Utc;
use tracing::debug;
use watchlog_models::WatchRecord;

use crate::codec::{import, ImportReport};

/// Called with the full record set after every mutation
pub type ChangeListener = Box<dyn Fn(&[WatchRecord]) + Send + Sync>;

/// The single source of truth for the record set.
///
/// Records are kept in recency order (newest insertion first); display
/// ordering is always computed downstream, never stored. The pipeline only
/// reads snapshots; all mutations go through the methods here, each of which
/// notifies the registered listeners (persistence hangs off a listener).
#[derive(Default)]
pub struct RecordStore {
    records: Vec<WatchRecord>,
    listeners: Vec<ChangeListener>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<WatchRecord>) -> Self {
        Self {
            records,
            listeners: Vec::new(),
        }
    }

    pub fn records(&self) -> &[WatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&WatchRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Find a record by full id or unambiguous id prefix
    pub fn resolve(&self, id: &str) -> Option<&WatchRecord> {
        if let Some(exact) = self.get(id) {
            return Some(exact);
        }
        let mut matches = self.records.iter().filter(|r| r.id.starts_with(id));
        let first = matches.next()?;
        matches.next().is_none().then_some(first)
    }

    pub fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.records);
        }
    }

    /// Insert a new record at the front
    pub fn add(&mut self, record: WatchRecord) {
        debug!(id = %record.id, title = %record.title, "Adding record");
        self.records.insert(0, record);
        self.notify();
    }

    /// Mutate a record in place; refreshes the updated timestamp.
    /// Returns false when the id is unknown.
    pub fn update(&mut self, id: &str, apply: impl FnOnce(&mut WatchRecord)) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        apply(record);
        record.updated_at = Utc::now();
        debug!(id = %id, "Updated record");
        self.notify();
        true
    }

    /// Irreversible single delete
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() < before;
        if removed {
            debug!(id = %id, "Deleted record");
            self.notify();
        }
        removed
    }

    /// Irreversible bulk delete; returns how many records were removed
    pub fn delete_many(&mut self, ids: &[String]) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !ids.contains(&r.id));
        let removed = before - self.records.len();
        if removed > 0 {
            debug!(count = removed, "Bulk-deleted records");
            self.notify();
        }
        removed
    }

    /// Remove every record
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        if removed > 0 {
            self.records.clear();
            debug!(count = removed, "Cleared record store");
            self.notify();
        }
        removed
    }

    /// Merge an import batch: duplicates by identity are silently dropped and
    /// counted, the unique remainder is prepended in batch order
    pub fn merge_import(&mut self, incoming: Vec<WatchRecord>) -> ImportReport {
        let (unique, skipped_duplicates) = import::dedup_against(&self.records, incoming);
        let imported = unique.len();

        let mut merged = unique;
        merged.append(&mut self.records);
        self.records = merged;

        if imported > 0 {
            self.notify();
        }
        debug!(imported, skipped_duplicates, "Merged import batch");
        ImportReport {
            imported,
            skipped_duplicates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use watchlog_models::{MediaKind, WatchStatus};

    fn record(title: &str) -> WatchRecord {
        WatchRecord::new(title, WatchStatus::Watched, MediaKind::Movie)
    }

    #[test]
    fn test_add_prepends() {
        let mut store = RecordStore::new();
        store.add(record("first"));
        store.add(record("second"));
        assert_eq!(store.records()[0].title, "second");
        assert_eq!(store.records()[1].title, "first");
    }

    #[test]
    fn test_update_refreshes_timestamp() {
        let mut store = RecordStore::new();
        let mut r = record("Foo");
        r.updated_at = Utc::now() - chrono::Duration::hours(1);
        let id = r.id.clone();
        let stale = r.updated_at;
        store.add(r);

        assert!(store.update(&id, |r| r.review = "很好看".to_string()));
        let updated = store.get(&id).unwrap();
        assert_eq!(updated.review, "很好看");
        assert!(updated.updated_at > stale);

        assert!(!store.update("no-such-id", |_| {}));
    }

    #[test]
    fn test_delete_and_bulk_delete() {
        let mut store = RecordStore::new();
        let a = record("a");
        let b = record("b");
        let c = record("c");
        let ids = vec![a.id.clone(), b.id.clone()];
        store.add(a);
        store.add(b);
        store.add(c);

        assert_eq!(store.delete_many(&ids), 2);
        assert_eq!(store.len(), 1);
        assert!(!store.delete("already-gone"));
        assert_eq!(store.clear(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_merge_import_dedups_and_prepends() {
        let mut store = RecordStore::new();
        let existing = record("existing");
        let duplicate = existing.clone();
        store.add(existing);

        let fresh = record("fresh");
        let report = store.merge_import(vec![fresh.clone(), duplicate]);
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped_duplicates, 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].id, fresh.id);
    }

    #[test]
    fn test_listeners_fire_on_every_mutation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut store = RecordStore::new();
        store.on_change(Box::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        let r = record("Foo");
        let id = r.id.clone();
        store.add(r); // 1
        store.update(&id, |r| r.rating = 5.0); // 2
        store.delete(&id); // 3
        store.merge_import(vec![record("bar")]); // 4
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_resolve_by_prefix() {
        let mut store = RecordStore::new();
        let mut a = record("a");
        a.id = "abc-123".to_string();
        let mut b = record("b");
        b.id = "abd-456".to_string();
        store.add(a);
        store.add(b);

        assert_eq!(store.resolve("abc").unwrap().title, "a");
        assert!(store.resolve("ab").is_none()); // ambiguous
        assert!(store.resolve("zzz").is_none());
    }
}
