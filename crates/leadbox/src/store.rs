//! The shared lead store.
//!
//! Both the submission form and the admin console talk to leads only through
//! a [`RecordStore`] handle. [`LeadStore`] implements it on top of any
//! [`KeyValueBackend`] by keeping the whole sequence as one JSON array under
//! a single key.
//!
//! Every mutation is a read-modify-write of that array. Two processes
//! mutating the same backend concurrently can lose each other's writes; the
//! last writer wins.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::lead::{Lead, LeadId};
use crate::storage::{KeyValueBackend, MemoryBackend};

/// Key the lead array is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "applications";

/// Operations shared by the submission form and the admin console.
pub trait RecordStore {
    /// All stored leads in insertion order.
    ///
    /// Missing or unreadable data yields an empty sequence.
    fn load(&self) -> Vec<Lead>;

    /// Append a lead after all existing ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated sequence cannot be written.
    fn append(&self, lead: Lead) -> Result<()>;

    /// Remove every lead with the given id, keeping the rest in order.
    ///
    /// Returns `true` if anything was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated sequence cannot be written.
    fn remove_by_id(&self, id: LeadId) -> Result<bool>;

    /// Discard all leads.
    ///
    /// # Errors
    ///
    /// Returns an error if the empty sequence cannot be written.
    fn clear(&self) -> Result<()>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn load(&self) -> Vec<Lead> {
        (**self).load()
    }

    fn append(&self, lead: Lead) -> Result<()> {
        (**self).append(lead)
    }

    fn remove_by_id(&self, id: LeadId) -> Result<bool> {
        (**self).remove_by_id(id)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

/// A [`RecordStore`] persisted as a JSON array in a key-value backend.
#[derive(Debug)]
pub struct LeadStore<B> {
    backend: B,
    key: String,
}

impl LeadStore<MemoryBackend> {
    /// A store that lives only as long as the returned value.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl<B: KeyValueBackend> LeadStore<B> {
    /// Wrap a backend using the default storage key.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Wrap a backend using a custom storage key.
    #[must_use]
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The key the lead array is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn save(&self, leads: &[Lead]) -> Result<()> {
        let json = serde_json::to_string(leads)?;
        self.backend.set_item(&self.key, &json)
    }
}

impl<B: KeyValueBackend> RecordStore for LeadStore<B> {
    fn load(&self) -> Vec<Lead> {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read '{}', treating as empty: {}", self.key, e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Stored leads under '{}' are not valid JSON, treating as empty: {}", self.key, e);
            Vec::new()
        })
    }

    fn append(&self, lead: Lead) -> Result<()> {
        let mut leads = self.load();
        debug!("Appending lead {} after {} existing", lead.id, leads.len());
        leads.push(lead);
        self.save(&leads)
    }

    fn remove_by_id(&self, id: LeadId) -> Result<bool> {
        let mut leads = self.load();
        let before = leads.len();
        leads.retain(|lead| lead.id != id);
        let removed = before - leads.len();

        self.save(&leads)?;
        if removed > 0 {
            info!("Removed {} lead(s) with id {}", removed, id);
        }
        Ok(removed > 0)
    }

    fn clear(&self) -> Result<()> {
        self.save(&[])?;
        info!("Cleared all leads under '{}'", self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::LeadForm;
    use crate::storage::SqliteBackend;
    use chrono::{Duration, TimeZone, Utc};

    fn lead_at(name: &str, offset_ms: i64) -> Lead {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
            + Duration::milliseconds(offset_ms);
        LeadForm::new(name, format!("@{name}"), format!("{name}@example.com")).into_lead(at)
    }

    #[test]
    fn test_load_never_stored_is_empty() {
        let store = LeadStore::in_memory();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_append_then_load() {
        let store = LeadStore::in_memory();
        store.append(lead_at("anna", 0)).unwrap();

        let before = store.load().len();
        let lead = lead_at("boris", 1);
        store.append(lead.clone()).unwrap();

        let leads = store.load();
        assert_eq!(leads.len(), before + 1);
        assert_eq!(leads.last(), Some(&lead));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let store = LeadStore::in_memory();
        // Later timestamps first, to make sure nothing sorts by time.
        store.append(lead_at("c", 300)).unwrap();
        store.append(lead_at("a", 100)).unwrap();
        store.append(lead_at("b", 200)).unwrap();

        let names: Vec<_> = store.load().into_iter().map(|l| l.full_name).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn test_remove_by_id_keeps_others_in_order() {
        let store = LeadStore::in_memory();
        let leads: Vec<_> = (0..4).map(|i| lead_at(&format!("n{i}"), i)).collect();
        for lead in &leads {
            store.append(lead.clone()).unwrap();
        }

        assert!(store.remove_by_id(leads[1].id).unwrap());

        let remaining = store.load();
        assert_eq!(remaining, vec![leads[0].clone(), leads[2].clone(), leads[3].clone()]);
    }

    #[test]
    fn test_remove_unknown_id() {
        let store = LeadStore::in_memory();
        store.append(lead_at("anna", 0)).unwrap();

        assert!(!store.remove_by_id(LeadId(42)).unwrap());
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_remove_colliding_ids_removes_all() {
        let store = LeadStore::in_memory();
        store.append(lead_at("first", 0)).unwrap();
        store.append(lead_at("second", 0)).unwrap();
        store.append(lead_at("third", 5)).unwrap();

        assert!(store.remove_by_id(lead_at("x", 0).id).unwrap());
        let names: Vec<_> = store.load().into_iter().map(|l| l.full_name).collect();
        assert_eq!(names, ["third"]);
    }

    #[test]
    fn test_clear() {
        let store = LeadStore::in_memory();
        store.clear().unwrap();
        assert!(store.load().is_empty());

        for i in 0..3 {
            store.append(lead_at("x", i)).unwrap();
        }
        store.clear().unwrap();
        assert!(store.load().is_empty());
        assert_eq!(
            store.backend().get_item(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_corrupted_json_loads_empty() {
        crate::logging::init_test_logging();
        let backend = MemoryBackend::new();
        backend.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let store = LeadStore::new(backend);

        assert!(store.load().is_empty());

        // The next write replaces the corrupted value.
        store.append(lead_at("anna", 0)).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_non_array_json_loads_empty() {
        let backend = MemoryBackend::new();
        backend.set_item(DEFAULT_STORAGE_KEY, r#"{"id":1}"#).unwrap();
        assert!(LeadStore::new(backend).load().is_empty());
    }

    #[test]
    fn test_reads_browser_written_array() {
        let backend = MemoryBackend::new();
        backend
            .set_item(
                DEFAULT_STORAGE_KEY,
                r#"[{"fullName":"Иван Иванов","telegram":"@ivan","email":"ivan@example.com","message":"","timestamp":"2024-01-15T10:30:00.000Z","id":1705314600000}]"#,
            )
            .unwrap();

        let leads = LeadStore::new(backend).load();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].id, LeadId(1_705_314_600_000));
        assert_eq!(leads[0].telegram, "@ivan");
    }

    #[test]
    fn test_custom_key_is_isolated() {
        let backend = MemoryBackend::new();
        let default_store = LeadStore::new(&backend);
        let other_store = LeadStore::with_key(&backend, "archive");

        default_store.append(lead_at("anna", 0)).unwrap();

        assert_eq!(other_store.key(), "archive");
        assert!(other_store.load().is_empty());
        assert_eq!(default_store.load().len(), 1);
    }

    #[test]
    fn test_sqlite_backed_store() {
        let store = LeadStore::new(SqliteBackend::open_in_memory().unwrap());
        let lead = lead_at("anna", 0);
        store.append(lead.clone()).unwrap();

        assert_eq!(store.load(), vec![lead.clone()]);
        assert!(store.remove_by_id(lead.id).unwrap());
        assert!(store.load().is_empty());
    }
}
