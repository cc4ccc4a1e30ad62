// Composition repository over the key-value store
// The whole list is stored as one JSON array under a single key
use std::sync::{Arc, Mutex, MutexGuard};

use super::kv::{KeyValueStore, PersistError, PersistResult};
use super::models::{Composition, CompositionSummary, StoredComposition};
use super::save_guard::SaveGuard;
use crate::config::AppConfig;
use crate::taals::TaalCatalog;

/// Load, save and delete compositions.
///
/// Every read-modify-write of the list runs under `list_lock`, and saves for
/// the same id are additionally queued through `SaveGuard`.
pub struct CompositionStore<S: KeyValueStore> {
    store: S,
    catalog: Arc<TaalCatalog>,
    key: String,
    default_row_count: usize,
    list_lock: Mutex<()>,
    save_guard: SaveGuard,
}

impl<S: KeyValueStore> CompositionStore<S> {
    pub fn new(store: S, catalog: Arc<TaalCatalog>, config: &AppConfig) -> Self {
        CompositionStore {
            store,
            catalog,
            key: config.storage_key.clone(),
            default_row_count: config.default_row_count,
            list_lock: Mutex::new(()),
            save_guard: SaveGuard::new(),
        }
    }

    pub fn save_guard(&self) -> &SaveGuard {
        &self.save_guard
    }

    fn lock_list(&self) -> MutexGuard<'_, ()> {
        self.list_lock.lock().unwrap_or_else(|p| p.into_inner())
    }

    // ==================== READS ====================

    /// Load every composition, migrating legacy records in place
    pub fn load_all(&self) -> PersistResult<Vec<Composition>> {
        let _list = self.lock_list();
        self.load_locked()
    }

    /// Load every composition, treating any failure as an empty list
    pub fn load_all_or_empty(&self) -> Vec<Composition> {
        match self.load_all() {
            Ok(compositions) => compositions,
            Err(e) => {
                log::error!("Error loading compositions: {}", e);
                Vec::new()
            }
        }
    }

    /// List entries for the compositions screen, in stored order
    pub fn list_summaries(&self) -> Vec<CompositionSummary> {
        self.load_all_or_empty()
            .iter()
            .map(|c| c.summary(&self.catalog))
            .collect()
    }

    /// Get a composition by id
    pub fn get(&self, id: &str) -> PersistResult<Option<Composition>> {
        Ok(self.load_all()?.into_iter().find(|c| c.id == id))
    }

    // ==================== WRITES ====================

    /// Create a composition with an empty grid and append it to the list
    pub fn create(&self, name: &str, taal_id: &str) -> PersistResult<Composition> {
        let taal = self.catalog.get(taal_id);
        let composition = Composition::new(name, taal, self.default_row_count)?;

        let _list = self.lock_list();
        let mut compositions = self.load_locked()?;
        compositions.push(composition.clone());
        self.write_locked(&compositions)?;

        log::info!(
            "Created composition '{}' ({}) in {}",
            composition.name,
            composition.id,
            taal.name
        );
        Ok(composition)
    }

    /// Persist the editor's working copy, replacing the stored record whole
    pub async fn save(&self, composition: &Composition) -> PersistResult<()> {
        let _ticket = self.save_guard.acquire(&composition.id).await;
        self.replace(composition)
    }

    fn replace(&self, composition: &Composition) -> PersistResult<()> {
        let _list = self.lock_list();
        let mut compositions = self.load_locked()?;

        let slot = compositions
            .iter_mut()
            .find(|c| c.id == composition.id)
            .ok_or_else(|| PersistError::NotFound(composition.id.clone()))?;
        *slot = composition.clone();

        self.write_locked(&compositions)?;
        log::info!("Saved composition {}", composition.id);
        Ok(())
    }

    /// Remove a composition; returns false when the id was not stored
    pub fn delete(&self, id: &str) -> PersistResult<bool> {
        let _list = self.lock_list();
        let mut compositions = self.load_locked()?;

        let before = compositions.len();
        compositions.retain(|c| c.id != id);
        if compositions.len() == before {
            return Ok(false);
        }

        self.write_locked(&compositions)?;
        log::info!("Deleted composition {}", id);
        Ok(true)
    }

    /// Overwrite the whole collection
    pub fn save_all(&self, compositions: &[Composition]) -> PersistResult<()> {
        let _list = self.lock_list();
        self.write_locked(compositions)
    }

    // Callers must hold `list_lock`
    fn load_locked(&self) -> PersistResult<Vec<Composition>> {
        let raw = match self.store.get_item(&self.key)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        let stored: Vec<StoredComposition> = serde_json::from_str(&raw)?;
        let migrated = stored.iter().filter(|c| c.needs_migration()).count();

        let compositions: Vec<Composition> = stored
            .into_iter()
            .map(|c| c.normalize(&self.catalog, self.default_row_count))
            .collect();

        if migrated > 0 {
            self.write_locked(&compositions)?;
            log::info!("Migrated {} legacy composition record(s)", migrated);
        }

        Ok(compositions)
    }

    fn write_locked(&self, compositions: &[Composition]) -> PersistResult<()> {
        let encoded = serde_json::to_string(compositions)
            .map_err(|e| PersistError::Serialization(e.to_string()))?;
        self.store.set_item(&self.key, &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::db::DbConnection;

    fn new_store() -> CompositionStore<DbConnection> {
        let db = DbConnection::open_in_memory().unwrap();
        let catalog = Arc::new(TaalCatalog::builtin().unwrap());
        CompositionStore::new(db, catalog, &AppConfig::default())
    }

    struct UnavailableStore;

    impl KeyValueStore for UnavailableStore {
        fn get_item(&self, _key: &str) -> PersistResult<Option<String>> {
            Err(PersistError::StorageUnavailable(rusqlite::Error::InvalidQuery))
        }

        fn set_item(&self, _key: &str, _value: &str) -> PersistResult<()> {
            Err(PersistError::StorageUnavailable(rusqlite::Error::InvalidQuery))
        }
    }

    #[test]
    fn test_empty_store_loads_empty_list() {
        let store = new_store();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_create_and_get() {
        let store = new_store();
        let comp = store.create("  Bandish  ", "rupak").unwrap();

        assert_eq!(comp.name, "Bandish");
        assert_eq!(comp.grid.row_count(), 12);
        assert!(comp.grid.is_uniform(7));

        let loaded = store.get(&comp.id).unwrap().unwrap();
        assert_eq!(loaded, comp);
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let store = new_store();
        assert!(matches!(
            store.create("   ", "rupak"),
            Err(PersistError::InvalidName(_))
        ));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_create_with_unknown_taal_uses_default() {
        let store = new_store();
        let comp = store.create("Fallback", "sooltaal").unwrap();
        assert_eq!(comp.taal, "teentaal");
        assert!(comp.grid.is_uniform(16));
    }

    #[tokio::test]
    async fn test_edit_save_reload() {
        let store = new_store();
        let mut comp = store.create("Gat", "teentaal").unwrap();
        assert!(comp.grid.rows().iter().flatten().all(|c| c.is_empty()));

        comp.grid.set_cell(0, 0, "Dha", 16).unwrap();
        store.save(&comp).await.unwrap();

        let reloaded = store.get(&comp.id).unwrap().unwrap();
        assert_eq!(reloaded.grid.cell(0, 0), Some("Dha"));
        assert_eq!(reloaded.grid.cell(0, 1), Some(""));
    }

    #[tokio::test]
    async fn test_save_unknown_id() {
        let store = new_store();
        let catalog = TaalCatalog::builtin().unwrap();
        let stray = Composition::new("Stray", catalog.get("dadra"), 12).unwrap();

        assert!(matches!(
            store.save(&stray).await,
            Err(PersistError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_saves_keep_list_intact() {
        let store = Arc::new(new_store());
        let mut a = store.create("A", "dadra").unwrap();
        let mut b = store.create("B", "keherwa").unwrap();

        a.grid.set_cell(0, 0, "Dhin", 6).unwrap();
        b.grid.set_cell(0, 0, "Na", 8).unwrap();
        let mut a2 = a.clone();
        a2.grid.set_cell(0, 1, "Na", 6).unwrap();

        let (r1, r2, r3) = tokio::join!(store.save(&a), store.save(&b), store.save(&a2));
        r1.unwrap();
        r2.unwrap();
        r3.unwrap();

        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].grid.cell(0, 0), Some("Dhin"));
        assert_eq!(all[1].grid.cell(0, 0), Some("Na"));
        assert!(!store.save_guard().is_in_flight(&a.id));
    }

    #[test]
    fn test_delete() {
        let store = new_store();
        let a = store.create("A", "dadra").unwrap();
        let b = store.create("B", "dadra").unwrap();

        assert!(store.delete(&a.id).unwrap());
        assert!(!store.delete(&a.id).unwrap());

        let remaining = store.load_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    }

    #[test]
    fn test_legacy_records_are_normalized_and_written_back() {
        let db = DbConnection::open_in_memory().unwrap();
        db.set_item(
            "compositions",
            r#"[{
                "id": "1717000000000",
                "name": "Old",
                "taal": {
                    "id": "ektaal",
                    "name": "Ektaal",
                    "structure": [2, 2, 2, 2, 2, 2],
                    "numberOfColumns": 12,
                    "description": ""
                },
                "createdAt": "2024-05-29T16:26:40.000Z",
                "grid": [["Dhin", "", "", "", "", "", "", "", "", "", "", ""]]
            }]"#,
        )
        .unwrap();

        let catalog = Arc::new(TaalCatalog::builtin().unwrap());
        let store = CompositionStore::new(db.clone(), catalog, &AppConfig::default());

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].taal, "ektaal");
        assert_eq!(loaded[0].grid.cell(0, 0), Some("Dhin"));

        let raw = db.get_item("compositions").unwrap().unwrap();
        let persisted: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted[0]["taal"], "ektaal");
    }

    #[test]
    fn test_partial_legacy_record_does_not_hide_others() {
        let db = DbConnection::open_in_memory().unwrap();
        db.set_item(
            "compositions",
            r#"[
                {"id": "a", "name": "Modern", "taal": "rupak", "createdAt": "2024-05-29T16:26:40Z", "grid": [["Tin", "", "", "", "", "", ""]]},
                {"id": "b", "name": "Legacy", "taal": {"id": "ektaal", "name": "Ektaal"}, "createdAt": "2024-05-29T16:26:40Z"}
            ]"#,
        )
        .unwrap();

        let catalog = Arc::new(TaalCatalog::builtin().unwrap());
        let store = CompositionStore::new(db.clone(), catalog, &AppConfig::default());

        let summaries = store.list_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].taal_name, "Rupak Taal");
        assert_eq!(summaries[1].taal_id, "ektaal");

        let legacy = store.get("b").unwrap().unwrap();
        assert!(legacy.grid.is_uniform(12));

        let raw = db.get_item("compositions").unwrap().unwrap();
        let persisted: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted[1]["taal"], "ektaal");
    }

    #[test]
    fn test_corrupt_payload() {
        let db = DbConnection::open_in_memory().unwrap();
        db.set_item("compositions", "{not json").unwrap();

        let catalog = Arc::new(TaalCatalog::builtin().unwrap());
        let store = CompositionStore::new(db, catalog, &AppConfig::default());

        assert!(matches!(
            store.load_all(),
            Err(PersistError::Deserialization(_))
        ));
        assert!(store.load_all_or_empty().is_empty());
    }

    #[test]
    fn test_unavailable_storage() {
        let catalog = Arc::new(TaalCatalog::builtin().unwrap());
        let store = CompositionStore::new(UnavailableStore, catalog, &AppConfig::default());

        assert!(matches!(
            store.load_all(),
            Err(PersistError::StorageUnavailable(_))
        ));
        assert!(store.load_all_or_empty().is_empty());
        assert!(store.list_summaries().is_empty());
    }

    #[test]
    fn test_list_summaries() {
        let store = new_store();
        store.create("First", "jhaptaal").unwrap();
        store.create("Second", "deepchandi").unwrap();

        let summaries = store.list_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].taal_name, "Jhaptaal");
        assert_eq!(summaries[1].taal_name, "Deepchandi Taal");
    }

    #[test]
    fn test_save_all_overwrites() {
        let store = new_store();
        store.create("A", "dadra").unwrap();
        store.save_all(&[]).unwrap();
        assert!(store.load_all().unwrap().is_empty());
    }
}
