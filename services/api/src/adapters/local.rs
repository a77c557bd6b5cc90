//! services/api/src/adapters/local.rs
//!
//! The local fallback store. The entire record set lives in one string slot
//! serialized as a JSON array, read fully and rewritten fully on every
//! operation, so records keep their insertion order.

use async_trait::async_trait;
use chrono::Utc;
use material_tracker_core::domain::{MaterialDraft, MaterialPatch, MaterialRecord};
use material_tracker_core::ports::{MaterialBackend, PortError, PortResult};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

//=========================================================================================
// The Storage Slot
//=========================================================================================

/// A single string-keyed slot. The store reads and writes the whole blob;
/// the slot is the only thing that touches the underlying medium.
pub trait StorageSlot: Send + Sync {
    /// Returns the current blob, or `None` when nothing was ever written.
    fn read(&self) -> PortResult<Option<String>>;
    fn write(&self, contents: &str) -> PortResult<()>;
}

/// A slot backed by a single file on disk.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StorageSlot for FileSlot {
    fn read(&self) -> PortResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PortError::Storage(e.to_string())),
        }
    }

    fn write(&self, contents: &str) -> PortResult<()> {
        std::fs::write(&self.path, contents).map_err(|e| PortError::Storage(e.to_string()))
    }
}

/// An in-memory slot. Used by tests and by ephemeral deployments that do not
/// want a data file on disk.
#[derive(Default)]
pub struct MemorySlot {
    contents: Mutex<Option<String>>,
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> PortResult<Option<String>> {
        Ok(self
            .contents
            .lock()
            .map_err(|e| PortError::Storage(e.to_string()))?
            .clone())
    }

    fn write(&self, contents: &str) -> PortResult<()> {
        *self
            .contents
            .lock()
            .map_err(|e| PortError::Storage(e.to_string()))? = Some(contents.to_string());
        Ok(())
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A local store that implements the `MaterialBackend` port over a blob slot.
#[derive(Clone)]
pub struct LocalStore {
    slot: Arc<dyn StorageSlot>,
}

impl LocalStore {
    /// Creates a new `LocalStore`.
    pub fn new(slot: Arc<dyn StorageSlot>) -> Self {
        Self { slot }
    }

    fn load(&self) -> PortResult<Vec<MaterialRecord>> {
        match self.slot.read()? {
            Some(blob) => {
                serde_json::from_str(&blob).map_err(|e| PortError::Storage(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, records: &[MaterialRecord]) -> PortResult<()> {
        let blob =
            serde_json::to_string(records).map_err(|e| PortError::Storage(e.to_string()))?;
        self.slot.write(&blob)
    }

    /// Picks the next local identity: the current Unix timestamp in
    /// milliseconds, bumped past the highest existing id so that several
    /// creations inside the same millisecond stay unique.
    fn next_id(records: &[MaterialRecord]) -> i64 {
        let candidate = Utc::now().timestamp_millis();
        let max_existing = records.iter().map(|r| r.id).max().unwrap_or(0);
        candidate.max(max_existing + 1)
    }
}

//=========================================================================================
// `MaterialBackend` Trait Implementation
//=========================================================================================

#[async_trait]
impl MaterialBackend for LocalStore {
    /// Returns the records in insertion order.
    async fn list(&self) -> PortResult<Vec<MaterialRecord>> {
        self.load()
    }

    async fn create(&self, draft: MaterialDraft) -> PortResult<MaterialRecord> {
        let mut records = self.load()?;
        let record = MaterialRecord {
            id: Self::next_id(&records),
            material_type: draft.material_type,
            weight: draft.weight,
            intake_date: draft.intake_date,
            location: draft.location,
            description: draft.description,
            created_at: Some(Utc::now()),
            modified_at: None,
        };
        records.push(record.clone());
        self.save(&records)?;
        Ok(record)
    }

    async fn update(&self, id: i64, patch: MaterialPatch) -> PortResult<Option<MaterialRecord>> {
        let mut records = self.load()?;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        record.apply_patch(&patch);
        record.modified_at = Some(Utc::now());
        let updated = record.clone();
        self.save(&records)?;
        Ok(Some(updated))
    }

    /// Filtered-keep semantics: deleting an unknown id leaves the set
    /// unchanged and still reports success.
    async fn delete(&self, id: i64) -> PortResult<bool> {
        let mut records = self.load()?;
        records.retain(|r| r.id != id);
        self.save(&records)?;
        Ok(true)
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn store() -> LocalStore {
        LocalStore::new(Arc::new(MemorySlot::default()))
    }

    fn draft(material_type: &str, weight: f64, location: &str, description: &str) -> MaterialDraft {
        MaterialDraft {
            material_type: material_type.to_string(),
            weight,
            intake_date: NaiveDate::from_ymd_opt(2026, 8, 29).unwrap(),
            location: location.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_identity_and_creation_timestamp() {
        let store = store();
        let record = store.create(draft("oro", 12.5, "Mina Norte", "")).await.unwrap();
        assert!(record.id > 0);
        assert!(record.created_at.is_some());
        assert!(record.modified_at.is_none());
    }

    #[tokio::test]
    async fn list_returns_records_in_insertion_order() {
        let store = store();
        let a = store.create(draft("oro", 1.0, "A", "")).await.unwrap();
        let b = store.create(draft("plata", 2.0, "B", "")).await.unwrap();
        let c = store.create(draft("cobre", 3.0, "C", "")).await.unwrap();
        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[tokio::test]
    async fn ids_stay_unique_within_one_millisecond() {
        let store = store();
        let a = store.create(draft("oro", 1.0, "A", "")).await.unwrap();
        let b = store.create(draft("plata", 2.0, "B", "")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn update_merges_and_preserves_unspecified_fields() {
        let store = store();
        let created = store
            .create(draft("cobre", 3.0, "A", "lote 1"))
            .await
            .unwrap();
        let updated = store
            .update(
                created.id,
                MaterialPatch {
                    weight: Some(4.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("record should exist");
        assert_eq!(updated.weight, 4.0);
        assert_eq!(updated.description, "lote 1");
        assert_eq!(updated.material_type, "cobre");
        assert!(updated.modified_at.is_some());
    }

    #[tokio::test]
    async fn update_of_unknown_id_returns_none() {
        let store = store();
        let result = store.update(999, MaterialPatch::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = store();
        let created = store.create(draft("oro", 1.0, "A", "")).await.unwrap();
        assert!(store.delete(created.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
        // Second delete of the same id still reports success.
        assert!(store.delete(created.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn a_failing_slot_surfaces_as_a_storage_error() {
        struct BrokenSlot;
        impl StorageSlot for BrokenSlot {
            fn read(&self) -> PortResult<Option<String>> {
                Ok(None)
            }
            fn write(&self, _contents: &str) -> PortResult<()> {
                Err(PortError::Storage("quota exceeded".to_string()))
            }
        }
        let store = LocalStore::new(Arc::new(BrokenSlot));
        let result = store.create(draft("oro", 1.0, "A", "")).await;
        assert!(matches!(result, Err(PortError::Storage(_))));
    }
}
