//! services/api/src/store.rs
//!
//! The record-store façade: one uniform CRUD surface over whichever physical
//! backend is active. A one-time probe at initialization decides between the
//! remote store and the local blob store; a remote call that fails at runtime
//! falls back to local for that call only, without flipping the cached flag.

use material_tracker_core::domain::{MaterialDraft, MaterialPatch, MaterialRecord, StoreStatus};
use material_tracker_core::ports::{
    MaterialBackend, Origin, PortResult, RemoteBackend, Served,
};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{error, info, warn};

/// The cached connectivity outcome. `uninitialized -> probing -> {online,
/// offline}`, terminal for the instance's lifetime unless `initialize` is
/// called again explicitly.
#[derive(Debug, Clone, Copy, Default)]
struct Connectivity {
    initialized: bool,
    online: bool,
}

/// The persistence façade handed to the web layer. Constructed explicitly
/// and injected; there is no module-level instance.
pub struct MaterialStore {
    remote: Option<Arc<dyn RemoteBackend>>,
    local: Arc<dyn MaterialBackend>,
    table_name: String,
    conn: RwLock<Connectivity>,
}

impl MaterialStore {
    /// Creates an uninitialized façade. `remote` is `None` when no usable
    /// credentials are configured; the probe is then skipped entirely.
    pub fn new(
        remote: Option<Arc<dyn RemoteBackend>>,
        local: Arc<dyn MaterialBackend>,
        table_name: String,
    ) -> Self {
        Self {
            remote,
            local,
            table_name,
            conn: RwLock::new(Connectivity::default()),
        }
    }

    /// Probes the remote store once and caches the outcome as the online
    /// flag. Returns the flag. Calling this again re-runs the probe; nothing
    /// else ever re-evaluates it.
    pub async fn initialize(&self) -> bool {
        let online = match &self.remote {
            None => {
                warn!("Remote store not configured. Using local storage as backup.");
                false
            }
            Some(remote) => match remote.probe().await {
                Ok(()) => {
                    info!("Remote store connection established");
                    true
                }
                Err(e) => {
                    error!("Remote store unreachable, using local storage: {}", e);
                    false
                }
            },
        };
        let mut conn = self.conn.write().unwrap_or_else(PoisonError::into_inner);
        conn.initialized = true;
        conn.online = online;
        online
    }

    fn connectivity(&self) -> Connectivity {
        *self.conn.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// The active remote backend, present only when the cached flag says
    /// online.
    fn active_remote(&self) -> Option<&Arc<dyn RemoteBackend>> {
        if self.connectivity().online {
            self.remote.as_ref()
        } else {
            None
        }
    }

    //=====================================================================================
    // CRUD Operations
    //=====================================================================================

    /// Returns all records: remote order is descending by id, local order is
    /// insertion order. Never fails; a local read error yields an empty set.
    pub async fn list(&self) -> Served<Vec<MaterialRecord>> {
        if let Some(remote) = self.active_remote() {
            match remote.list().await {
                Ok(records) => return Served::new(records, Origin::Remote),
                Err(e) => {
                    warn!("Remote list failed, serving local snapshot: {}", e);
                    return Served::new(self.local_snapshot().await, Origin::fallback(e.to_string()));
                }
            }
        }
        Served::new(self.local_snapshot().await, Origin::Local)
    }

    async fn local_snapshot(&self) -> Vec<MaterialRecord> {
        match self.local.list().await {
            Ok(records) => records,
            Err(e) => {
                error!("Local read failed, serving empty set: {}", e);
                Vec::new()
            }
        }
    }

    /// Persists a draft. The local path is the guaranteed backstop: the only
    /// error case is the local write itself failing.
    pub async fn create(&self, draft: MaterialDraft) -> PortResult<Served<MaterialRecord>> {
        if let Some(remote) = self.active_remote() {
            match remote.create(draft.clone()).await {
                Ok(record) => return Ok(Served::new(record, Origin::Remote)),
                Err(e) => {
                    warn!("Remote create failed, falling back to local: {}", e);
                    let record = self.local.create(draft).await?;
                    return Ok(Served::new(record, Origin::fallback(e.to_string())));
                }
            }
        }
        let record = self.local.create(draft).await?;
        Ok(Served::new(record, Origin::Local))
    }

    /// Merges a patch onto the record with the given id. `None` when no such
    /// record exists in the store that served the call.
    pub async fn update(
        &self,
        id: i64,
        patch: MaterialPatch,
    ) -> PortResult<Served<Option<MaterialRecord>>> {
        if let Some(remote) = self.active_remote() {
            match remote.update(id, patch.clone()).await {
                Ok(updated) => return Ok(Served::new(updated, Origin::Remote)),
                Err(e) => {
                    warn!("Remote update failed, falling back to local: {}", e);
                    let updated = self.local.update(id, patch).await?;
                    return Ok(Served::new(updated, Origin::fallback(e.to_string())));
                }
            }
        }
        let updated = self.local.update(id, patch).await?;
        Ok(Served::new(updated, Origin::Local))
    }

    /// Removes the record with the given id. Deleting an id the local store
    /// does not hold still reports success.
    pub async fn delete(&self, id: i64) -> PortResult<Served<bool>> {
        if let Some(remote) = self.active_remote() {
            match remote.delete(id).await {
                Ok(removed) => return Ok(Served::new(removed, Origin::Remote)),
                Err(e) => {
                    warn!("Remote delete failed, falling back to local: {}", e);
                    let removed = self.local.delete(id).await?;
                    return Ok(Served::new(removed, Origin::fallback(e.to_string())));
                }
            }
        }
        let removed = self.local.delete(id).await?;
        Ok(Served::new(removed, Origin::Local))
    }

    //=====================================================================================
    // Synchronization and Status
    //=====================================================================================

    /// Uploads local records whose ids are absent remotely. One-way only; no
    /// conflict resolution. A no-op returning 0 while offline.
    pub async fn sync_to_remote(&self) -> PortResult<usize> {
        let Some(remote) = self.active_remote() else {
            return Ok(0);
        };
        let local_records = self.local.list().await?;
        let remote_records = remote.list().await?;
        let mut uploaded = 0;
        for record in &local_records {
            if !remote_records.iter().any(|r| r.id == record.id) {
                remote.insert(record).await?;
                uploaded += 1;
            }
        }
        info!("Synchronized {} local records to the remote store", uploaded);
        Ok(uploaded)
    }

    /// The passive connectivity indicator. No behavioral effect.
    pub fn status(&self) -> StoreStatus {
        let conn = self.connectivity();
        StoreStatus {
            initialized: conn.initialized,
            online: conn.online,
            table_name: self.table_name.clone(),
            has_credentials: self.remote.is_some(),
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================
