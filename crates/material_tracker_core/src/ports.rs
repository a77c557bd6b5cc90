//! crates/material_tracker_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the physical stores and catalog APIs behind them.

use crate::domain::{MaterialDraft, MaterialPatch, MaterialRecord, SelectOption};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., the
/// remote REST store, the local blob slot, the catalog APIs).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Remote store error: {0}")]
    Remote(String),
    #[error("Local storage error: {0}")]
    Storage(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Serving Origin
//=========================================================================================

/// Which physical store actually served an operation. `Fallback` means the
/// remote store was attempted first and failed for that one call; the cached
/// online flag is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Remote,
    Local,
    Fallback { reason: String },
}

impl Origin {
    pub fn fallback(reason: impl Into<String>) -> Self {
        Origin::Fallback {
            reason: reason.into(),
        }
    }
}

/// An operation result tagged with the store that produced it, so callers can
/// distinguish "served from remote" from "served from the local fallback".
#[derive(Debug, Clone, PartialEq)]
pub struct Served<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Served<T> {
    pub fn new(value: T, origin: Origin) -> Self {
        Self { value, origin }
    }
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The uniform CRUD contract both physical stores implement.
#[async_trait]
pub trait MaterialBackend: Send + Sync {
    /// Returns every record the store holds. Ordering is store-defined:
    /// descending by `id` for the remote store, insertion order locally.
    async fn list(&self) -> PortResult<Vec<MaterialRecord>>;

    /// Persists a draft and returns the stored record, identity included.
    async fn create(&self, draft: MaterialDraft) -> PortResult<MaterialRecord>;

    /// Merges `patch` onto the record with the given `id`. Returns `None`
    /// when no such record exists.
    async fn update(&self, id: i64, patch: MaterialPatch) -> PortResult<Option<MaterialRecord>>;

    /// Removes the record with the given `id`. Deleting an unknown `id` is
    /// not an error; the set is left unchanged and `true` is still reported.
    async fn delete(&self, id: i64) -> PortResult<bool>;
}

/// A one-shot reachability check against a store's base endpoint.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn probe(&self) -> PortResult<()>;
}

/// The remote store contract: the CRUD surface plus the probe and an insert
/// that preserves an already-assigned identity (used when uploading local
/// records to the remote store).
#[async_trait]
pub trait RemoteBackend: MaterialBackend + ConnectivityProbe {
    async fn insert(&self, record: &MaterialRecord) -> PortResult<MaterialRecord>;
}

/// Loads the two UI selection lists from external catalogs. Implementations
/// must return a hardcoded fallback list instead of an error on failure.
#[async_trait]
pub trait ReferenceDataService: Send + Sync {
    async fn load_materials(&self) -> Vec<SelectOption>;
    async fn load_locations(&self) -> Vec<SelectOption>;
}
