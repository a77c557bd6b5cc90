//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use crate::store::MaterialStore;
use material_tracker_core::ports::ReferenceDataService;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers. The store façade and the reference-data loader are injected
/// here rather than living behind module-level globals.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MaterialStore>,
    pub reference: Arc<dyn ReferenceDataService>,
    pub config: Arc<Config>,
}
