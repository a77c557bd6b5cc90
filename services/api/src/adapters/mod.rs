pub mod local;
pub mod reference;
pub mod remote;

pub use local::{FileSlot, LocalStore, MemorySlot, StorageSlot};
pub use reference::CatalogAdapter;
pub use remote::SupabaseStore;
