pub mod casing;
pub mod domain;
pub mod ports;
pub mod validate;
pub mod view;

pub use domain::{MaterialDraft, MaterialPatch, MaterialRecord, SelectOption, StoreStatus};
pub use ports::{
    ConnectivityProbe, MaterialBackend, Origin, PortError, PortResult, ReferenceDataService,
    RemoteBackend, Served,
};
pub use validate::{validate_draft, validate_patch, ValidationError};
pub use view::{render_table, TableRow, TableView};
