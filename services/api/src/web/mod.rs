pub mod rest;
pub mod state;

// Re-export the handlers to make them easily accessible to the binary that
// will build the web server router.
pub use rest::{
    create_material_handler, delete_material_handler, list_materials_handler, reference_handler,
    status_handler, sync_materials_handler, update_material_handler,
};
