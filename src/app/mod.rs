// MainStreet - app/mod.rs
//
// Application layer: orchestration, state management, catalog loading.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod announce;
pub mod catalog_mgr;
pub mod debounce;
pub mod leads;
pub mod state;
