// MainStreet - core/mod.rs
//
// Core business logic layer.
// Pure state and decision functions; writes only to caller-supplied sinks.
// Must NOT depend on: ui, platform, app, or any I/O crate directly.

pub mod catalog;
pub mod claim;
pub mod contact;
pub mod export;
pub mod filter;
pub mod model;
