// MainStreet - ui/panels/mod.rs

pub mod about;
pub mod chips;
pub mod claim;
pub mod contact;
pub mod directory;
pub mod filters;
pub mod options;
