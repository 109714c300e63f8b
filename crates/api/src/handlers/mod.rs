//! Request handlers.
//!
//! `resource` holds the generic CRUD handler set; the entity modules
//! provide the per-entity [`resource::Resource`] implementations it is
//! instantiated with.

pub mod anime;
pub mod category;
pub mod home;
pub mod item;
pub mod resource;
