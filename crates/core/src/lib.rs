//! Domain types, errors, and form validation for the AniMart catalog.
//!
//! This crate is free of database and HTTP dependencies; the api and db
//! crates build on it.

pub mod error;
pub mod types;
pub mod validate;
