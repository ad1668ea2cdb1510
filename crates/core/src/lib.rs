//! Domain types and pure logic for the Ojisandex field guide.
//!
//! This crate has no I/O and no internal dependencies: the entry record
//! model, draft validation, the encounter-rate vocabulary, JSON extraction
//! from free-form model output, illustration naming, UI label tables, and
//! the catalog view engine all live here so that the store, pipeline, API,
//! and CLI crates can share them.

pub mod encounter;
pub mod entry;
pub mod error;
pub mod extract;
pub mod i18n;
pub mod naming;
pub mod types;
pub mod view;
