//! Flat-file persistence for the entry catalog.
//!
//! The persisted form — one pretty-printed JSON array of entry records —
//! is the single source of truth. [`CatalogStore`] wraps it behind a
//! load/save/append API with an atomic full-file rewrite, and also owns
//! the illustration directory next to it. Single writer assumed: the
//! generation runs are operator-invoked, never concurrent. If two writers
//! do race, the last save wins.

pub mod paths;
pub mod store;

pub use paths::CatalogPaths;
pub use store::{CatalogStore, StoreError};
