//! Route modules. Each exposes a `router()` mounted by [`crate::router`].

pub mod entries;
pub mod health;
pub mod labels;
