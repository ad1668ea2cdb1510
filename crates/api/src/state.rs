use std::sync::Arc;

use ojisandex_catalog::{CatalogPaths, CatalogStore};

use crate::config::ServerConfig;

/// Shared application state: the configuration and the catalog store.
///
/// The store handle is cheap to share; the catalog itself is re-read per
/// request so a freshly generated entry appears without a restart.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: Arc<CatalogStore>,
}

impl AppState {
    /// Build state from a configuration, rooting the store under the
    /// configured public directory.
    pub fn new(config: ServerConfig) -> Self {
        let store = CatalogStore::new(&CatalogPaths::new(&config.public_dir));
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }
}
