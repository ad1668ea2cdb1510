//! Location of the catalog file and illustration directory.
//!
//! Everything lives under one public asset root so the HTTP service can
//! serve the tree statically exactly as the pipeline wrote it.

use std::path::{Path, PathBuf};

use ojisandex_core::naming::IMAGES_SUBDIR;

/// Env var overriding the public asset root.
pub const PUBLIC_DIR_ENV: &str = "OJISANDEX_PUBLIC_DIR";

/// Default public asset root, relative to the working directory.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Subdirectory of the public root holding the catalog file.
const DATA_SUBDIR: &str = "data";

/// Catalog filename.
const CATALOG_FILE: &str = "entries.json";

/// Resolved locations of the persisted catalog and its illustrations.
#[derive(Debug, Clone)]
pub struct CatalogPaths {
    public_dir: PathBuf,
}

impl CatalogPaths {
    /// Root the catalog under an explicit public directory.
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    /// Root the catalog under `OJISANDEX_PUBLIC_DIR`, defaulting to
    /// `public/`.
    pub fn from_env() -> Self {
        let dir = std::env::var(PUBLIC_DIR_ENV).unwrap_or_else(|_| DEFAULT_PUBLIC_DIR.into());
        Self::new(dir)
    }

    /// The public asset root.
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// The catalog file (`<public>/data/entries.json`).
    pub fn catalog_file(&self) -> PathBuf {
        self.public_dir.join(DATA_SUBDIR).join(CATALOG_FILE)
    }

    /// The illustration directory (`<public>/images`).
    pub fn images_dir(&self) -> PathBuf {
        self.public_dir.join(IMAGES_SUBDIR)
    }
}
