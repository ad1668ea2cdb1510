//! Catalog load/save and illustration writing.
//!
//! Saves rewrite the whole file: serialize, write a sibling temp file,
//! rename over the target. A reader never observes a partial catalog even
//! though the writer process itself has no locking.

use std::fs;
use std::path::PathBuf;

use ojisandex_core::encounter;
use ojisandex_core::entry::{clamp_danger_level, EntryRecord};
use ojisandex_core::naming;
use ojisandex_core::types::EntryId;

/// Errors from the persistence layer. These abort an invocation — there is
/// no per-item recovery below the file-write boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the catalog (or an illustration) failed.
    #[error("Catalog I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file exists but is not a JSON array of entry records.
    #[error("Catalog at {path} is not parseable: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Handle on the persisted catalog and its illustration directory.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    catalog_file: PathBuf,
    images_dir: PathBuf,
}

impl CatalogStore {
    /// Open a store over the given locations. Nothing is touched on disk
    /// until the first load or save.
    pub fn new(paths: &crate::CatalogPaths) -> Self {
        Self {
            catalog_file: paths.catalog_file(),
            images_dir: paths.images_dir(),
        }
    }

    /// The catalog file this store reads and rewrites.
    pub fn catalog_file(&self) -> &std::path::Path {
        &self.catalog_file
    }

    /// Load the full catalog.
    ///
    /// A missing file is the first-run state and loads as an empty
    /// catalog. An existing but unparseable file is an error — silently
    /// starting over would orphan every assigned id.
    ///
    /// Loading is also the validation boundary: out-of-range danger
    /// levels are clamped into 1..=5, and records persisted before the
    /// stored encounter rank existed get theirs resolved from the phrase
    /// pair.
    pub fn load(&self) -> Result<Vec<EntryRecord>, StoreError> {
        if !self.catalog_file.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.catalog_file)?;
        let mut entries: Vec<EntryRecord> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: self.catalog_file.clone(),
                source,
            })?;

        for entry in &mut entries {
            let clamped = clamp_danger_level(entry.danger_level);
            if clamped != entry.danger_level {
                tracing::warn!(
                    id = entry.id,
                    danger_level = entry.danger_level,
                    "Clamping out-of-range danger level"
                );
                entry.danger_level = clamped;
            }
            if entry.encounter_rank == encounter::RANK_UNKNOWN {
                entry.encounter_rank =
                    encounter::rank_for_phrases(&entry.encounter_ja, &entry.encounter_en);
            }
        }

        Ok(entries)
    }

    /// Persist the full catalog, pretty-printed, atomically with respect
    /// to this process: the serialized bytes go to a sibling temp file
    /// which is then renamed over the target. Parent directories are
    /// created as needed.
    pub fn save(&self, entries: &[EntryRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.catalog_file.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(entries)
            .expect("entry records always serialize to JSON");

        let tmp = self.catalog_file.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.catalog_file)?;

        tracing::debug!(
            path = %self.catalog_file.display(),
            count = entries.len(),
            "Catalog saved"
        );
        Ok(())
    }

    /// Identifier for the next new entry: `max existing + 1`, or 1 for an
    /// empty catalog. Never reuses an id, even when earlier records were
    /// created out of order.
    pub fn next_id(entries: &[EntryRecord]) -> EntryId {
        entries.iter().map(|e| e.id).max().map_or(1, |max| max + 1)
    }

    /// Write an illustration into the images directory, creating it as
    /// needed. Returns the catalog-relative path to record on the entry.
    pub fn write_illustration(&self, filename: &str, bytes: &[u8]) -> Result<String, StoreError> {
        fs::create_dir_all(&self.images_dir)?;
        fs::write(self.images_dir.join(filename), bytes)?;
        Ok(naming::illustration_rel_path(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogPaths;
    use chrono::Utc;

    fn record(id: EntryId, danger: u8, encounter_en: &str) -> EntryRecord {
        EntryRecord {
            id,
            title_ja: "テストおじさん".to_string(),
            title_en: "The Test".to_string(),
            description_ja: "説明".to_string(),
            description_en: "description".to_string(),
            habitat_ja: "会議室".to_string(),
            habitat_en: "Meeting room".to_string(),
            danger_level: danger,
            encounter_ja: String::new(),
            encounter_en: encounter_en.to_string(),
            ability_ja: "特技".to_string(),
            ability_en: "ability".to_string(),
            category_ja: "会社系".to_string(),
            category_en: "Office Type".to_string(),
            encounter_rank: encounter::rank_for_phrase(encounter_en),
            image: None,
            created_at: Utc::now(),
        }
    }

    fn store_in(dir: &std::path::Path) -> CatalogStore {
        CatalogStore::new(&CatalogPaths::new(dir))
    }

    #[test]
    fn missing_file_loads_as_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_preserves_records_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let entries = vec![record(2, 4, "Rare"), record(1, 2, "Common")];
        store.save(&entries).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, entries);
    }

    #[test]
    fn save_creates_parent_directories_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir.path().join("deeply/nested"));

        store.save(&[record(1, 3, "Common")]).unwrap();

        assert!(store.catalog_file().exists());
        assert!(!store.catalog_file().with_extension("json.tmp").exists());
    }

    #[test]
    fn unparseable_file_is_an_error_not_an_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        std::fs::create_dir_all(store.catalog_file().parent().unwrap()).unwrap();
        std::fs::write(store.catalog_file(), "{ not an array").unwrap();

        assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn load_clamps_out_of_range_danger_levels() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let mut entries = vec![record(1, 3, "Common")];
        entries[0].danger_level = 9;
        // Bypass the clamp by writing the raw JSON directly.
        std::fs::create_dir_all(store.catalog_file().parent().unwrap()).unwrap();
        std::fs::write(
            store.catalog_file(),
            serde_json::to_vec_pretty(&entries).unwrap(),
        )
        .unwrap();

        assert_eq!(store.load().unwrap()[0].danger_level, 5);
    }

    #[test]
    fn load_resolves_missing_encounter_rank_from_phrases() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        // Simulate a record persisted before the rank field existed.
        let mut value = serde_json::to_value(vec![record(1, 3, "Common")]).unwrap();
        value[0].as_object_mut().unwrap().remove("encounter_rank");
        std::fs::create_dir_all(store.catalog_file().parent().unwrap()).unwrap();
        std::fs::write(store.catalog_file(), serde_json::to_vec(&value).unwrap()).unwrap();

        assert_eq!(store.load().unwrap()[0].encounter_rank, 3);
    }

    #[test]
    fn next_id_is_one_for_empty_and_max_plus_one_otherwise() {
        assert_eq!(CatalogStore::next_id(&[]), 1);
        let entries = vec![record(3, 2, "Rare"), record(7, 2, "Rare"), record(5, 2, "Rare")];
        assert_eq!(CatalogStore::next_id(&entries), 8);
    }

    #[test]
    fn write_illustration_returns_catalog_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let rel = store
            .write_illustration("ojisan-007.png", b"not really a png")
            .unwrap();

        assert_eq!(rel, "./images/ojisan-007.png");
        assert!(dir.path().join("images/ojisan-007.png").exists());
    }
}
