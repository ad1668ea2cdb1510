//! Batch runners: single entry, initial seeding, illustration backfill.
//!
//! All three share the same resilience contract: the catalog is persisted
//! immediately after every completed item, a per-item failure is logged
//! and absorbed, and only catalog I/O aborts the run. Requests are strictly
//! sequential with fixed inter-item delays — the external capability is
//! rate-limited and a parallel burst would trade one kind of failure for
//! another.

use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;

use ojisandex_catalog::CatalogStore;
use ojisandex_core::entry::{EntryDraft, EntryRecord};
use ojisandex_gemini::ContentGenerator;

use crate::error::PipelineError;
use crate::image::{generate_illustration, illustration_or_none};
use crate::text::generate_entry_draft;

// ---------------------------------------------------------------------------
// Pacing
// ---------------------------------------------------------------------------

/// Delay after a successfully seeded entry.
pub const SEED_ITEM_DELAY: Duration = Duration::from_secs(5);

/// Shorter delay after a failed item — the quota was barely touched.
pub const FAILURE_DELAY: Duration = Duration::from_secs(3);

/// Delay between backfill items (image requests only).
pub const BACKFILL_ITEM_DELAY: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of a single-entry run.
#[derive(Debug)]
pub enum SingleOutcome {
    /// Dry run: the generated draft, nothing persisted.
    DryRun(EntryDraft),
    /// The assembled, persisted record.
    Saved(EntryRecord),
}

/// Result of a seeding batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Items that produced a persisted entry.
    pub succeeded: usize,
    /// Items absorbed as per-item failures.
    pub failed: usize,
    /// Catalog size after the run.
    pub total_entries: usize,
}

/// Result of a backfill run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackfillSummary {
    /// Records whose illustration was filled in.
    pub filled: usize,
    /// Records still missing an illustration afterwards.
    pub remaining: usize,
    /// Catalog size (unchanged by backfill).
    pub total_entries: usize,
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// The generation pipeline, bound to its two capabilities and the store.
pub struct Pipeline<'a> {
    text_model: &'a dyn ContentGenerator,
    image_model: &'a dyn ContentGenerator,
    store: &'a CatalogStore,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        text_model: &'a dyn ContentGenerator,
        image_model: &'a dyn ContentGenerator,
        store: &'a CatalogStore,
    ) -> Self {
        Self {
            text_model,
            image_model,
            store,
        }
    }

    /// Generate one entry.
    ///
    /// The id is computed once, before generation. A draft failure here is
    /// a top-level failure — there is no batch to absorb it into. With
    /// `dry_run` the draft is returned unpersisted and no illustration is
    /// requested.
    pub async fn run_single(
        &self,
        seed: Option<&str>,
        dry_run: bool,
    ) -> Result<SingleOutcome, PipelineError> {
        let mut entries = self.store.load()?;
        let id = CatalogStore::next_id(&entries);
        let existing_titles: Vec<String> = entries.iter().map(|e| e.title_ja.clone()).collect();

        tracing::info!(id, seed = seed.unwrap_or(""), "Generating entry");
        let draft = generate_entry_draft(self.text_model, &existing_titles, seed).await?;
        tracing::info!(title_ja = %draft.title_ja, title_en = %draft.title_en, "Draft generated");

        if dry_run {
            return Ok(SingleOutcome::DryRun(draft));
        }

        let image = illustration_or_none(
            self.image_model,
            self.store,
            &draft.title_ja,
            &draft.description_ja,
            id,
        )
        .await;

        let record = EntryRecord::from_draft(id, draft, image, Utc::now());
        entries.push(record.clone());
        self.store.save(&entries)?;

        tracing::info!(id, title_ja = %record.title_ja, "Entry saved");
        Ok(SingleOutcome::Saved(record))
    }

    /// Seed the catalog from a list of theme hints.
    ///
    /// The next id is recomputed from the in-memory catalog on every
    /// iteration, so ids stay contiguous even when failed items never
    /// append anything. Each appended entry is saved before the loop
    /// continues.
    pub async fn run_seed_batch(&self, seeds: &[&str]) -> Result<BatchSummary, PipelineError> {
        let mut entries = self.store.load()?;
        let total = seeds.len();
        let mut succeeded = 0;
        let mut failed = 0;

        for (index, seed) in seeds.iter().enumerate() {
            let id = CatalogStore::next_id(&entries);
            let existing_titles: Vec<String> =
                entries.iter().map(|e| e.title_ja.clone()).collect();

            tracing::info!(item = index + 1, total, id, seed, "Seeding entry");

            match generate_entry_draft(self.text_model, &existing_titles, Some(seed)).await {
                Ok(draft) => {
                    let image = illustration_or_none(
                        self.image_model,
                        self.store,
                        &draft.title_ja,
                        &draft.description_ja,
                        id,
                    )
                    .await;

                    let record = EntryRecord::from_draft(id, draft, image, Utc::now());
                    tracing::info!(id, title_ja = %record.title_ja, "Entry saved");
                    entries.push(record);
                    self.store.save(&entries)?;
                    succeeded += 1;

                    if index + 1 < total {
                        sleep(SEED_ITEM_DELAY).await;
                    }
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::error!(item = index + 1, error = %e, "Item failed, continuing");
                    failed += 1;

                    if index + 1 < total {
                        sleep(FAILURE_DELAY).await;
                    }
                }
            }
        }

        let summary = BatchSummary {
            succeeded,
            failed,
            total_entries: entries.len(),
        };
        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            total = summary.total_entries,
            "Seeding complete"
        );
        Ok(summary)
    }

    /// Fill in illustrations for records persisted with `image: null`.
    ///
    /// Never creates or removes records, and only ever sets `image` where
    /// it was null. A capability that returns no image (or an illustration
    /// error) leaves the record untouched for a later run; the catalog is
    /// saved after every filled record.
    pub async fn run_backfill(&self, dry_run: bool) -> Result<BackfillSummary, PipelineError> {
        let mut entries = self.store.load()?;
        let total_entries = entries.len();

        let missing: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.image.is_none())
            .map(|(i, _)| i)
            .collect();

        if missing.is_empty() {
            tracing::info!("All entries already have illustrations");
            return Ok(BackfillSummary {
                filled: 0,
                remaining: 0,
                total_entries,
            });
        }

        tracing::info!(missing = missing.len(), "Backfilling illustrations");
        let mut filled = 0;

        for (position, &index) in missing.iter().enumerate() {
            let (id, title_ja, description_ja) = {
                let entry = &entries[index];
                (entry.id, entry.title_ja.clone(), entry.description_ja.clone())
            };

            if dry_run {
                tracing::info!(id, title_ja = %title_ja, "Would generate illustration (dry run)");
                continue;
            }

            match generate_illustration(
                self.image_model,
                self.store,
                &title_ja,
                &description_ja,
                id,
            )
            .await
            {
                Ok(Some(rel_path)) => {
                    entries[index].image = Some(rel_path);
                    self.store.save(&entries)?;
                    filled += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(id, error = %e, "Illustration failed, keeping placeholder");
                }
            }

            if position + 1 < missing.len() {
                sleep(BACKFILL_ITEM_DELAY).await;
            }
        }

        let summary = BackfillSummary {
            filled,
            remaining: missing.len() - filled,
            total_entries,
        };
        tracing::info!(
            filled = summary.filled,
            remaining = summary.remaining,
            "Backfill complete"
        );
        Ok(summary)
    }
}
