//! The catalog entry record and the draft shape produced by text generation.
//!
//! [`EntryRecord`] is the persisted form: one field-guide entry, fully
//! bilingual, with an optional illustration path. [`EntryDraft`] is the
//! subset the text-generation capability must emit — everything except the
//! identifier, illustration, stored encounter rank, and creation timestamp,
//! which the pipeline assigns at assembly time.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::encounter;
use crate::error::CoreError;
use crate::types::{EntryId, Timestamp};

// ---------------------------------------------------------------------------
// Danger level bounds
// ---------------------------------------------------------------------------

/// Lowest valid danger level.
pub const DANGER_MIN: u8 = 1;

/// Highest valid danger level (also the star-rating width).
pub const DANGER_MAX: u8 = 5;

/// Clamp a danger level into the valid 1..=5 range.
///
/// Out-of-range values are a data-quality defect; the catalog store calls
/// this on load so downstream consumers (the fixed-width star rating in
/// particular) never see one.
pub fn clamp_danger_level(level: u8) -> u8 {
    level.clamp(DANGER_MIN, DANGER_MAX)
}

// ---------------------------------------------------------------------------
// Persisted record
// ---------------------------------------------------------------------------

/// One persisted catalog entry.
///
/// Created exclusively by the generation pipeline and never mutated
/// afterward, except that the backfill run may set `image` on a record
/// where it was previously `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Unique, monotonically assigned identifier (never reassigned).
    pub id: EntryId,
    pub title_ja: String,
    pub title_en: String,
    pub description_ja: String,
    pub description_en: String,
    pub habitat_ja: String,
    pub habitat_en: String,
    /// 1..=5; clamped at the store boundary on load.
    pub danger_level: u8,
    pub encounter_ja: String,
    pub encounter_en: String,
    pub ability_ja: String,
    pub ability_en: String,
    pub category_ja: String,
    pub category_en: String,
    /// Sort rank resolved from the encounter vocabulary at creation time.
    /// 0 = unrecognized phrase. Defaults for records persisted before the
    /// field existed; the store re-resolves those on load.
    #[serde(default)]
    pub encounter_rank: u8,
    /// Relative illustration path (`./images/ojisan-NNN.ext`), or `None`
    /// when generation returned no image. `None` renders as a placeholder.
    pub image: Option<String>,
    /// Set once at creation.
    pub created_at: Timestamp,
}

impl EntryRecord {
    /// Assemble a record from a validated draft.
    ///
    /// Assigns the identifier and timestamp, carries the optional
    /// illustration path, and resolves the stored encounter rank from the
    /// draft's encounter phrases.
    pub fn from_draft(
        id: EntryId,
        draft: EntryDraft,
        image: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        let encounter_rank =
            encounter::rank_for_phrases(&draft.encounter_ja, &draft.encounter_en);
        Self {
            id,
            title_ja: draft.title_ja,
            title_en: draft.title_en,
            description_ja: draft.description_ja,
            description_en: draft.description_en,
            habitat_ja: draft.habitat_ja,
            habitat_en: draft.habitat_en,
            danger_level: draft.danger_level,
            encounter_ja: draft.encounter_ja,
            encounter_en: draft.encounter_en,
            ability_ja: draft.ability_ja,
            ability_en: draft.ability_en,
            category_ja: draft.category_ja,
            category_en: draft.category_en,
            encounter_rank,
            image,
            created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Generated draft
// ---------------------------------------------------------------------------

/// The structured object the text-generation capability must produce.
///
/// Every bilingual pair must be populated in both languages — partial
/// localization is a generation failure, caught here rather than surfaced
/// to the view layer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EntryDraft {
    #[validate(length(min = 1))]
    pub title_ja: String,
    #[validate(length(min = 1))]
    pub title_en: String,
    #[validate(length(min = 1))]
    pub description_ja: String,
    #[validate(length(min = 1))]
    pub description_en: String,
    #[validate(length(min = 1))]
    pub habitat_ja: String,
    #[validate(length(min = 1))]
    pub habitat_en: String,
    #[validate(range(min = 1, max = 5))]
    pub danger_level: u8,
    #[validate(length(min = 1))]
    pub encounter_ja: String,
    #[validate(length(min = 1))]
    pub encounter_en: String,
    #[validate(length(min = 1))]
    pub ability_ja: String,
    #[validate(length(min = 1))]
    pub ability_en: String,
    #[validate(length(min = 1))]
    pub category_ja: String,
    #[validate(length(min = 1))]
    pub category_en: String,
}

impl EntryDraft {
    /// Validate field presence and the danger range, mapping validator's
    /// error bag into a single human-readable [`CoreError::Validation`].
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(|e| {
            let mut fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
            fields.sort_unstable();
            CoreError::Validation(format!(
                "Generated draft is incomplete or out of range: {}",
                fields.join(", ")
            ))
        })
    }
}
