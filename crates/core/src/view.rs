//! The catalog view engine: filter + sort + card projection.
//!
//! View state is an explicit value passed to pure functions — event
//! handlers own no hidden globals. [`compute_view`] decides *which* entries
//! appear and in what order; [`project_card`] decides what one entry looks
//! like in a given language. Language is deliberately orthogonal to
//! membership and order: toggling it re-projects the same sequence.

use serde::Serialize;

use crate::entry::{EntryRecord, DANGER_MAX};
use crate::i18n::Language;
use crate::naming;

/// Glyph shown when an entry has no illustration.
pub const PLACEHOLDER_GLYPH: &str = "👴";

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Sort orders the catalog view supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Ascending entry number.
    #[default]
    Number,
    /// Descending danger level, stable among equals.
    Danger,
    /// Descending stored encounter rank; unrecognized phrases (rank 0)
    /// sink to the bottom. Stable among equals.
    Encounter,
}

impl SortMode {
    /// Parse the `sort` query value. Unknown values are rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::Number),
            "danger" => Some(Self::Danger),
            "encounter" => Some(Self::Encounter),
            _ => None,
        }
    }
}

/// Immutable snapshot of the view controls.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub language: Language,
    /// Stored trimmed and lowercased; empty means "no filtering".
    query: String,
    pub sort: SortMode,
}

impl ViewState {
    /// Build a state, normalizing the raw search input.
    pub fn new(language: Language, raw_query: &str, sort: SortMode) -> Self {
        Self {
            language,
            query: raw_query.trim().to_lowercase(),
            sort,
        }
    }

    /// The normalized query.
    pub fn query(&self) -> &str {
        &self.query
    }
}

// ---------------------------------------------------------------------------
// Filter + sort
// ---------------------------------------------------------------------------

/// Case-insensitive substring match over title, description, and category
/// in both languages.
fn matches_query(entry: &EntryRecord, query: &str) -> bool {
    [
        &entry.title_ja,
        &entry.title_en,
        &entry.description_ja,
        &entry.description_en,
        &entry.category_ja,
        &entry.category_en,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(query))
}

/// Project the catalog into the visible, ordered sequence for a state.
///
/// An empty query is the identity filter. All sorts are stable, so entries
/// that compare equal keep their catalog (insertion) order.
pub fn compute_view<'a>(state: &ViewState, entries: &'a [EntryRecord]) -> Vec<&'a EntryRecord> {
    let mut visible: Vec<&EntryRecord> = if state.query().is_empty() {
        entries.iter().collect()
    } else {
        entries
            .iter()
            .filter(|e| matches_query(e, state.query()))
            .collect()
    };

    match state.sort {
        SortMode::Number => visible.sort_by_key(|e| e.id),
        SortMode::Danger => visible.sort_by(|a, b| b.danger_level.cmp(&a.danger_level)),
        SortMode::Encounter => visible.sort_by(|a, b| b.encounter_rank.cmp(&a.encounter_rank)),
    }

    visible
}

// ---------------------------------------------------------------------------
// Card projection
// ---------------------------------------------------------------------------

/// What the illustration slot of a card shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Illustration {
    /// A generated image, addressed relative to the site base path.
    Image { src: String },
    /// No image was generated; show the glyph instead.
    Placeholder { glyph: &'static str },
}

/// One rendered catalog card.
///
/// Titles always appear in both scripts; the remaining text fields carry
/// the active display language only.
#[derive(Debug, Clone, Serialize)]
pub struct EntryCard {
    /// Zero-padded 3-digit display number.
    pub number: String,
    pub illustration: Illustration,
    pub title_ja: String,
    pub title_en: String,
    pub description: String,
    pub category: String,
    pub habitat: String,
    pub ability: String,
    pub encounter: String,
    pub danger_level: u8,
    /// Fixed-width star rating, filled stars = danger level.
    pub stars: String,
}

/// Fixed-width star string for a danger level (`3` -> `"★★★☆☆"`).
///
/// Levels are clamped at the store boundary, so `danger` is 1..=5 here.
pub fn stars(danger: u8) -> String {
    (1..=DANGER_MAX)
        .map(|i| if i <= danger { '★' } else { '☆' })
        .collect()
}

/// Resolve a stored catalog-relative asset path against the site base path.
fn asset_url(base_path: &str, rel: &str) -> String {
    format!(
        "{}/{}",
        base_path.trim_end_matches('/'),
        rel.trim_start_matches("./")
    )
}

/// Project one entry into its card for the given display language.
pub fn project_card(entry: &EntryRecord, language: Language, base_path: &str) -> EntryCard {
    let illustration = match &entry.image {
        Some(rel) => Illustration::Image {
            src: asset_url(base_path, rel),
        },
        None => Illustration::Placeholder {
            glyph: PLACEHOLDER_GLYPH,
        },
    };

    let (description, category, habitat, ability, encounter) = match language {
        Language::Ja => (
            &entry.description_ja,
            &entry.category_ja,
            &entry.habitat_ja,
            &entry.ability_ja,
            &entry.encounter_ja,
        ),
        Language::En => (
            &entry.description_en,
            &entry.category_en,
            &entry.habitat_en,
            &entry.ability_en,
            &entry.encounter_en,
        ),
    };

    EntryCard {
        number: naming::entry_number(entry.id),
        illustration,
        title_ja: entry.title_ja.clone(),
        title_en: entry.title_en.clone(),
        description: description.clone(),
        category: category.clone(),
        habitat: habitat.clone(),
        ability: ability.clone(),
        encounter: encounter.clone(),
        danger_level: entry.danger_level,
        stars: stars(entry.danger_level),
    }
}
