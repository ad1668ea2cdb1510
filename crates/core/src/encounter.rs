//! Controlled encounter-rate vocabulary.
//!
//! Encounter phrases are free text in the persisted record, but sorting by
//! encounter rate uses a rank resolved from this fixed bilingual table at
//! record-creation time and stored on the record. Phrases outside the
//! vocabulary rank [`RANK_UNKNOWN`] and sink to the bottom of the sort.

// ---------------------------------------------------------------------------
// Ranks
// ---------------------------------------------------------------------------

/// Rank assigned to phrases outside the controlled vocabulary.
pub const RANK_UNKNOWN: u8 = 0;

/// Highest encounter rank.
pub const RANK_MAX: u8 = 5;

/// The vocabulary: `(rank, japanese phrase, english phrase)`.
///
/// English lookup is case-insensitive; Japanese lookup is exact. Two rows
/// may share a rank (e.g. seasonal sightings rank alongside uncommon ones).
const VOCABULARY: &[(u8, &str, &str)] = &[
    (5, "どこにでもいる", "Ubiquitous"),
    (4, "ひんぱんに見かける", "Very Common"),
    (3, "よく見かける", "Common"),
    (2, "ときどき見かける", "Uncommon"),
    (2, "季節限定", "Seasonal"),
    (1, "まれ", "Rare"),
];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Resolve a single phrase (either language) to its rank.
///
/// Input is trimmed; unrecognized phrases return [`RANK_UNKNOWN`].
pub fn rank_for_phrase(phrase: &str) -> u8 {
    let trimmed = phrase.trim();
    for (rank, ja, en) in VOCABULARY {
        if trimmed == *ja || trimmed.eq_ignore_ascii_case(en) {
            return *rank;
        }
    }
    RANK_UNKNOWN
}

/// Resolve a bilingual phrase pair to a rank, preferring whichever side is
/// recognized. Both unrecognized returns [`RANK_UNKNOWN`].
pub fn rank_for_phrases(phrase_ja: &str, phrase_en: &str) -> u8 {
    match rank_for_phrase(phrase_ja) {
        RANK_UNKNOWN => rank_for_phrase(phrase_en),
        rank => rank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_outranks_rare() {
        assert_eq!(rank_for_phrase("Common"), 3);
        assert_eq!(rank_for_phrase("Rare"), 1);
    }

    #[test]
    fn japanese_phrases_resolve() {
        assert_eq!(rank_for_phrase("よく見かける"), 3);
        assert_eq!(rank_for_phrase("まれ"), 1);
        assert_eq!(rank_for_phrase("どこにでもいる"), RANK_MAX);
    }

    #[test]
    fn english_lookup_is_case_insensitive() {
        assert_eq!(rank_for_phrase("common"), 3);
        assert_eq!(rank_for_phrase("UBIQUITOUS"), 5);
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(rank_for_phrase("  Seasonal "), 2);
    }

    #[test]
    fn unknown_phrase_ranks_zero() {
        assert_eq!(rank_for_phrase("only on Tuesdays"), RANK_UNKNOWN);
        assert_eq!(rank_for_phrase(""), RANK_UNKNOWN);
    }

    #[test]
    fn pair_lookup_prefers_any_recognized_side() {
        assert_eq!(rank_for_phrases("謎の頻度", "Common"), 3);
        assert_eq!(rank_for_phrases("まれ", "whenever"), 1);
        assert_eq!(rank_for_phrases("謎の頻度", "whenever"), RANK_UNKNOWN);
    }
}
