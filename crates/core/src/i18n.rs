//! Display languages and the bilingual UI string tables.
//!
//! The catalog data itself carries both languages on every record; these
//! tables cover the chrome around it (headings, stat labels, sort options,
//! footer) so a front-end can localize without duplicating the strings.

use serde::{Deserialize, Serialize};

/// Display language for localized projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Japanese (the default).
    #[default]
    Ja,
    /// English.
    En,
}

impl Language {
    /// Parse the `lang` query value. Unknown values are rejected rather
    /// than silently defaulting.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ja" => Some(Self::Ja),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

/// UI strings for one language.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UiLabels {
    pub subtitle: &'static str,
    pub habitat: &'static str,
    pub danger_level: &'static str,
    pub encounter_rate: &'static str,
    pub special_ability: &'static str,
    pub loading: &'static str,
    pub empty_catalog: &'static str,
    pub search_placeholder: &'static str,
    pub sort_label: &'static str,
    pub sort_id: &'static str,
    pub sort_danger: &'static str,
    pub sort_encounter: &'static str,
    pub footer: &'static str,
    pub footer_note: &'static str,
}

const LABELS_JA: UiLabels = UiLabels {
    subtitle: "「こんなおじさんにはなりたくない！」中年男性の反面教師となる生態を徹底解剖",
    habitat: "出没場所",
    danger_level: "危険度",
    encounter_rate: "遭遇率",
    special_ability: "特技",
    loading: "図鑑を読み込み中...",
    empty_catalog: "まだエントリーがありません。",
    search_placeholder: "おじさんを検索...",
    sort_label: "並べ替え:",
    sort_id: "図鑑番号順",
    sort_danger: "危険度が高い順",
    sort_encounter: "遭遇率が高い順",
    footer: "© 2026 おじさんアンチパターン集 — AI生成コンテンツ",
    footer_note: "本サイトの内容はフィクションであり、特定の個人を指すものではありません。",
};

const LABELS_EN: UiLabels = UiLabels {
    subtitle: "A Humorous Guide to Middle-Aged Traits We Want to Avoid",
    habitat: "Habitat",
    danger_level: "Danger",
    encounter_rate: "Encounter",
    special_ability: "Ability",
    loading: "Loading encyclopedia...",
    empty_catalog: "No entries yet.",
    search_placeholder: "Search Ojisan...",
    sort_label: "Sort by:",
    sort_id: "Number (Default)",
    sort_danger: "Danger Level",
    sort_encounter: "Encounter Rate",
    footer: "© 2026 Ojisan Anti-pattern Collection — AI Generated Content",
    footer_note: "All content is fictional and does not refer to any specific individuals.",
};

/// The label table for a language.
pub fn labels(language: Language) -> &'static UiLabels {
    match language {
        Language::Ja => &LABELS_JA,
        Language::En => &LABELS_EN,
    }
}

/// Discovered-species counter shown in the header.
pub fn entry_count_label(language: Language, count: usize) -> String {
    match language {
        Language::Ja => format!("全{count}種 発見済み"),
        Language::En => format!("{count} Species Discovered"),
    }
}
