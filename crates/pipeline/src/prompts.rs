//! Prompt templates for entry and illustration generation.
//!
//! The entry prompt pins the exact JSON contract the draft parser expects
//! and feeds back every existing title so the model steers away from
//! near-duplicates. All creative direction lives here — the rest of the
//! pipeline treats responses as opaque text and bytes.

use std::fmt::Write;

/// Researcher persona shared by every text-generation request.
pub const SYSTEM_PROMPT: &str = "あなたは「おじさんアンチパターン研究者」です。
「こんなおじさんにだけはなりたくない！」と反面教師にすべき、中年男性の困った生態や特徴的な行動をフィールドワークで観察し、ユーモラスかつ的確に記録する架空の学者です。
短くてキャッチーで、クスッと笑えるテキストを書いてください。
悪意や差別的な表現は避け、「こういう人いるいる…気をつけよう」と自戒を込めて共感できるような内容にしてください。

You are also a bilingual researcher who provides English translations with the same humorous, cautionary tone about middle-aged anti-patterns.";

/// Task prompt for generating one entry draft.
///
/// `existing_titles` reduces duplication pressure; `seed` optionally
/// biases the theme.
pub fn entry_prompt(existing_titles: &[String], seed: Option<&str>) -> String {
    let mut prompt = String::from("あなたは「おじさんアンチパターン集」のエントリーを1件生成してください。\n\n");

    match seed {
        Some(hint) => {
            let _ = writeln!(prompt, "テーマのヒント: {hint}");
        }
        None => {
            prompt.push_str(
                "新しい困ったおじさんのタイプ（アンチパターン）を考えてください。\
                 説教、武勇伝、マナー違反、時代錯誤な価値観など、「こんな大人にはなりたくない」\
                 と思わせつつも、どこか憎めない独自の個性を持つものを創造してください。\n",
            );
        }
    }

    if !existing_titles.is_empty() {
        prompt.push_str("\n既存のエントリー（なるべく別の方向性で考えてください）:\n");
        for title in existing_titles {
            let _ = writeln!(prompt, "- {title}");
        }
    }

    prompt.push_str(
        r#"
以下のJSON形式で厳密に回答してください。JSONのみを出力し、他のテキストは含めないでください:

{
  "title_ja": "〇〇おじさん（キャッチーな和名）",
  "title_en": "English title (The + descriptive name)",
  "description_ja": "3〜4文のユーモラスな説明文。生態、行動パターン、特徴を描写。ポケモン図鑑風の語り口で。",
  "description_en": "3-4 sentence humorous description in English. Same content as Japanese but naturally localized.",
  "habitat_ja": "主な出没場所（簡潔に）",
  "habitat_en": "Primary habitat (concise)",
  "danger_level": 3,
  "encounter_ja": "遭遇率（どこにでもいる / ひんぱんに見かける / よく見かける / ときどき見かける / 季節限定 / まれ のいずれか）",
  "encounter_en": "Encounter rate (one of: Ubiquitous / Very Common / Common / Uncommon / Seasonal / Rare)",
  "ability_ja": "特技や必殺技（ユーモラスに）",
  "ability_en": "Special ability (humorous)",
  "category_ja": "カテゴリー（例：居酒屋系、通勤系、公園系、ネット系）",
  "category_en": "Category (e.g., Izakaya Type, Commuter Type, Park Type, Internet Type)"
}

danger_level は 1〜5 の整数で、数字が大きいほど周囲への影響が大きいことを表します。
遭遇率は上記の語彙から選んでください。
ユーモラスで愛のある内容にしてください。特定の人物を指さないようにしてください。
"#,
    );

    prompt
}

/// Prompt for the monochrome pencil-sketch illustration of one entry.
pub fn image_prompt(title_ja: &str, description_ja: &str) -> String {
    format!(
        "黒と白の鉛筆スケッチで、以下の「おじさん」を描いてください:

タイトル: {title_ja}
説明: {description_ja}

スタイル:
- 白い背景に黒鉛筆のスケッチ
- デフォルメされた可愛らしいイラスト
- 漫画風のタッチ
- 表情豊かで特徴的なポーズ
- 中年男性のキャラクター
- シンプルで特徴的な服装や小道具
- 線画スタイル、ハッチング（斜線）で陰影をつける

重要: テキストや文字は含めないでください。イラストのみ。
"
    )
}

/// Seed themes for the initial catalog population.
pub const SEED_TOPICS: &[&str] = &[
    "説教おじさん — 居酒屋で若者に求められていないアドバイスをするタイプ",
    "昔は凄かったおじさん — 過去の武勇伝を何度も繰り返し、現在の努力をしないタイプ",
    "パワハラ予備軍おじさん — 指導と称して精神的に追い詰めるギリギリのラインを攻めるタイプ",
    "ため息おじさん — 会社でやたらと大きなため息をつき、周囲の士気を下げるタイプ",
    "セクシャルハラスメントおじさん — 悪気なく時代錯誤な発言をして空気を凍らせるタイプ",
    "スマホおじさん — スマホの画面を至近距離で見るタイプ",
    "自慢話おじさん — 昔の武勇伝を何度も繰り返すタイプ",
    "健康オタクおじさん — 突然健康に目覚めて周囲に布教するタイプ",
    "コンビニおじさん — コンビニの前で缶コーヒーを飲みながら長時間佇むタイプ",
    "カラオケおじさん — 忘年会で十八番を熱唱し続けるタイプ",
    "写真おじさん — やたらと高級カメラを持ち歩いて撮影するタイプ",
    "電車おじさん — 電車内で足を広げて座るタイプ",
    "ジョギングおじさん — 突然走り始めるが長続きしないタイプ",
    "SNSおじさん — 若者のSNS文化についていこうとするタイプ",
    "居酒屋常連おじさん — 行きつけの居酒屋でカウンターの定位置を持つタイプ",
    "鼻歌おじさん — オフィスや電車内で無意識に鼻歌を歌うタイプ",
    "ゴルフおじさん — 会話のすべてをゴルフに結びつけるタイプ",
    "新聞おじさん — 紙の新聞を大きく広げて読むタイプ",
    "せっかちおじさん — 信号待ちやエレベーター前でイライラするタイプ",
    "アドバイスおじさん — 聞かれてもいないのにアドバイスをするタイプ",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_prompt_embeds_seed_hint() {
        let prompt = entry_prompt(&[], Some("ゴルフの話しかしない"));
        assert!(prompt.contains("テーマのヒント: ゴルフの話しかしない"));
    }

    #[test]
    fn entry_prompt_lists_existing_titles() {
        let titles = vec!["説教おじさん".to_string(), "ため息おじさん".to_string()];
        let prompt = entry_prompt(&titles, None);
        assert!(prompt.contains("- 説教おじさん"));
        assert!(prompt.contains("- ため息おじさん"));
    }

    #[test]
    fn entry_prompt_omits_existing_section_when_catalog_is_empty() {
        let prompt = entry_prompt(&[], None);
        assert!(!prompt.contains("既存のエントリー"));
    }

    #[test]
    fn image_prompt_carries_title_and_description() {
        let prompt = image_prompt("説教おじさん", "居酒屋に生息する。");
        assert!(prompt.contains("タイトル: 説教おじさん"));
        assert!(prompt.contains("説明: 居酒屋に生息する。"));
    }

    #[test]
    fn twenty_seed_topics() {
        assert_eq!(SEED_TOPICS.len(), 20);
    }
}
