//! Batch runner tests against a scripted generation backend.
//!
//! The fakes answer `generateContent` from a queue, so every test pins the
//! exact request order the runner is allowed to make — an unexpected extra
//! request panics the queue.

use std::collections::VecDeque;
use std::sync::Mutex;

use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::Utc;

use ojisandex_catalog::{CatalogPaths, CatalogStore};
use ojisandex_core::entry::EntryRecord;
use ojisandex_gemini::types::{GenerateContentRequest, GenerateContentResponse};
use ojisandex_gemini::{ContentGenerator, GeminiError};
use ojisandex_pipeline::{Pipeline, PipelineError, SingleOutcome};

// ---------------------------------------------------------------------------
// Scripted backend
// ---------------------------------------------------------------------------

struct Scripted {
    responses: Mutex<VecDeque<Result<GenerateContentResponse, GeminiError>>>,
    requests: Mutex<Vec<GenerateContentRequest>>,
}

impl Scripted {
    fn new(responses: Vec<Result<GenerateContentResponse, GeminiError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A backend that must never be called.
    fn unreachable() -> Self {
        Self::new(Vec::new())
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn request_text(&self, index: usize) -> String {
        let requests = self.requests.lock().unwrap();
        serde_json::to_string(&requests[index]).unwrap()
    }
}

#[async_trait]
impl ContentGenerator for Scripted {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("backend received an unscripted request")
    }
}

// ---------------------------------------------------------------------------
// Response builders
// ---------------------------------------------------------------------------

fn text_response(text: &str) -> Result<GenerateContentResponse, GeminiError> {
    Ok(serde_json::from_value(serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    }))
    .unwrap())
}

fn png_response() -> Result<GenerateContentResponse, GeminiError> {
    Ok(serde_json::from_value(serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [
                {"inlineData": {"mimeType": "image/png", "data": "ZmFrZSBwbmcgYnl0ZXM="}}
            ]}
        }]
    }))
    .unwrap())
}

fn textless_response() -> Result<GenerateContentResponse, GeminiError> {
    Ok(serde_json::from_value(serde_json::json!({"candidates": []})).unwrap())
}

fn api_error() -> Result<GenerateContentResponse, GeminiError> {
    Err(GeminiError::Api {
        status: 429,
        body: "quota".to_string(),
    })
}

fn draft_text(title_en: &str) -> String {
    format!(
        r#"Here is the entry:
```json
{{
  "title_ja": "{title_en}おじさん",
  "title_en": "The {title_en}",
  "description_ja": "観察記録。",
  "description_en": "A field note.",
  "habitat_ja": "駅前",
  "habitat_en": "Station front",
  "danger_level": 3,
  "encounter_ja": "よく見かける",
  "encounter_en": "Common",
  "ability_ja": "長話",
  "ability_en": "Long stories",
  "category_ja": "通勤系",
  "category_en": "Commuter Type"
}}
```"#
    )
}

fn record(id: i64, image: Option<&str>) -> EntryRecord {
    EntryRecord {
        id,
        title_ja: format!("既存{id}おじさん"),
        title_en: format!("The Existing {id}"),
        description_ja: "説明".to_string(),
        description_en: "description".to_string(),
        habitat_ja: "公園".to_string(),
        habitat_en: "Park".to_string(),
        danger_level: 2,
        encounter_ja: "まれ".to_string(),
        encounter_en: "Rare".to_string(),
        ability_ja: "特技".to_string(),
        ability_en: "ability".to_string(),
        category_ja: "公園系".to_string(),
        category_en: "Park Type".to_string(),
        encounter_rank: 1,
        image: image.map(String::from),
        created_at: Utc::now(),
    }
}

fn store_in(dir: &std::path::Path) -> CatalogStore {
    CatalogStore::new(&CatalogPaths::new(dir))
}

// ---------------------------------------------------------------------------
// Single entry
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn single_dry_run_persists_nothing_and_skips_the_image_model() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let text = Scripted::new(vec![text_response(&draft_text("Lecturer"))]);
    let image = Scripted::unreachable();

    let outcome = Pipeline::new(&text, &image, &store)
        .run_single(Some("説教"), true)
        .await
        .unwrap();

    assert_matches!(outcome, SingleOutcome::DryRun(draft) => {
        assert_eq!(draft.title_en, "The Lecturer");
    });
    assert!(store.load().unwrap().is_empty());
    assert!(!store.catalog_file().exists());
    // The seed hint reached the prompt.
    assert!(text.request_text(0).contains("説教"));
}

#[tokio::test(start_paused = true)]
async fn single_run_saves_record_with_illustration() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let text = Scripted::new(vec![text_response(&draft_text("Lecturer"))]);
    let image = Scripted::new(vec![png_response()]);

    let outcome = Pipeline::new(&text, &image, &store)
        .run_single(None, false)
        .await
        .unwrap();

    assert_matches!(outcome, SingleOutcome::Saved(entry) => {
        assert_eq!(entry.id, 1);
        assert_eq!(entry.image.as_deref(), Some("./images/ojisan-001.png"));
        assert_eq!(entry.encounter_rank, 3);
    });
    let entries = store.load().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(dir.path().join("images/ojisan-001.png").exists());
    // The illustration prompt carries the generated title.
    assert!(image.request_text(0).contains("Lecturerおじさん"));
}

#[tokio::test(start_paused = true)]
async fn single_run_without_embedded_json_fails_and_leaves_catalog_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let text = Scripted::new(vec![text_response("I would rather not answer in JSON.")]);
    let image = Scripted::unreachable();

    let err = Pipeline::new(&text, &image, &store)
        .run_single(None, false)
        .await
        .unwrap_err();

    assert_matches!(err, PipelineError::Parse(_));
    assert!(!err.is_fatal());
    assert!(!store.catalog_file().exists());
}

#[tokio::test(start_paused = true)]
async fn single_run_tolerates_missing_image_content() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let text = Scripted::new(vec![text_response(&draft_text("Sigher"))]);
    let image = Scripted::new(vec![textless_response()]);

    let outcome = Pipeline::new(&text, &image, &store)
        .run_single(None, false)
        .await
        .unwrap();

    assert_matches!(outcome, SingleOutcome::Saved(entry) => {
        assert_eq!(entry.image, None);
    });
    assert_eq!(store.load().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Seed batch
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn seed_batch_continues_past_failures_with_contiguous_ids() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let text = Scripted::new(vec![
        text_response(&draft_text("First")),
        text_response("no json here at all"),
        text_response(&draft_text("Second")),
    ]);
    let image = Scripted::new(vec![textless_response(), textless_response()]);

    let summary = Pipeline::new(&text, &image, &store)
        .run_seed_batch(&["a", "b", "c"])
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total_entries, 2);

    let entries = store.load().unwrap();
    let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(entries[1].title_en, "The Second");
}

#[tokio::test(start_paused = true)]
async fn seed_batch_absorbs_api_errors_and_keeps_prior_progress() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let text = Scripted::new(vec![text_response(&draft_text("Kept")), api_error()]);
    let image = Scripted::new(vec![textless_response()]);

    let summary = Pipeline::new(&text, &image, &store)
        .run_seed_batch(&["a", "b"])
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);

    // The first item was saved before the second one failed.
    let entries = store.load().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title_en, "The Kept");
}

#[tokio::test(start_paused = true)]
async fn seed_batch_feeds_existing_titles_back_into_later_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    store.save(&[record(1, Some("./images/ojisan-001.png"))]).unwrap();

    let text = Scripted::new(vec![text_response(&draft_text("Next"))]);
    let image = Scripted::new(vec![textless_response()]);

    Pipeline::new(&text, &image, &store)
        .run_seed_batch(&["a"])
        .await
        .unwrap();

    assert!(text.request_text(0).contains("既存1おじさん"));
    // New entry continues the id sequence.
    assert_eq!(store.load().unwrap()[1].id, 2);
}

// ---------------------------------------------------------------------------
// Backfill
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn backfill_fills_only_records_missing_an_image() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    store
        .save(&[record(1, Some("./images/ojisan-001.png")), record(2, None)])
        .unwrap();

    let image = Scripted::new(vec![png_response()]);
    let text = Scripted::unreachable();

    let summary = Pipeline::new(&text, &image, &store)
        .run_backfill(false)
        .await
        .unwrap();

    assert_eq!(summary.filled, 1);
    assert_eq!(summary.remaining, 0);
    assert_eq!(image.request_count(), 1);

    let entries = store.load().unwrap();
    assert_eq!(entries[0].image.as_deref(), Some("./images/ojisan-001.png"));
    assert_eq!(entries[1].image.as_deref(), Some("./images/ojisan-002.png"));
    assert!(dir.path().join("images/ojisan-002.png").exists());
}

#[tokio::test(start_paused = true)]
async fn backfill_returns_early_when_nothing_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    store.save(&[record(1, Some("./images/ojisan-001.png"))]).unwrap();

    let summary = Pipeline::new(&Scripted::unreachable(), &Scripted::unreachable(), &store)
        .run_backfill(false)
        .await
        .unwrap();

    assert_eq!(summary.filled, 0);
    assert_eq!(summary.remaining, 0);
}

#[tokio::test(start_paused = true)]
async fn backfill_dry_run_makes_no_requests_and_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    store.save(&[record(1, None), record(2, None)]).unwrap();

    let summary = Pipeline::new(&Scripted::unreachable(), &Scripted::unreachable(), &store)
        .run_backfill(true)
        .await
        .unwrap();

    assert_eq!(summary.filled, 0);
    assert_eq!(summary.remaining, 2);
    assert!(store.load().unwrap().iter().all(|e| e.image.is_none()));
}

#[tokio::test(start_paused = true)]
async fn backfill_leaves_record_null_when_no_image_is_returned() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    store.save(&[record(1, None)]).unwrap();

    let image = Scripted::new(vec![textless_response()]);
    let summary = Pipeline::new(&Scripted::unreachable(), &image, &store)
        .run_backfill(false)
        .await
        .unwrap();

    assert_eq!(summary.filled, 0);
    assert_eq!(summary.remaining, 1);
    assert_eq!(store.load().unwrap()[0].image, None);
}
