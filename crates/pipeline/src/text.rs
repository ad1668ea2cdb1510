//! Entry draft generation from the text capability.

use ojisandex_core::entry::EntryDraft;
use ojisandex_core::extract::extract_json_object;
use ojisandex_gemini::types::GenerateContentRequest;
use ojisandex_gemini::ContentGenerator;

use crate::error::PipelineError;
use crate::prompts;

/// Longest response excerpt carried in a parse error.
const EXCERPT_LEN: usize = 200;

/// Generate one validated entry draft.
///
/// Sends the researcher persona plus the task prompt (existing titles and
/// an optional seed hint), then requires the response to contain exactly
/// one embedded JSON object that deserializes into a complete draft. Any
/// deviation is a per-item [`PipelineError::Parse`] or `::Validation` —
/// callers in batch loops log it and move on, they never retry.
pub async fn generate_entry_draft(
    model: &dyn ContentGenerator,
    existing_titles: &[String],
    seed: Option<&str>,
) -> Result<EntryDraft, PipelineError> {
    let request = GenerateContentRequest::user_text(prompts::entry_prompt(existing_titles, seed))
        .with_system_instruction(prompts::SYSTEM_PROMPT);

    let response = model.generate(&request).await?;

    let text = response
        .text()
        .ok_or_else(|| PipelineError::Parse("response contained no text".to_string()))?;

    let span = extract_json_object(&text)
        .map_err(|e| PipelineError::Parse(format!("{e}; response: {}", excerpt(&text))))?;

    let draft: EntryDraft = serde_json::from_str(span)
        .map_err(|e| PipelineError::Parse(format!("{e}; object: {}", excerpt(span))))?;

    draft.check()?;
    Ok(draft)
}

/// Truncate text to a diagnostic-sized excerpt on a char boundary.
fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_LEN {
        text.to_string()
    } else {
        let cut: String = text.chars().take(EXCERPT_LEN).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_truncates_on_char_boundaries() {
        let long = "あ".repeat(300);
        let cut = excerpt(&long);
        assert!(cut.ends_with('…'));
        assert_eq!(cut.chars().count(), EXCERPT_LEN + 1);
        assert_eq!(excerpt("short"), "short");
    }
}
