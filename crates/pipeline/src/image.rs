//! Illustration generation from the image capability.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use ojisandex_catalog::CatalogStore;
use ojisandex_core::naming;
use ojisandex_core::types::EntryId;
use ojisandex_gemini::types::{GenerateContentRequest, GenerationConfig};
use ojisandex_gemini::ContentGenerator;

use crate::error::PipelineError;
use crate::prompts;

/// Generate and persist the illustration for one entry.
///
/// Scans the response for the first inline binary part, decodes it, and
/// writes `ojisan-<id>.<ext>` into the store's image directory. A response
/// with no inline part returns `Ok(None)` — an expected outcome, the entry
/// keeps its placeholder.
pub async fn generate_illustration(
    model: &dyn ContentGenerator,
    store: &CatalogStore,
    title_ja: &str,
    description_ja: &str,
    id: EntryId,
) -> Result<Option<String>, PipelineError> {
    let request = GenerateContentRequest::user_text(prompts::image_prompt(title_ja, description_ja))
        .with_generation_config(GenerationConfig {
            response_modalities: Some(vec!["image".to_string(), "text".to_string()]),
            temperature: None,
        });

    let response = model.generate(&request).await?;

    let Some(blob) = response.first_inline_data() else {
        tracing::warn!(id, "No image content in response, keeping placeholder");
        return Ok(None);
    };

    let bytes = BASE64
        .decode(blob.data.as_bytes())
        .map_err(|e| PipelineError::Image(format!("inline payload is not valid base64: {e}")))?;

    let filename = naming::illustration_filename(id, &blob.mime_type);
    let rel_path = store
        .write_illustration(&filename, &bytes)
        .map_err(|e| PipelineError::Image(e.to_string()))?;

    tracing::info!(id, filename = %filename, bytes = bytes.len(), "Illustration saved");
    Ok(Some(rel_path))
}

/// [`generate_illustration`], degraded: any failure becomes `None` with a
/// warning. Records are always persistable with `image: null`; an
/// illustration problem never costs the entry itself.
pub async fn illustration_or_none(
    model: &dyn ContentGenerator,
    store: &CatalogStore,
    title_ja: &str,
    description_ja: &str,
    id: EntryId,
) -> Option<String> {
    match generate_illustration(model, store, title_ja, description_ja, id).await {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(id, error = %e, "Illustration generation failed, keeping placeholder");
            None
        }
    }
}
