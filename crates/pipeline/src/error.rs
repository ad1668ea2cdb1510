use ojisandex_catalog::StoreError;
use ojisandex_core::error::CoreError;
use ojisandex_gemini::GeminiError;

/// Errors from the generation pipeline.
///
/// Per-item variants (`Parse`, `Validation`, `Gemini`, `Image`) are
/// absorbed at the batch-loop boundary: logged, counted, and the run moves
/// on. `Store` means the catalog itself cannot be read or written — that
/// aborts the whole invocation.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The text capability's response contained no single recognizable
    /// JSON object, or the object did not deserialize into a draft.
    #[error("Failed to parse generated entry: {0}")]
    Parse(String),

    /// The draft deserialized but failed validation (empty translation,
    /// danger level out of range).
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The generative API call failed (transport or non-2xx).
    #[error(transparent)]
    Gemini(#[from] GeminiError),

    /// Decoding or writing an illustration failed. Call sites degrade
    /// this to `image: null` — it never fails a record.
    #[error("Illustration handling failed: {0}")]
    Image(String),

    /// Catalog read/write failed. Fatal for the whole run.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PipelineError {
    /// Whether this error must abort the batch instead of costing one item.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PipelineError::Store(_))
    }
}
