//! Bilingual UI string table endpoint.

use axum::extract::Query;
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use ojisandex_core::i18n::{labels, Language, UiLabels};
use ojisandex_core::view::PLACEHOLDER_GLYPH;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LabelsQuery {
    pub lang: Option<String>,
}

/// Labels payload for one language.
#[derive(Debug, Serialize)]
pub struct LabelsResponse {
    pub language: Language,
    pub labels: &'static UiLabels,
    /// Glyph for entries without an illustration.
    pub placeholder: &'static str,
}

/// GET /api/v1/labels
///
/// The UI string table for a display language.
async fn get_labels(Query(params): Query<LabelsQuery>) -> AppResult<Json<LabelsResponse>> {
    let language = match params.lang.as_deref() {
        None => Language::default(),
        Some(raw) => Language::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown lang '{raw}'")))?,
    };

    Ok(Json(LabelsResponse {
        language,
        labels: labels(language),
        placeholder: PLACEHOLDER_GLYPH,
    }))
}

/// Mount the labels routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/labels", get(get_labels))
}
