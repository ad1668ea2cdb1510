//! The catalog view endpoint.
//!
//! Projects the persisted catalog through the view engine for one request:
//! filter by the search query, order by the sort mode, localize to the
//! display language. A catalog that fails to load serves the empty state
//! rather than an error — a broken data file should degrade the page, not
//! take it down.

use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use ojisandex_core::i18n::{entry_count_label, Language};
use ojisandex_core::view::{compute_view, project_card, EntryCard, SortMode, ViewState};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for the entries listing. All optional.
#[derive(Debug, Default, Deserialize)]
pub struct EntriesQuery {
    /// Display language (`ja` default, `en`).
    pub lang: Option<String>,
    /// Case-insensitive search query.
    pub q: Option<String>,
    /// Sort mode (`id` default, `danger`, `encounter`).
    pub sort: Option<String>,
}

/// Entries listing payload.
#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    /// Number of entries after filtering.
    pub total: usize,
    /// Localized discovered-species counter for the whole catalog.
    pub discovered: String,
    pub entries: Vec<EntryCard>,
}

/// GET /api/v1/entries
///
/// List visible entry cards for a view state.
async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<EntriesQuery>,
) -> AppResult<Json<EntryListResponse>> {
    let language = match params.lang.as_deref() {
        None => Language::default(),
        Some(raw) => Language::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown lang '{raw}'")))?,
    };
    let sort = match params.sort.as_deref() {
        None => SortMode::default(),
        Some(raw) => SortMode::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown sort '{raw}'")))?,
    };

    let entries = match state.store.load() {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "Catalog unavailable, serving empty catalog");
            Vec::new()
        }
    };

    let view_state = ViewState::new(language, params.q.as_deref().unwrap_or(""), sort);
    let visible = compute_view(&view_state, &entries);
    let cards: Vec<EntryCard> = visible
        .iter()
        .map(|entry| project_card(entry, language, &state.config.base_path))
        .collect();

    Ok(Json(EntryListResponse {
        total: cards.len(),
        discovered: entry_count_label(language, entries.len()),
        entries: cards,
    }))
}

/// Mount the entries routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/entries", get(list_entries))
}
