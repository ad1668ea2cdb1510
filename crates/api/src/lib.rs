//! HTTP service for the Ojisandex site.
//!
//! Serves the persisted catalog and illustrations statically (exactly as
//! the pipeline wrote them) and exposes the catalog view engine as a JSON
//! endpoint, all under a configurable base path.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Build the application router: API routes, health, and the static
/// public tree as the fallback, nested under the configured base path.
pub fn router(state: AppState) -> Router {
    let public_dir = state.config.public_dir.clone();
    let base_path = state.config.base_path.clone();

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::entries::router())
        .merge(routes::labels::router())
        .with_state(state)
        .fallback_service(ServeDir::new(public_dir));

    if base_path.is_empty() {
        app
    } else {
        Router::new().nest(&base_path, app)
    }
}
