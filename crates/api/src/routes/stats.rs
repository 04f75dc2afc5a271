//! Route definitions for `/stats`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Routes mounted at `/stats`.
///
/// ```text
/// GET    /views       -> views
/// GET    /projects    -> projects
/// POST   /visit       -> record_visit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/views", get(stats::views))
        .route("/projects", get(stats::projects))
        .route("/visit", post(stats::record_visit))
}
