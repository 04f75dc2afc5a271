//! Handlers for `/stats`: aggregates computed on read, plus visit logging.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::stats::{self, ProjectStats, ViewStats};
use folio_core::timestamps;
use folio_db::models::project::ProjectFilter;
use folio_db::models::validate_input;
use folio_db::models::visit::CreateVisit;

use crate::error::AppResult;
use crate::extract::{AppJson, ClientOrigin};
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/v1/stats/views
pub async fn views(State(state): State<AppState>) -> AppResult<Json<ViewStats>> {
    let visits = state.store.list_visits().await?;
    let stats = stats::view_statistics(visits.iter().map(|v| v.facts()), timestamps::now());
    Ok(Json(stats))
}

/// GET /api/v1/stats/projects
pub async fn projects(State(state): State<AppState>) -> AppResult<Json<ProjectStats>> {
    let projects = state.store.list_projects(&ProjectFilter::default()).await?;
    let stats = stats::project_statistics(projects.iter().map(|p| p.facts()));
    Ok(Json(stats))
}

/// POST /api/v1/stats/visit
pub async fn record_visit(
    State(state): State<AppState>,
    ClientOrigin(origin): ClientOrigin,
    AppJson(input): AppJson<CreateVisit>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    validate_input(&input)?;
    let visit = state.store.record_visit(&input, &origin).await?;
    tracing::debug!(visit_id = visit.id, page = %visit.page, "Visit recorded");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Visit recorded successfully",
            id: visit.id,
        }),
    ))
}
