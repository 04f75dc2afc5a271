//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::types::DbId;
use folio_db::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use folio_db::models::validate_input;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::ListResponse;
use crate::state::AppState;

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<ProjectFilter>,
) -> AppResult<Json<ListResponse<Project>>> {
    let projects = state.store.list_projects(&filter).await?;
    Ok(Json(projects.into()))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_input(&input)?;
    let project = state.store.create_project(&input).await?;
    tracing::info!(
        project_id = project.id,
        backend = state.store.backend(),
        "Project created",
    );
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Project>> {
    let project = state
        .store
        .find_project(id)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    validate_input(&input)?;
    let project = state
        .store
        .update_project(id, &input)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    tracing::info!(
        project_id = id,
        backend = state.store.backend(),
        "Project updated",
    );
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if state.store.delete_project(id).await? {
        tracing::info!(
            project_id = id,
            backend = state.store.backend(),
            "Project deleted",
        );
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Project", id))
    }
}
