//! Handlers for the `/skills` resource. Skills are created and deleted,
//! never edited.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::types::DbId;
use folio_db::models::skill::{CreateSkill, Skill, SkillFilter};
use folio_db::models::validate_input;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::ListResponse;
use crate::state::AppState;

/// GET /api/v1/skills
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<SkillFilter>,
) -> AppResult<Json<ListResponse<Skill>>> {
    let skills = state.store.list_skills(&filter).await?;
    Ok(Json(skills.into()))
}

/// POST /api/v1/skills
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSkill>,
) -> AppResult<(StatusCode, Json<Skill>)> {
    validate_input(&input)?;
    let skill = state.store.create_skill(&input).await?;
    tracing::info!(
        skill_id = skill.id,
        backend = state.store.backend(),
        "Skill created",
    );
    Ok((StatusCode::CREATED, Json(skill)))
}

/// GET /api/v1/skills/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Skill>> {
    let skill = state
        .store
        .find_skill(id)
        .await?
        .ok_or(AppError::not_found("Skill", id))?;
    Ok(Json(skill))
}

/// DELETE /api/v1/skills/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if state.store.delete_skill(id).await? {
        tracing::info!(
            skill_id = id,
            backend = state.store.backend(),
            "Skill deleted",
        );
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Skill", id))
    }
}
