//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::types::DbId;
use folio_db::models::user::{CreateUser, UpdateUser, User, UserFilter};
use folio_db::models::validate_input;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::ListResponse;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<UserFilter>,
) -> AppResult<Json<ListResponse<User>>> {
    let users = state.store.list_users(&filter).await?;
    Ok(Json(users.into()))
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    validate_input(&input)?;
    let user = state.store.create_user(&input).await?;
    tracing::info!(
        user_id = user.id,
        backend = state.store.backend(),
        "User created",
    );
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<User>> {
    let user = state
        .store
        .find_user(id)
        .await?
        .ok_or(AppError::not_found("User", id))?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateUser>,
) -> AppResult<Json<User>> {
    validate_input(&input)?;
    let user = state
        .store
        .update_user(id, &input)
        .await?
        .ok_or(AppError::not_found("User", id))?;
    tracing::info!(
        user_id = id,
        backend = state.store.backend(),
        "User updated",
    );
    Ok(Json(user))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if state.store.delete_user(id).await? {
        tracing::info!(
            user_id = id,
            backend = state.store.backend(),
            "User deleted",
        );
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("User", id))
    }
}
