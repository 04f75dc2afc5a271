pub mod contact;
pub mod health;
pub mod project;
pub mod skill;
pub mod stats;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                  list, create
/// /users/{id}             get, update, delete
///
/// /projects               list, create
/// /projects/{id}          get, update, delete
///
/// /skills                 list, create
/// /skills/{id}            get, delete
///
/// /contact                submit (POST)
///
/// /stats/views            view statistics
/// /stats/projects         project statistics
/// /stats/visit            record a visit (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user::router())
        .nest("/projects", project::router())
        .nest("/skills", skill::router())
        .nest("/contact", contact::router())
        .nest("/stats", stats::router())
}
