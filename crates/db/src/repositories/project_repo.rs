//! Repository for the `projects` table.

use folio_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::sparse_update::SparseUpdate;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, tech_stack, status, featured, live_url, \
                       github_url, image_url, start_date, end_date, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (title, description, tech_stack, status, featured, live_url, github_url,
                 image_url, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(Json(&input.tech_stack))
            .bind(&input.status)
            .bind(input.featured)
            .bind(&input.live_url)
            .bind(&input.github_url)
            .bind(&input.image_url)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects matching `filter`, ordered by ID.
    ///
    /// Predicates are ANDed in the order `status`, `featured`.
    pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM projects WHERE TRUE"));
        if let Some(status) = filter.status() {
            builder.push(" AND status = ").push_bind(status);
        }
        if let Some(featured) = filter.featured {
            builder.push(" AND featured = ").push_bind(featured);
        }
        builder.push(" ORDER BY id ASC");
        builder.build_query_as::<Project>().fetch_all(pool).await
    }

    /// Update a project. Only present fields in `input` are applied; an
    /// explicit `null` clears a nullable column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut update = SparseUpdate::new("projects");
        update
            .set("title", input.title.as_deref())
            .set("description", input.description.as_deref())
            .set("tech_stack", input.tech_stack.as_ref().map(Json))
            .set("status", input.status.as_deref())
            .set("featured", input.featured)
            .set_nullable("live_url", input.live_url.as_ref().map(Option::as_deref))
            .set_nullable("github_url", input.github_url.as_ref().map(Option::as_deref))
            .set_nullable("image_url", input.image_url.as_ref().map(Option::as_deref))
            .set_nullable("start_date", input.start_date)
            .set_nullable("end_date", input.end_date);

        update
            .finish(id, COLUMNS)
            .build_query_as::<Project>()
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
