//! Repository for the `users` table.

use folio_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::user::{CreateUser, UpdateUser, User, UserFilter};
use crate::sparse_update::SparseUpdate;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, role, avatar_url, bio, website, location, skills, \
                       is_public, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate email fails with a unique violation on `uq_users_email`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, role, avatar_url, bio, website, location, skills, is_public)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.role)
            .bind(&input.avatar_url)
            .bind(&input.bio)
            .bind(&input.website)
            .bind(&input.location)
            .bind(Json(&input.skills))
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List users matching `filter`, ordered by ID.
    pub async fn list(pool: &PgPool, filter: &UserFilter) -> Result<Vec<User>, sqlx::Error> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM users WHERE TRUE"));
        if let Some(is_public) = filter.is_public {
            builder.push(" AND is_public = ").push_bind(is_public);
        }
        builder.push(" ORDER BY id ASC");
        builder.build_query_as::<User>().fetch_all(pool).await
    }

    /// Update a user. Only present fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut update = SparseUpdate::new("users");
        update
            .set("name", input.name.as_deref())
            .set("email", input.email.as_deref())
            .set("role", input.role.as_deref())
            .set_nullable("avatar_url", input.avatar_url.as_ref().map(Option::as_deref))
            .set_nullable("bio", input.bio.as_ref().map(Option::as_deref))
            .set_nullable("website", input.website.as_ref().map(Option::as_deref))
            .set_nullable("location", input.location.as_ref().map(Option::as_deref))
            .set("skills", input.skills.as_ref().map(Json))
            .set("is_public", input.is_public);

        update
            .finish(id, COLUMNS)
            .build_query_as::<User>()
            .fetch_optional(pool)
            .await
    }

    /// Delete a user by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
