//! Repository for the `skills` table.

use folio_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::skill::{CreateSkill, Skill, SkillFilter};

const COLUMNS: &str =
    "id, name, category, level, years_exp, featured, icon, color, description, created_at";

/// Provides create/read/delete operations for skills.
pub struct SkillRepo;

impl SkillRepo {
    /// Insert a new skill, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSkill) -> Result<Skill, sqlx::Error> {
        let query = format!(
            "INSERT INTO skills (name, category, level, years_exp, featured, icon, color, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.level)
            .bind(input.years_exp)
            .bind(input.featured)
            .bind(&input.icon)
            .bind(&input.color)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE id = $1");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List skills matching `filter`, ordered by ID.
    pub async fn list(pool: &PgPool, filter: &SkillFilter) -> Result<Vec<Skill>, sqlx::Error> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM skills WHERE TRUE"));
        if let Some(category) = filter.category() {
            builder.push(" AND category = ").push_bind(category);
        }
        if let Some(featured) = filter.featured {
            builder.push(" AND featured = ").push_bind(featured);
        }
        builder.push(" ORDER BY id ASC");
        builder.build_query_as::<Skill>().fetch_all(pool).await
    }

    /// Delete a skill by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
