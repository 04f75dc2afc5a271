//! Repository for the append-only `visits` table.

use sqlx::PgPool;

use crate::models::origin::RequestOrigin;
use crate::models::visit::{CreateVisit, Visit};

const COLUMNS: &str = "id, page, user_agent, country, referrer, ip_address, created_at";

pub struct VisitRepo;

impl VisitRepo {
    /// Append a visit. The payload's `user_agent` wins over the request header.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVisit,
        origin: &RequestOrigin,
    ) -> Result<Visit, sqlx::Error> {
        let query = format!(
            "INSERT INTO visits (page, user_agent, country, referrer, ip_address)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(&input.page)
            .bind(input.user_agent.as_ref().or(origin.user_agent.as_ref()))
            .bind(&input.country)
            .bind(&input.referrer)
            .bind(&origin.ip_address)
            .fetch_one(pool)
            .await
    }

    /// All visits in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Visit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visits ORDER BY id ASC");
        sqlx::query_as::<_, Visit>(&query).fetch_all(pool).await
    }
}
