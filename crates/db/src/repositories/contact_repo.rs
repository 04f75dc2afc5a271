//! Repository for the `contact_messages` table.

use sqlx::PgPool;

use crate::models::contact::{ContactMessage, CreateContactMessage, STATUS_UNREAD};
use crate::models::origin::RequestOrigin;

const COLUMNS: &str =
    "id, name, email, subject, message, status, ip_address, user_agent, created_at, read_at";

pub struct ContactRepo;

impl ContactRepo {
    /// Store a contact form submission as `unread`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactMessage,
        origin: &RequestOrigin,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (name, email, subject, message, status, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(&input.message)
            .bind(STATUS_UNREAD)
            .bind(&origin.ip_address)
            .bind(&origin.user_agent)
            .fetch_one(pool)
            .await
    }
}
