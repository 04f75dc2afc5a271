//! Page visit log. Append-only.

use folio_core::stats::VisitFacts;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `visits` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Visit {
    pub id: DbId,
    pub page: String,
    pub user_agent: Option<String>,
    pub country: Option<String>,
    pub referrer: Option<String>,
    /// Captured from the connection, never from the payload.
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
}

impl Visit {
    pub fn facts(&self) -> VisitFacts<'_> {
        VisitFacts {
            page: &self.page,
            country: self.country.as_deref(),
            ip_address: self.ip_address.as_deref(),
            created_at: self.created_at,
        }
    }
}

/// DTO for recording a visit. Unknown fields (including any `ip`) are ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVisit {
    #[validate(length(min = 1, max = 255, message = "page must be 1-255 characters"))]
    pub page: String,
    pub user_agent: Option<String>,
    #[validate(length(max = 100, message = "country must be at most 100 characters"))]
    pub country: Option<String>,
    pub referrer: Option<String>,
}
