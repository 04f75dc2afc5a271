//! Technical skill model and DTOs. Skills have no update path.

use folio_core::serde_ext::empty_as_none;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::non_empty;

/// A row from the `skills` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Skill {
    pub id: DbId,
    pub name: String,
    pub category: String,
    /// beginner, intermediate, advanced or expert (not enforced).
    pub level: String,
    pub years_exp: i32,
    pub featured: bool,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for adding a skill.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSkill {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: String,
    #[validate(length(min = 1, max = 50, message = "level must be 1-50 characters"))]
    pub level: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "years_exp must not be negative"))]
    pub years_exp: i32,
    #[serde(default)]
    pub featured: bool,
    pub icon: Option<String>,
    #[validate(length(max = 20, message = "color must be at most 20 characters"))]
    pub color: Option<String>,
    pub description: Option<String>,
}

/// Query parameters for `GET /skills`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillFilter {
    pub category: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub featured: Option<bool>,
}

impl SkillFilter {
    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn matches(&self, skill: &Skill) -> bool {
        self.category().map_or(true, |category| skill.category == category)
            && self.featured.map_or(true, |featured| skill.featured == featured)
    }
}
