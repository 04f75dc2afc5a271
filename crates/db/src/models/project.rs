//! Portfolio project model and DTOs.

use folio_core::serde_ext::{double_option, empty_as_none};
use folio_core::stats::ProjectFacts;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::non_empty;

/// A row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    #[sqlx(json)]
    pub tech_stack: Vec<String>,
    /// Free text, e.g. `completed` or `in-progress`.
    pub status: String,
    pub featured: bool,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub image_url: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    pub fn facts(&self) -> ProjectFacts<'_> {
        ProjectFacts {
            status: &self.status,
            featured: self.featured,
            tech_stack: &self.tech_stack,
        }
    }
}

/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[validate(length(min = 1, max = 50, message = "status must be 1-50 characters"))]
    pub status: String,
    #[serde(default)]
    pub featured: bool,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub image_url: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

/// DTO for partially updating a project.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    #[validate(length(min = 1, max = 50, message = "status must be 1-50 characters"))]
    pub status: Option<String>,
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub live_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub github_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<Timestamp>>,
}

impl UpdateProject {
    /// Apply the present fields to `project`. Does not touch `updated_at`.
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(title) = &self.title {
            project.title = title.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(tech_stack) = &self.tech_stack {
            project.tech_stack = tech_stack.clone();
        }
        if let Some(status) = &self.status {
            project.status = status.clone();
        }
        if let Some(featured) = self.featured {
            project.featured = featured;
        }
        if let Some(live_url) = &self.live_url {
            project.live_url = live_url.clone();
        }
        if let Some(github_url) = &self.github_url {
            project.github_url = github_url.clone();
        }
        if let Some(image_url) = &self.image_url {
            project.image_url = image_url.clone();
        }
        if let Some(start_date) = self.start_date {
            project.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            project.end_date = end_date;
        }
    }
}

/// Query parameters for `GET /projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub featured: Option<bool>,
}

impl ProjectFilter {
    pub fn status(&self) -> Option<&str> {
        non_empty(&self.status)
    }

    pub fn matches(&self, project: &Project) -> bool {
        self.status().map_or(true, |status| project.status == status)
            && self.featured.map_or(true, |featured| project.featured == featured)
    }
}
