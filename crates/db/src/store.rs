//! The storage seam shared by the PostgreSQL and in-memory backends.
//!
//! Handlers only see `Arc<dyn PortfolioStore>`; which backend sits behind it
//! is decided once at startup.

use async_trait::async_trait;
use folio_core::error::CoreError;
use folio_core::types::DbId;

use crate::models::contact::{ContactMessage, CreateContactMessage};
use crate::models::origin::RequestOrigin;
use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::models::skill::{CreateSkill, Skill, SkillFilter};
use crate::models::user::{CreateUser, UpdateUser, User, UserFilter};
use crate::models::visit::{CreateVisit, Visit};

/// Failure of a store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain rule was violated (e.g. duplicate email in memory mode).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The database rejected or failed the statement.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD over every portfolio resource.
///
/// Inputs are assumed to be validated by the caller. Listings are in
/// ascending id order; `find_*`/`update_*` return `None` and `delete_*`
/// returns `false` when the id does not exist.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Short backend name for logs: `"memory"` or `"postgres"`.
    fn backend(&self) -> &'static str;

    // -- users ----------------------------------------------------------------

    async fn list_users(&self, filter: &UserFilter) -> StoreResult<Vec<User>>;
    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>>;
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;
    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<User>>;
    async fn delete_user(&self, id: DbId) -> StoreResult<bool>;

    // -- projects -------------------------------------------------------------

    async fn list_projects(&self, filter: &ProjectFilter) -> StoreResult<Vec<Project>>;
    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>>;
    async fn create_project(&self, input: &CreateProject) -> StoreResult<Project>;
    async fn update_project(
        &self,
        id: DbId,
        input: &UpdateProject,
    ) -> StoreResult<Option<Project>>;
    async fn delete_project(&self, id: DbId) -> StoreResult<bool>;

    // -- skills ---------------------------------------------------------------

    async fn list_skills(&self, filter: &SkillFilter) -> StoreResult<Vec<Skill>>;
    async fn find_skill(&self, id: DbId) -> StoreResult<Option<Skill>>;
    async fn create_skill(&self, input: &CreateSkill) -> StoreResult<Skill>;
    async fn delete_skill(&self, id: DbId) -> StoreResult<bool>;

    // -- contact & analytics --------------------------------------------------

    async fn create_contact(
        &self,
        input: &CreateContactMessage,
        origin: &RequestOrigin,
    ) -> StoreResult<ContactMessage>;
    async fn record_visit(
        &self,
        input: &CreateVisit,
        origin: &RequestOrigin,
    ) -> StoreResult<Visit>;
    async fn list_visits(&self) -> StoreResult<Vec<Visit>>;
}
