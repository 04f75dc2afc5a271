//! [`PortfolioStore`] backed by PostgreSQL through the repositories.

use async_trait::async_trait;
use folio_core::types::DbId;

use crate::models::contact::{ContactMessage, CreateContactMessage};
use crate::models::origin::RequestOrigin;
use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::models::skill::{CreateSkill, Skill, SkillFilter};
use crate::models::user::{CreateUser, UpdateUser, User, UserFilter};
use crate::models::visit::{CreateVisit, Visit};
use crate::repositories::{ContactRepo, ProjectRepo, SkillRepo, UserRepo, VisitRepo};
use crate::store::{PortfolioStore, StoreResult};
use crate::DbPool;

/// Persistent store. Each call is a single statement on the pool; there
/// are no multi-statement transactions.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl PortfolioStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list_users(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        Ok(UserRepo::list(&self.pool, filter).await?)
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<User>> {
        Ok(UserRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_user(&self, id: DbId) -> StoreResult<bool> {
        Ok(UserRepo::delete(&self.pool, id).await?)
    }

    async fn list_projects(&self, filter: &ProjectFilter) -> StoreResult<Vec<Project>> {
        Ok(ProjectRepo::list(&self.pool, filter).await?)
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_project(&self, input: &CreateProject) -> StoreResult<Project> {
        Ok(ProjectRepo::create(&self.pool, input).await?)
    }

    async fn update_project(
        &self,
        id: DbId,
        input: &UpdateProject,
    ) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<bool> {
        Ok(ProjectRepo::delete(&self.pool, id).await?)
    }

    async fn list_skills(&self, filter: &SkillFilter) -> StoreResult<Vec<Skill>> {
        Ok(SkillRepo::list(&self.pool, filter).await?)
    }

    async fn find_skill(&self, id: DbId) -> StoreResult<Option<Skill>> {
        Ok(SkillRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_skill(&self, input: &CreateSkill) -> StoreResult<Skill> {
        Ok(SkillRepo::create(&self.pool, input).await?)
    }

    async fn delete_skill(&self, id: DbId) -> StoreResult<bool> {
        Ok(SkillRepo::delete(&self.pool, id).await?)
    }

    async fn create_contact(
        &self,
        input: &CreateContactMessage,
        origin: &RequestOrigin,
    ) -> StoreResult<ContactMessage> {
        Ok(ContactRepo::create(&self.pool, input, origin).await?)
    }

    async fn record_visit(
        &self,
        input: &CreateVisit,
        origin: &RequestOrigin,
    ) -> StoreResult<Visit> {
        Ok(VisitRepo::create(&self.pool, input, origin).await?)
    }

    async fn list_visits(&self) -> StoreResult<Vec<Visit>> {
        Ok(VisitRepo::list(&self.pool).await?)
    }
}
