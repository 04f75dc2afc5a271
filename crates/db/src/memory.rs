//! In-process store used when no database is configured.
//!
//! Each collection sits behind its own `RwLock`, so reads of one resource
//! never wait on writes to another. Ids come from a per-collection counter
//! that starts at 1 and is never rewound, so deleted ids are not reused.

use async_trait::async_trait;
use folio_core::error::CoreError;
use folio_core::timestamps::{bump_modified, now};
use folio_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::contact::{ContactMessage, CreateContactMessage, STATUS_UNREAD};
use crate::models::origin::RequestOrigin;
use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::models::skill::{CreateSkill, Skill, SkillFilter};
use crate::models::user::{CreateUser, UpdateUser, User, UserFilter};
use crate::models::visit::{CreateVisit, Visit};
use crate::seed;
use crate::store::{PortfolioStore, StoreResult};

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

trait Record: Clone {
    fn id(&self) -> DbId;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(impl Record for $ty {
            fn id(&self) -> DbId {
                self.id
            }
        })*
    };
}

impl_record!(User, Project, Skill, ContactMessage, Visit);

/// Records in insertion (and therefore ascending id) order.
struct Collection<T> {
    items: Vec<T>,
    next_id: DbId,
}

impl<T: Record> Collection<T> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> DbId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn insert(&mut self, record: T) -> T {
        self.items.push(record.clone());
        record
    }

    fn get(&self, id: DbId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn get_mut(&mut self, id: DbId) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    fn filtered(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.items
            .iter()
            .filter(|item| keep(item))
            .cloned()
            .collect()
    }

    fn remove(&mut self, id: DbId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// [`PortfolioStore`] backed by process memory. Contents are lost on exit.
pub struct MemoryStore {
    users: RwLock<Collection<User>>,
    projects: RwLock<Collection<Project>>,
    skills: RwLock<Collection<Skill>>,
    contacts: RwLock<Collection<ContactMessage>>,
    visits: RwLock<Collection<Visit>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Collection::new()),
            projects: RwLock::new(Collection::new()),
            skills: RwLock::new(Collection::new()),
            contacts: RwLock::new(Collection::new()),
            visits: RwLock::new(Collection::new()),
        }
    }

    /// A store preloaded with the sample portfolio.
    pub async fn seeded() -> StoreResult<Self> {
        let store = Self::new();
        store.create_user(&seed::sample_user()).await?;
        for project in seed::sample_projects() {
            store.create_project(&project).await?;
        }
        for skill in seed::sample_skills() {
            store.create_skill(&skill).await?;
        }
        Ok(store)
    }
}

fn email_taken(users: &Collection<User>, email: &str, except: Option<DbId>) -> bool {
    users
        .items
        .iter()
        .any(|user| user.email == email && Some(user.id) != except)
}

fn duplicate_email(email: &str) -> CoreError {
    CoreError::Conflict(format!("Email {email} is already registered"))
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    // -- users ----------------------------------------------------------------

    async fn list_users(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        Ok(self
            .users
            .read()
            .await
            .filtered(|user| filter.matches(user)))
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if email_taken(&users, &input.email, None) {
            return Err(duplicate_email(&input.email).into());
        }

        let timestamp = now();
        let user = User {
            id: users.allocate_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            role: input.role.clone(),
            avatar_url: input.avatar_url.clone(),
            bio: input.bio.clone(),
            website: input.website.clone(),
            location: input.location.clone(),
            skills: input.skills.clone(),
            is_public: input.is_public,
            created_at: timestamp,
            updated_at: timestamp,
        };
        Ok(users.insert(user))
    }

    async fn update_user(&self, id: DbId, input: &UpdateUser) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;
        if users.get(id).is_none() {
            return Ok(None);
        }
        if let Some(email) = &input.email {
            if email_taken(&users, email, Some(id)) {
                return Err(duplicate_email(email).into());
            }
        }

        let Some(user) = users.get_mut(id) else {
            return Ok(None);
        };
        input.apply_to(user);
        user.updated_at = bump_modified(user.updated_at);
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.users.write().await.remove(id))
    }

    // -- projects -------------------------------------------------------------

    async fn list_projects(&self, filter: &ProjectFilter) -> StoreResult<Vec<Project>> {
        Ok(self
            .projects
            .read()
            .await
            .filtered(|project| filter.matches(project)))
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(self.projects.read().await.get(id).cloned())
    }

    async fn create_project(&self, input: &CreateProject) -> StoreResult<Project> {
        let mut projects = self.projects.write().await;
        let timestamp = now();
        let project = Project {
            id: projects.allocate_id(),
            title: input.title.clone(),
            description: input.description.clone(),
            tech_stack: input.tech_stack.clone(),
            status: input.status.clone(),
            featured: input.featured,
            live_url: input.live_url.clone(),
            github_url: input.github_url.clone(),
            image_url: input.image_url.clone(),
            start_date: input.start_date,
            end_date: input.end_date,
            created_at: timestamp,
            updated_at: timestamp,
        };
        Ok(projects.insert(project))
    }

    async fn update_project(
        &self,
        id: DbId,
        input: &UpdateProject,
    ) -> StoreResult<Option<Project>> {
        let mut projects = self.projects.write().await;
        let Some(project) = projects.get_mut(id) else {
            return Ok(None);
        };
        input.apply_to(project);
        project.updated_at = bump_modified(project.updated_at);
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.projects.write().await.remove(id))
    }

    // -- skills ---------------------------------------------------------------

    async fn list_skills(&self, filter: &SkillFilter) -> StoreResult<Vec<Skill>> {
        Ok(self
            .skills
            .read()
            .await
            .filtered(|skill| filter.matches(skill)))
    }

    async fn find_skill(&self, id: DbId) -> StoreResult<Option<Skill>> {
        Ok(self.skills.read().await.get(id).cloned())
    }

    async fn create_skill(&self, input: &CreateSkill) -> StoreResult<Skill> {
        let mut skills = self.skills.write().await;
        let skill = Skill {
            id: skills.allocate_id(),
            name: input.name.clone(),
            category: input.category.clone(),
            level: input.level.clone(),
            years_exp: input.years_exp,
            featured: input.featured,
            icon: input.icon.clone(),
            color: input.color.clone(),
            description: input.description.clone(),
            created_at: now(),
        };
        Ok(skills.insert(skill))
    }

    async fn delete_skill(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.skills.write().await.remove(id))
    }

    // -- contact & analytics --------------------------------------------------

    async fn create_contact(
        &self,
        input: &CreateContactMessage,
        origin: &RequestOrigin,
    ) -> StoreResult<ContactMessage> {
        let mut contacts = self.contacts.write().await;
        let message = ContactMessage {
            id: contacts.allocate_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            subject: input.subject.clone(),
            message: input.message.clone(),
            status: STATUS_UNREAD.to_string(),
            ip_address: origin.ip_address.clone(),
            user_agent: origin.user_agent.clone(),
            created_at: now(),
            read_at: None,
        };
        Ok(contacts.insert(message))
    }

    async fn record_visit(
        &self,
        input: &CreateVisit,
        origin: &RequestOrigin,
    ) -> StoreResult<Visit> {
        let mut visits = self.visits.write().await;
        let visit = Visit {
            id: visits.allocate_id(),
            page: input.page.clone(),
            user_agent: input
                .user_agent
                .clone()
                .or_else(|| origin.user_agent.clone()),
            country: input.country.clone(),
            referrer: input.referrer.clone(),
            ip_address: origin.ip_address.clone(),
            created_at: now(),
        };
        Ok(visits.insert(visit))
    }

    async fn list_visits(&self) -> StoreResult<Vec<Visit>> {
        Ok(self.visits.read().await.filtered(|_| true))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;
    use crate::store::StoreError;

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            name: "Test User".into(),
            email: email.into(),
            role: "Engineer".into(),
            avatar_url: None,
            bio: None,
            website: None,
            location: None,
            skills: vec![],
            is_public: true,
        }
    }

    fn new_project(title: &str, status: &str, featured: bool) -> CreateProject {
        CreateProject {
            title: title.into(),
            description: "A project".into(),
            tech_stack: vec!["Rust".into()],
            status: status.into(),
            featured,
            live_url: None,
            github_url: None,
            image_url: None,
            start_date: None,
            end_date: None,
        }
    }

    fn new_skill(name: &str, category: &str, featured: bool) -> CreateSkill {
        CreateSkill {
            name: name.into(),
            category: category.into(),
            level: "advanced".into(),
            years_exp: 0,
            featured,
            icon: None,
            color: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn ids_start_at_one_and_are_not_reused() {
        let store = MemoryStore::new();
        let a = store
            .create_skill(&new_skill("Go", "backend", false))
            .await
            .unwrap();
        let b = store
            .create_skill(&new_skill("Rust", "backend", false))
            .await
            .unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        assert!(store.delete_skill(b.id).await.unwrap());
        let c = store
            .create_skill(&new_skill("Zig", "backend", false))
            .await
            .unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn collections_have_independent_counters() {
        let store = MemoryStore::new();
        store.create_user(&new_user("a@example.com")).await.unwrap();
        let project = store
            .create_project(&new_project("P", "completed", false))
            .await
            .unwrap();
        assert_eq!(project.id, 1);
    }

    #[tokio::test]
    async fn seeded_store_contains_sample_portfolio() {
        let store = MemoryStore::seeded().await.unwrap();
        assert_eq!(
            store
                .list_users(&UserFilter::default())
                .await
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            store
                .list_projects(&ProjectFilter::default())
                .await
                .unwrap()
                .len(),
            2
        );
        assert_eq!(
            store
                .list_skills(&SkillFilter::default())
                .await
                .unwrap()
                .len(),
            6
        );
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        store
            .create_user(&new_user("dup@example.com"))
            .await
            .unwrap();
        let err = store
            .create_user(&new_user("dup@example.com"))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Core(CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn updating_to_another_users_email_is_a_conflict() {
        let store = MemoryStore::new();
        store.create_user(&new_user("a@example.com")).await.unwrap();
        let b = store.create_user(&new_user("b@example.com")).await.unwrap();

        let update = UpdateUser {
            email: Some("a@example.com".into()),
            ..Default::default()
        };
        let err = store.update_user(b.id, &update).await.unwrap_err();
        assert_matches!(err, StoreError::Core(CoreError::Conflict(_)));

        let same = UpdateUser {
            email: Some("b@example.com".into()),
            ..Default::default()
        };
        assert!(store.update_user(b.id, &same).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn user_filter_on_visibility() {
        let store = MemoryStore::new();
        store
            .create_user(&new_user("public@example.com"))
            .await
            .unwrap();
        let mut hidden = new_user("hidden@example.com");
        hidden.is_public = false;
        store.create_user(&hidden).await.unwrap();

        let filter = UserFilter {
            is_public: Some(false),
        };
        let users = store.list_users(&filter).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "hidden@example.com");
    }

    #[tokio::test]
    async fn project_filters_compose() {
        let store = MemoryStore::new();
        store
            .create_project(&new_project("A", "completed", true))
            .await
            .unwrap();
        store
            .create_project(&new_project("B", "completed", false))
            .await
            .unwrap();
        store
            .create_project(&new_project("C", "in-progress", true))
            .await
            .unwrap();

        let filter = ProjectFilter {
            status: Some("completed".into()),
            featured: Some(true),
        };
        let titles: Vec<_> = store
            .list_projects(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["A"]);

        let empty_status = ProjectFilter {
            status: Some(String::new()),
            featured: None,
        };
        assert_eq!(store.list_projects(&empty_status).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn skill_filters_compose() {
        let store = MemoryStore::new();
        store
            .create_skill(&new_skill("Go", "backend", true))
            .await
            .unwrap();
        store
            .create_skill(&new_skill("SQL", "backend", false))
            .await
            .unwrap();
        store
            .create_skill(&new_skill("CSS", "frontend", true))
            .await
            .unwrap();

        let filter = SkillFilter {
            category: Some("backend".into()),
            featured: Some(true),
        };
        let names: Vec<_> = store
            .list_skills(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Go"]);
    }

    #[tokio::test]
    async fn update_distinguishes_null_from_omitted() {
        let store = MemoryStore::new();
        let mut input = new_project("P", "in-progress", false);
        input.end_date = Some(now());
        input.live_url = Some("https://example.com".into());
        let created = store.create_project(&input).await.unwrap();

        let update = UpdateProject {
            end_date: Some(None),
            ..Default::default()
        };
        let updated = store
            .update_project(created.id, &update)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.end_date, None);
        assert_eq!(updated.live_url.as_deref(), Some("https://example.com"));
        assert_eq!(updated.title, "P");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn updated_at_strictly_increases() {
        let store = MemoryStore::new();
        let user = store.create_user(&new_user("t@example.com")).await.unwrap();

        let mut previous = user.updated_at;
        for _ in 0..5 {
            let updated = store
                .update_user(user.id, &UpdateUser::default())
                .await
                .unwrap()
                .unwrap();
            assert!(updated.updated_at > previous);
            previous = updated.updated_at;
        }
    }

    #[tokio::test]
    async fn updating_missing_user_with_taken_email_reports_absence() {
        let store = MemoryStore::new();
        store.create_user(&new_user("a@example.com")).await.unwrap();

        let update = UpdateUser {
            email: Some("a@example.com".into()),
            ..Default::default()
        };
        assert!(store.update_user(999, &update).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_ids_report_absence() {
        let store = MemoryStore::new();
        assert!(store.find_user(42).await.unwrap().is_none());
        assert!(store
            .update_project(42, &UpdateProject::default())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_skill(42).await.unwrap());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let project = store
            .create_project(&new_project("P", "completed", false))
            .await
            .unwrap();
        assert!(store.delete_project(project.id).await.unwrap());
        assert!(!store.delete_project(project.id).await.unwrap());
        assert!(store.find_project(project.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn visit_captures_origin_and_prefers_payload_user_agent() {
        let store = MemoryStore::new();
        let origin = RequestOrigin {
            ip_address: Some("203.0.113.9".into()),
            user_agent: Some("header-agent".into()),
        };

        let explicit = CreateVisit {
            page: "/".into(),
            user_agent: Some("payload-agent".into()),
            country: None,
            referrer: None,
        };
        let visit = store.record_visit(&explicit, &origin).await.unwrap();
        assert_eq!(visit.user_agent.as_deref(), Some("payload-agent"));
        assert_eq!(visit.ip_address.as_deref(), Some("203.0.113.9"));

        let implicit = CreateVisit {
            user_agent: None,
            ..explicit
        };
        let visit = store.record_visit(&implicit, &origin).await.unwrap();
        assert_eq!(visit.user_agent.as_deref(), Some("header-agent"));
        assert_eq!(store.list_visits().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn contact_is_stored_unread() {
        let store = MemoryStore::new();
        let input = CreateContactMessage {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            subject: "Hello".into(),
            message: "Hi there".into(),
        };
        let message = store
            .create_contact(&input, &RequestOrigin::default())
            .await
            .unwrap();
        assert_eq!(message.status, STATUS_UNREAD);
        assert!(message.read_at.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_distinct_ids() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .create_user(&new_user(&format!("user{i}@example.com")))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }
        assert_eq!(ids.len(), 50);
        assert_eq!(ids.iter().copied().max(), Some(50));
        assert_eq!(
            store
                .list_users(&UserFilter::default())
                .await
                .unwrap()
                .len(),
            50
        );
    }
}
