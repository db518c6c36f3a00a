use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, Project, ProjectDraft, Task, TaskDraft, User};
use crate::filter::TaskQuery;
use crate::types::{ProjectId, TaskId, UserId};

/// Persistence port consumed by the services.
///
/// Every project lookup or write is keyed by id **and** owner, and every task
/// lookup or write by id **and** project, so a store call can never reach a
/// row outside the scope the caller was authorized for. Writes that match no
/// row return `None`/`false` instead of an error.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn username_exists(&self, username: &str) -> Result<bool, DatabaseError>;

    async fn email_exists(&self, email: &str) -> Result<bool, DatabaseError>;

    /// Fails with `DatabaseError::Conflict` on a duplicate username or email
    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_project(&self, id: ProjectId, owner: UserId) -> Result<Option<Project>, DatabaseError>;

    async fn list_projects(&self, owner: UserId) -> Result<Vec<Project>, DatabaseError>;

    async fn insert_project(&self, owner: UserId, draft: ProjectDraft) -> Result<Project, DatabaseError>;

    async fn update_project(
        &self,
        id: ProjectId,
        owner: UserId,
        draft: ProjectDraft,
    ) -> Result<Option<Project>, DatabaseError>;

    /// Removes the project and all of its tasks
    async fn delete_project(&self, id: ProjectId, owner: UserId) -> Result<bool, DatabaseError>;

    async fn find_task(&self, id: TaskId, project: ProjectId) -> Result<Option<Task>, DatabaseError>;

    async fn query_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, DatabaseError>;

    async fn insert_task(&self, project: ProjectId, draft: TaskDraft) -> Result<Task, DatabaseError>;

    async fn update_task(&self, id: TaskId, project: ProjectId, draft: TaskDraft) -> Result<Option<Task>, DatabaseError>;

    async fn delete_task(&self, id: TaskId, project: ProjectId) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
