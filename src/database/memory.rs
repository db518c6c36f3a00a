use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, Project, ProjectDraft, Task, TaskDraft, User};
use crate::database::store::Store;
use crate::filter::TaskQuery;
use crate::types::{ProjectId, TaskId, UserId};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    projects: BTreeMap<ProjectId, Project>,
    tasks: BTreeMap<TaskId, Task>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process store with the same observable behaviour as the PostgreSQL
/// store: owner-keyed lookups, cascade on project delete, unique username
/// and email. Used when no `DATABASE_URL` is configured and by the tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(DatabaseError::Conflict("users_username_key".to_string()));
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict("users_email_key".to_string()));
        }
        let id = UserId(tables.next_id());
        let user = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_project(&self, id: ProjectId, owner: UserId) -> Result<Option<Project>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.projects.get(&id).filter(|p| p.user_id == owner).cloned())
    }

    async fn list_projects(&self, owner: UserId) -> Result<Vec<Project>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.projects.values().filter(|p| p.user_id == owner).cloned().collect())
    }

    async fn insert_project(&self, owner: UserId, draft: ProjectDraft) -> Result<Project, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&owner) {
            return Err(DatabaseError::QueryError(format!("user {} does not exist", owner)));
        }
        let now = Utc::now();
        let project = Project {
            id: ProjectId(tables.next_id()),
            user_id: owner,
            name: draft.name,
            description: draft.description,
            created_at: now,
            updated_at: now,
        };
        tables.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        id: ProjectId,
        owner: UserId,
        draft: ProjectDraft,
    ) -> Result<Option<Project>, DatabaseError> {
        let mut tables = self.tables.write().await;
        let Some(project) = tables.projects.get_mut(&id).filter(|p| p.user_id == owner) else {
            return Ok(None);
        };
        project.name = draft.name;
        project.description = draft.description;
        project.updated_at = Utc::now();
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: ProjectId, owner: UserId) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.projects.get(&id).is_some_and(|p| p.user_id == owner) {
            return Ok(false);
        }
        tables.projects.remove(&id);
        tables.tasks.retain(|_, t| t.project_id != id);
        Ok(true)
    }

    async fn find_task(&self, id: TaskId, project: ProjectId) -> Result<Option<Task>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.get(&id).filter(|t| t.project_id == project).cloned())
    }

    async fn query_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, DatabaseError> {
        let tables = self.tables.read().await;
        let rows = tables.tasks.values().filter_map(|task| {
            // a task whose project is gone is unreachable, same as the FK cascade
            let owner = tables.projects.get(&task.project_id)?.user_id;
            Some((task.clone(), owner))
        });
        Ok(query.apply(rows))
    }

    async fn insert_task(&self, project: ProjectId, draft: TaskDraft) -> Result<Task, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.projects.contains_key(&project) {
            return Err(DatabaseError::QueryError(format!("project {} does not exist", project)));
        }
        let now = Utc::now();
        let task = Task {
            id: TaskId(tables.next_id()),
            project_id: project,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
            created_at: now,
            updated_at: now,
        };
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, project: ProjectId, draft: TaskDraft) -> Result<Option<Task>, DatabaseError> {
        let mut tables = self.tables.write().await;
        let Some(task) = tables.tasks.get_mut(&id).filter(|t| t.project_id == project) else {
            return Ok(None);
        };
        task.title = draft.title;
        task.description = draft.description;
        task.status = draft.status;
        task.priority = draft.priority;
        task.due_date = draft.due_date;
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: TaskId, project: ProjectId) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.tasks.get(&id).is_some_and(|t| t.project_id == project) {
            return Ok(false);
        }
        tables.tasks.remove(&id);
        Ok(true)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
