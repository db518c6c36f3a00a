use std::sync::Arc;

use tracing::{debug, info};

use crate::api::format::TaskResponse;
use crate::config::QueryConfig;
use crate::database::models::TaskDraft;
use crate::database::Store;
use crate::filter::TaskQuery;
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::identity::IdentityResolver;
use crate::services::ownership::OwnershipGuard;
use crate::types::{ProjectId, TaskId, TaskPriority, TaskStatus};

/// Optional narrowing for a per-project listing
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub sort_by: Option<String>,
}

/// Cross-project search request
#[derive(Debug, Clone, Default)]
pub struct TaskSearch {
    pub query: String,
    /// Only honoured when `combine_search_filters` is enabled
    pub status: Option<TaskStatus>,
    /// Only honoured when `combine_search_filters` is enabled
    pub priority: Option<TaskPriority>,
    pub sort_by: Option<String>,
}

#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Store>,
    identity: IdentityResolver,
    guard: OwnershipGuard,
    query_config: QueryConfig,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>, query_config: QueryConfig) -> Self {
        Self {
            identity: IdentityResolver::new(store.clone()),
            guard: OwnershipGuard::new(store.clone()),
            store,
            query_config,
        }
    }

    pub async fn create(&self, identity: &str, project_id: ProjectId, draft: TaskDraft) -> ServiceResult<TaskResponse> {
        let user = self.identity.resolve(identity).await?;
        let project = self.guard.authorize_project(&user, project_id).await?;
        let task = self.store.insert_task(project.id(), draft).await?;
        info!(task_id = %task.id, project_id = %project_id, "task created");
        Ok(task.into())
    }

    pub async fn get(&self, identity: &str, project_id: ProjectId, task_id: TaskId) -> ServiceResult<TaskResponse> {
        let user = self.identity.resolve(identity).await?;
        let project = self.guard.authorize_project(&user, project_id).await?;
        let task = self
            .store
            .find_task(task_id, project.id())
            .await?
            .ok_or_else(|| ServiceError::not_found("Task not found"))?;
        Ok(task.into())
    }

    pub async fn list(&self, identity: &str, project_id: ProjectId, filter: TaskFilter) -> ServiceResult<Vec<TaskResponse>> {
        let user = self.identity.resolve(identity).await?;
        let project = self.guard.authorize_project(&user, project_id).await?;

        let query = TaskQuery::new(project.scope())
            .status(filter.status)
            .priority(filter.priority)
            .sort_by(filter.sort_by.as_deref())?;

        self.run(query).await
    }

    /// Searches every project the caller owns. Status and priority are
    /// dropped unless `combine_search_filters` is on.
    pub async fn search(&self, identity: &str, search: TaskSearch) -> ServiceResult<Vec<TaskResponse>> {
        let user = self.identity.resolve(identity).await?;

        let (status, priority) = if self.query_config.combine_search_filters {
            (search.status, search.priority)
        } else {
            (None, None)
        };

        let query = TaskQuery::new(OwnershipGuard::owner_scope(&user))
            .search(Some(search.query.as_str()))
            .status(status)
            .priority(priority)
            .sort_by(search.sort_by.as_deref())?;

        self.run(query).await
    }

    pub async fn update(
        &self,
        identity: &str,
        project_id: ProjectId,
        task_id: TaskId,
        draft: TaskDraft,
    ) -> ServiceResult<TaskResponse> {
        let user = self.identity.resolve(identity).await?;
        let project = self.guard.authorize_project(&user, project_id).await?;
        let task = self
            .store
            .update_task(task_id, project.id(), draft)
            .await?
            .ok_or_else(|| ServiceError::not_found("Task not found"))?;
        info!(task_id = %task.id, project_id = %project_id, "task updated");
        Ok(task.into())
    }

    pub async fn delete(&self, identity: &str, project_id: ProjectId, task_id: TaskId) -> ServiceResult<()> {
        let user = self.identity.resolve(identity).await?;
        let project = self.guard.authorize_project(&user, project_id).await?;
        if !self.store.delete_task(task_id, project.id()).await? {
            return Err(ServiceError::not_found("Task not found"));
        }
        info!(task_id = %task_id, project_id = %project_id, "task deleted");
        Ok(())
    }

    async fn run(&self, query: TaskQuery) -> ServiceResult<Vec<TaskResponse>> {
        if self.query_config.debug_logging {
            debug!(conditions = ?query.conditions(), sort = ?query.sort_field(), "composed task query");
        }
        let tasks = self.store.query_tasks(&query).await?;
        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }
}
