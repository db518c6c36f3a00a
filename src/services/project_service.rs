use std::sync::Arc;

use tracing::info;

use crate::api::format::ProjectResponse;
use crate::database::models::ProjectDraft;
use crate::database::Store;
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::identity::IdentityResolver;
use crate::services::ownership::OwnershipGuard;
use crate::types::ProjectId;

/// Ownership-scoped CRUD over projects
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn Store>,
    identity: IdentityResolver,
    guard: OwnershipGuard,
}

impl ProjectService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            identity: IdentityResolver::new(store.clone()),
            guard: OwnershipGuard::new(store.clone()),
            store,
        }
    }

    pub async fn create(&self, identity: &str, draft: ProjectDraft) -> ServiceResult<ProjectResponse> {
        let user = self.identity.resolve(identity).await?;
        let project = self.store.insert_project(user.id, draft).await?;
        info!(project_id = %project.id, user = %user.username, "project created");
        Ok(project.into())
    }

    pub async fn list(&self, identity: &str) -> ServiceResult<Vec<ProjectResponse>> {
        let user = self.identity.resolve(identity).await?;
        let projects = self.store.list_projects(user.id).await?;
        Ok(projects.into_iter().map(ProjectResponse::from).collect())
    }

    pub async fn get(&self, identity: &str, project_id: ProjectId) -> ServiceResult<ProjectResponse> {
        let user = self.identity.resolve(identity).await?;
        let authorized = self.guard.authorize_project(&user, project_id).await?;
        Ok(authorized.into_project().into())
    }

    pub async fn update(
        &self,
        identity: &str,
        project_id: ProjectId,
        draft: ProjectDraft,
    ) -> ServiceResult<ProjectResponse> {
        let user = self.identity.resolve(identity).await?;
        let authorized = self.guard.authorize_project(&user, project_id).await?;
        // a concurrent delete between the guard and the write lands here
        let project = self
            .store
            .update_project(authorized.id(), user.id, draft)
            .await?
            .ok_or_else(|| ServiceError::not_found("Project not found"))?;
        info!(project_id = %project.id, "project updated");
        Ok(project.into())
    }

    pub async fn delete(&self, identity: &str, project_id: ProjectId) -> ServiceResult<()> {
        let user = self.identity.resolve(identity).await?;
        let authorized = self.guard.authorize_project(&user, project_id).await?;
        if !self.store.delete_project(authorized.id(), user.id).await? {
            return Err(ServiceError::not_found("Project not found"));
        }
        info!(project_id = %project_id, "project deleted");
        Ok(())
    }
}
